// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `adpn notify`: announce a piped packet on its ticket

use super::{Invocation, Parse, WorkflowArgs};
use crate::error::CliError;
use crate::output;
use adpn_adapters::{GitLabAdapter, GitLabConfig, NoOpTicketAdapter, TicketAdapter, TracedTicketAdapter};
use adpn_core::{Computed, Settings, TemplateStore};
use adpn_engine::{Notifier, Outcome};
use anyhow::Result;

pub fn handle(args: WorkflowArgs) -> Result<()> {
    let inv = Invocation::load(&args, Parse::Lenient)?;
    let templates = template_store(&inv.settings);
    let computed = Computed::detect();

    let outcome = match GitLabConfig::from_settings(&inv.settings) {
        Some(config) => {
            tracing::debug!(api = %config.api, "using GitLab ticketing");
            run(TracedTicketAdapter::new(GitLabAdapter::new(config)), templates, &inv, &computed)?
        }
        None => {
            tracing::debug!("gitlab/api and gitlab/token not both set, tickets disabled");
            run(TracedTicketAdapter::new(NoOpTicketAdapter), templates, &inv, &computed)?
        }
    };

    output::write_outcome(
        &mut std::io::stdout().lock(),
        &mut std::io::stderr().lock(),
        &outcome,
        inv.format,
    )?;
    Ok(())
}

/// Notify through `tickets`
pub fn run<T: TicketAdapter>(
    tickets: T,
    templates: TemplateStore,
    inv: &Invocation,
    computed: &Computed,
) -> Result<Outcome, CliError> {
    Notifier::new(tickets, templates)
        .notify(&inv.settings, &inv.batch, computed)
        .map_err(CliError::from)
}

/// Templates from the `templates` directory switch, else built in
pub fn template_store(settings: &Settings) -> TemplateStore {
    match settings.value("templates") {
        Some(dir) => TemplateStore::in_dir(dir.trim()),
        None => TemplateStore::builtin(),
    }
}

#[cfg(test)]
#[path = "notify_tests.rs"]
mod tests;
