// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notifier: turns a piped packet into a ticket, a ticket note or plain text
//!
//! One call runs the whole sequence: pick the packet, resolve its step,
//! render the step's template, then dispatch the step's action.

use crate::error::NotifyError;
use adpn_adapters::ticket::split_labels;
use adpn_adapters::{CreatedIssue, IssueRef, LabelChange, NewIssue, PostedNote, TicketAdapter, TicketError};
use adpn_core::context::{self, Computed};
use adpn_core::{
    select, Dispatch, Packet, PacketBatch, Pick, Rendered, Resolver, Settings, Source, Step,
    TemplateStore, Transition, INGEST_STEP,
};
use std::fmt;

/// Subject used when a template has no subject line and no `subject` switch
pub const DEFAULT_SUBJECT_PREFIX: &str = "ADPN";

/// What the notifier did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    IssueCreated(CreatedIssue),
    NotePosted { issue: IssueRef, note: PostedNote },
    /// Rendered body for standard output
    Printed { body: String },
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::IssueCreated(created) => {
                write!(f, "Created issue #{}: {}", created.iid, created.url)
            }
            Report::NotePosted { issue, note } => {
                let link = note.deep_link().unwrap_or_else(|| issue.to_string());
                write!(f, "Posted note {link}")?;
                if !note.author.is_empty() {
                    write!(f, " by {}", note.author)?;
                }
                if !note.created_at.is_empty() {
                    write!(f, " at {}", note.created_at)?;
                }
                Ok(())
            }
            Report::Printed { body } => f.write_str(body),
        }
    }
}

/// Result of one notify call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub report: Report,
    /// Packet for the next pipeline stage, when there is one to pass on
    pub packet: Option<Packet>,
}

/// Orchestrates resolution, rendering and dispatch
pub struct Notifier<T> {
    tickets: T,
    templates: TemplateStore,
}

impl<T: TicketAdapter> Notifier<T> {
    pub fn new(tickets: T, templates: TemplateStore) -> Self {
        Self { tickets, templates }
    }

    pub fn tickets(&self) -> &T {
        &self.tickets
    }

    /// Run one notification for the piped `batch`
    pub fn notify(
        &self,
        settings: &Settings,
        batch: &PacketBatch,
        computed: &Computed,
    ) -> Result<Outcome, NotifyError> {
        let transition = settings
            .value("pipeline")
            .map(|p| p.parse::<Transition>().unwrap_or_default());
        let packet = self.pick_packet(settings, batch, transition.as_ref())?;

        let resolver = Resolver::new(settings, batch).focused(&packet);
        let recorded = resolver.resolve(&[Source::switch("step"), Source::field(INGEST_STEP)]);
        let step = Step::parse(&recorded);
        let behavior = step.behavior();
        let slug = resolver.resolve(&[
            Source::switch("template"),
            Source::literal(behavior.template),
        ]);

        let span = tracing::info_span!("notify", step = %step, template = %slug);
        let _guard = span.enter();

        let cmd = if recorded.trim().is_empty() {
            step.as_str().to_string()
        } else {
            recorded.trim().to_string()
        };
        let ctx = context::build(&resolver, &packet, &cmd, computed);
        let rendered = self.templates.render(&slug, &ctx)?;
        let subject = subject_for(&resolver, &rendered, step);

        let issue = resolver
            .resolve_opt(&[
                Source::switch("issue"),
                Source::switch("gitlab-issue"),
                Source::field("Gitlab Issue"),
            ])
            .and_then(|text| match text.parse::<IssueRef>() {
                Ok(issue) => Some(issue),
                Err(e) => {
                    tracing::warn!(error = %e, "ignoring unusable ticket reference");
                    None
                }
            });

        let dispatch = if settings.switched("dry-run") {
            Dispatch::Plain
        } else {
            behavior.action.dispatch(issue.is_some())
        };
        tracing::info!(?dispatch, has_ticket = issue.is_some(), "dispatching");

        let sent = match (dispatch, issue) {
            (Dispatch::CreateIssue, _) => {
                let labels = settings
                    .value("labels")
                    .map(split_labels)
                    .unwrap_or_else(|| vec![step.label().to_string()]);
                let new_issue = NewIssue {
                    project: resolver.resolve_opt(&[
                        Source::switch("gitlab/project"),
                        Source::field("Gitlab Project"),
                    ]),
                    title: subject,
                    description: rendered.body.clone(),
                    labels,
                };
                self.tickets
                    .create_issue(&new_issue)
                    .map(|created| {
                        let packet = packet.clone().with("Gitlab Issue", created.url.clone());
                        (Report::IssueCreated(created), packet)
                    })
            }
            (Dispatch::PostNote, Some(issue)) => {
                let labels = LabelChange::from_lists(
                    settings.get("label-add").unwrap_or_default(),
                    settings.get("label-remove").unwrap_or_default(),
                );
                self.tickets
                    .add_note(&issue, &rendered.body, &labels)
                    .map(|note| {
                        let link = note.deep_link().unwrap_or_else(|| issue.to_string());
                        let packet = packet
                            .clone()
                            .with("Gitlab Note", link)
                            .with("Noted By", note.author.clone())
                            .with("Noted At", note.created_at.clone());
                        (Report::NotePosted { issue, note }, packet)
                    })
            }
            (Dispatch::PostNote, None) | (Dispatch::Plain, _) => {
                return Ok(printed(rendered, packet, transition.is_some()));
            }
        };

        match sent {
            Ok((report, packet)) => Ok(Outcome {
                report,
                packet: Some(packet),
            }),
            Err(TicketError::NotConfigured) => {
                tracing::warn!("no ticketing system configured, printing instead");
                Ok(printed(rendered, packet, transition.is_some()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// The packet this stage works on.
    ///
    /// With a transition the batch must hold a packet at the `from` step,
    /// unless nothing structured was piped and positional arguments stand in
    /// for the packet. Without one, the whole batch is cascaded.
    fn pick_packet(
        &self,
        settings: &Settings,
        batch: &PacketBatch,
        transition: Option<&Transition>,
    ) -> Result<Packet, NotifyError> {
        let Some(transition) = transition else {
            return Ok(batch.cascade());
        };

        if !batch.is_structured() && settings.paths().next().is_some() {
            tracing::debug!(%transition, "no packet piped, arguments stand in for it");
            let to = transition.to.trim();
            return Ok(if to.is_empty() {
                Packet::new()
            } else {
                Packet::new().restamped(to)
            });
        }

        let pick = settings
            .value("pick")
            .map(str::parse::<Pick>)
            .transpose()?
            .unwrap_or_default();
        Ok(select(batch, transition, pick)?)
    }
}

/// The filled rendered subject, then the `subject` switch, then `ADPN <Step>`
fn subject_for(resolver: &Resolver<'_>, rendered: &Rendered, step: Step) -> String {
    match rendered.filled_subject() {
        Some(subject) => subject.to_string(),
        None => resolver.resolve(&[
            Source::switch("subject"),
            Source::literal(format!("{DEFAULT_SUBJECT_PREFIX} {}", step.label())),
        ]),
    }
}

fn printed(rendered: Rendered, packet: Packet, advanced: bool) -> Outcome {
    Outcome {
        report: Report::Printed {
            body: rendered.body,
        },
        packet: advanced.then_some(packet),
    }
}

#[cfg(test)]
#[path = "notifier_tests.rs"]
mod tests;
