// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! BagIt verification of a staged AU

use crate::error::VerifyError;
use adpn_adapters::Validator;
use adpn_core::{Packet, PacketBatch, Resolver, Settings, Source};
use std::path::PathBuf;

/// Packet field recording a passed validation
pub const BAGIT_VALIDATION: &str = "BagIt Validation";

/// A bag that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verified {
    pub dir: PathBuf,
    /// Validator output, verbatim
    pub output: String,
    /// Piped packet stamped with the result
    pub packet: Packet,
}

/// Validate the directory named by the `local` switch, the first positional
/// argument, or the piped packet's `Local Path`.
pub fn verify<V: Validator>(
    validator: &V,
    settings: &Settings,
    batch: &PacketBatch,
) -> Result<Verified, VerifyError> {
    let resolver = Resolver::new(settings, batch);
    let dir = resolver
        .resolve_opt(&[
            Source::switch("local"),
            Source::literal(settings.paths().next().unwrap_or_default()),
            Source::field("Local Path"),
        ])
        .map(PathBuf::from)
        .ok_or(VerifyError::NoDirectory)?;

    let validation = validator.validate(&dir)?;
    Ok(Verified {
        dir,
        output: validation.output,
        packet: batch.cascade().with(BAGIT_VALIDATION, "ok"),
    })
}

#[cfg(test)]
#[path = "verify_tests.rs"]
mod tests;
