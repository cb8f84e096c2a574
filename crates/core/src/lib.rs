// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! adpn-core: Core library for the ADPN ingest workflow tools
//!
//! This crate provides:
//! - JSON packets and packet batches read from piped input
//! - The layered switch table (defaults, config file, command line)
//! - Ordered fallback resolution of parameters
//! - Conversion of packets back into command-line switches
//! - Pipeline packet selection and the ingest step table
//! - Notification templates and their render context

pub mod packet;
pub mod field;
pub mod settings;
pub mod resolve;
pub mod switches;

pub mod select;
pub mod step;

pub mod extent;
pub mod context;
pub mod template;

// Re-exports
pub use context::{Computed, RenderContext};
pub use extent::Extent;
pub use field::{FieldKey, FieldPath};
pub use packet::{Packet, PacketBatch, PacketError, INGEST_STEP, PACKET_PROLOG};
pub use resolve::{Resolver, Source};
pub use select::{select, Pick, SelectError, Transition};
pub use settings::{Settings, SettingsError};
pub use step::{Action, Behavior, Dispatch, Step};
pub use template::{Rendered, TemplateError, TemplateStore};
