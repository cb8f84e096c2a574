// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workflow steps and the behavior each one selects
//!
//! Steps advance because operators run different commands, not because of
//! anything in here: this is a lookup table from a packet's recorded step to
//! the template and ticketing action used to announce it.

use std::fmt;

/// Known ingest workflow steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Staged,
    Accepted,
    Promoted,
    Published,
    Unstaged,
    Output,
    /// Anything unrecognized
    Default,
}

impl Step {
    /// Parse a recorded step. Unknown values fall back to `Default`.
    pub fn parse(text: &str) -> Step {
        match text.trim().to_ascii_lowercase().as_str() {
            "staged" => Step::Staged,
            "accepted" => Step::Accepted,
            "promoted" => Step::Promoted,
            "published" => Step::Published,
            "unstaged" => Step::Unstaged,
            "output" => Step::Output,
            _ => Step::Default,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Staged => "staged",
            Step::Accepted => "accepted",
            Step::Promoted => "promoted",
            Step::Published => "published",
            Step::Unstaged => "unstaged",
            Step::Output => "output",
            Step::Default => "default",
        }
    }

    /// Capitalized form used for ticket labels
    pub fn label(&self) -> &'static str {
        match self {
            Step::Staged => "Staged",
            Step::Accepted => "Accepted",
            Step::Promoted => "Promoted",
            Step::Published => "Published",
            Step::Unstaged => "Unstaged",
            Step::Output => "Output",
            Step::Default => "Default",
        }
    }

    pub fn behavior(&self) -> Behavior {
        let (template, action) = match self {
            Step::Staged => ("notify", Action::CreateIssue),
            Step::Published => ("announce", Action::NoteOrPlain),
            Step::Unstaged => ("unstage", Action::Plain),
            Step::Output => ("output", Action::NoteOrPlain),
            Step::Accepted | Step::Promoted => ("notify", Action::NoteOrPlain),
            Step::Default => ("notify", Action::Plain),
        };
        Behavior { template, action }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What announcing a step does with the ticketing system
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Open a new ticket with subject, body and labels
    CreateIssue,
    /// Comment on the referenced ticket, or print when there is none
    NoteOrPlain,
    /// Print the rendered body
    Plain,
}

impl Action {
    /// Concrete dispatch given whether a ticket reference is available
    pub fn dispatch(self, has_ticket: bool) -> Dispatch {
        match self {
            Action::CreateIssue => Dispatch::CreateIssue,
            Action::NoteOrPlain if has_ticket => Dispatch::PostNote,
            Action::NoteOrPlain | Action::Plain => Dispatch::Plain,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    CreateIssue,
    PostNote,
    Plain,
}

/// Template slug and action for one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Behavior {
    pub template: &'static str,
    pub action: Action,
}

/// Behavior for a recorded step value
pub fn lookup(step: &str) -> Behavior {
    Step::parse(step).behavior()
}

#[cfg(test)]
#[path = "step_tests.rs"]
mod tests;
