//! Conflict resolution when an agent file already exists at the destination.

use crate::agent::Agent;
use std::path::Path;

/// An existing destination file for an agent being installed.
#[derive(Debug, Clone, Copy)]
pub struct Conflict<'a> {
    pub agent: &'a Agent,
    pub destination: &'a Path,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictResolution {
    Overwrite,
    Skip,
}

/// Decides what to do with one conflict. Called once per conflicting agent, in
/// input order; may block (e.g. on a terminal prompt).
pub trait ConflictResolver: Send + Sync {
    fn resolve(&self, conflict: &Conflict<'_>) -> ConflictResolution;
}

impl<F> ConflictResolver for F
where
    F: Fn(&Conflict<'_>) -> ConflictResolution + Send + Sync,
{
    fn resolve(&self, conflict: &Conflict<'_>) -> ConflictResolution {
        self(conflict)
    }
}

/// Resolver that gives the same answer for every conflict.
#[derive(Debug, Clone, Copy)]
pub struct FixedResolver(pub ConflictResolution);

impl ConflictResolver for FixedResolver {
    fn resolve(&self, _conflict: &Conflict<'_>) -> ConflictResolution {
        self.0
    }
}
