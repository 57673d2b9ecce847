//! Filesystem change notifications

use std::time::Instant;

/// "Something under the watched tree changed."
///
/// Carries no path: every change leads to a full-tree sync, so create,
/// modify, delete and rename all collapse into this one signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeEvent {
    pub at: Instant,
}

impl ChangeEvent {
    pub fn now() -> Self {
        Self { at: Instant::now() }
    }

    pub fn at(at: Instant) -> Self {
        Self { at }
    }
}
