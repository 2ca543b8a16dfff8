//! Practice session state machine.
//!
//! A session binds its category when it starts. Switching the displayed
//! category while a session runs does not move the elapsed time: the commit
//! returned by [`Session::stop`] always credits the category bound at start.

use chrono::{DateTime, Utc};

use crate::types::CategoryName;

/// Tracking state for the current practice session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Session {
    /// No session in progress.
    #[default]
    Idle,
    /// A session is accumulating time for `category` since `started_at`.
    Running {
        started_at: DateTime<Utc>,
        category: CategoryName,
    },
}

/// Time to credit when a session ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Category bound when the session started.
    pub category: CategoryName,
    /// Whole elapsed seconds, never negative.
    pub seconds: u64,
}

impl Session {
    /// Starts a session bound to `category`.
    ///
    /// Returns false and leaves the running session untouched if one is
    /// already in progress.
    pub fn start(&mut self, category: CategoryName, now: DateTime<Utc>) -> bool {
        if self.is_running() {
            return false;
        }
        *self = Self::Running {
            started_at: now,
            category,
        };
        true
    }

    /// Whole seconds elapsed since the session started.
    ///
    /// Zero when idle, and zero rather than negative if the clock moved
    /// backwards.
    pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> u64 {
        match self {
            Self::Idle => 0,
            Self::Running { started_at, .. } => {
                let ms = (now - *started_at).num_milliseconds().max(0);
                u64::try_from(ms / 1000).unwrap_or(0)
            }
        }
    }

    /// Ends the session and returns what to credit.
    ///
    /// Returns `None` without changing state when idle.
    pub fn stop(&mut self, now: DateTime<Utc>) -> Option<Commit> {
        let seconds = self.elapsed_seconds(now);
        match std::mem::take(self) {
            Self::Idle => None,
            Self::Running { category, .. } => Some(Commit { category, seconds }),
        }
    }

    /// Forces the idle state, discarding any in-flight time.
    pub fn reset(&mut self) {
        *self = Self::Idle;
    }

    /// Returns true while a session is in progress.
    pub const fn is_running(&self) -> bool {
        matches!(self, Self::Running { .. })
    }

    /// Category the running session will credit.
    pub const fn bound_category(&self) -> Option<&CategoryName> {
        match self {
            Self::Idle => None,
            Self::Running { category, .. } => Some(category),
        }
    }

    /// When the running session started.
    pub const fn started_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Idle => None,
            Self::Running { started_at, .. } => Some(*started_at),
        }
    }
}
