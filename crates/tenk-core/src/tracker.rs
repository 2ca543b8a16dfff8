//! The tracker controller: owns all mutable state and exposes the user
//! operations.
//!
//! Callers persist after each mutating call by taking a [`Snapshot`]; the
//! tracker itself performs no I/O.

use chrono::{DateTime, Utc};

use crate::format::progress_percent;
use crate::ledger::CategoryLedger;
use crate::preferences::Preferences;
use crate::session::{Commit, Session};
use crate::snapshot::Snapshot;
use crate::types::{
    BackgroundAttachment, BackgroundFit, CategoryName, OverlayAlpha, ValidationError,
};

/// Live tracker state.
#[derive(Debug, Clone, PartialEq)]
pub struct Tracker {
    ledger: CategoryLedger,
    session: Session,
    current: CategoryName,
    preferences: Preferences,
}

impl Default for Tracker {
    fn default() -> Self {
        Self::from_snapshot(Snapshot::default())
    }
}

/// Read-only projection of the tracker for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerView {
    /// Category the display targets.
    pub current_category: CategoryName,
    /// Stored total of the displayed category, plus the live session if it
    /// is bound to that category.
    pub current_total: u64,
    /// Whole seconds in the running session, 0 when idle.
    pub session_seconds: u64,
    /// Category the running session will credit.
    pub session_category: Option<CategoryName>,
    /// Goal progress of `current_total`, in percent.
    pub progress_percent: f64,
    /// Stored totals of every category, in insertion order.
    pub totals: Vec<(CategoryName, u64)>,
}

impl Tracker {
    /// A fresh tracker with only `General`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a tracker from a loaded or imported snapshot.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let (ledger, session, current, preferences) = snapshot.into_parts();
        Self {
            ledger,
            session,
            current,
            preferences,
        }
    }

    /// Copies the current state for saving or exporting.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(
            self.ledger.clone(),
            self.session.clone(),
            self.current.clone(),
            self.preferences.clone(),
        )
    }

    pub const fn ledger(&self) -> &CategoryLedger {
        &self.ledger
    }

    pub const fn session(&self) -> &Session {
        &self.session
    }

    pub const fn current_category(&self) -> &CategoryName {
        &self.current
    }

    pub const fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Starts a session bound to the displayed category.
    ///
    /// Returns false if a session is already running.
    pub fn start(&mut self, now: DateTime<Utc>) -> bool {
        let started = self.session.start(self.current.clone(), now);
        if started {
            tracing::debug!(category = %self.current, "session started");
        }
        started
    }

    /// Stops the running session and credits its bound category.
    pub fn stop(&mut self, now: DateTime<Utc>) -> Option<Commit> {
        let commit = self.session.stop(now)?;
        self.ledger
            .add_seconds(&commit.category, i64::try_from(commit.seconds).unwrap_or(i64::MAX));
        tracing::info!(
            category = %commit.category,
            seconds = commit.seconds,
            "session committed"
        );
        Some(commit)
    }

    /// Clears all totals and any running session.
    ///
    /// Background and effect preferences are kept.
    pub fn reset(&mut self) {
        self.ledger.reset();
        self.session.reset();
        self.current = CategoryName::general();
        tracing::info!("tracker reset");
    }

    /// Credits `minutes` to the displayed category without a session.
    ///
    /// The amount is floored to whole seconds; negative and non-finite
    /// values add nothing. Returns the seconds credited.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "value is finite and floored before the cast"
    )]
    pub fn add_minutes(&mut self, minutes: f64) -> u64 {
        let secs = minutes * 60.0;
        if !secs.is_finite() || secs <= 0.0 {
            return 0;
        }
        let secs = secs.floor() as i64;
        self.ledger.add_seconds(&self.current, secs);
        u64::try_from(secs).unwrap_or(0)
    }

    /// Adds a new category and makes it the displayed one.
    pub fn add_category(&mut self, name: &str) -> Result<&CategoryName, ValidationError> {
        let name = self.ledger.add_category(name)?;
        self.current = name;
        Ok(&self.current)
    }

    /// Switches the displayed category.
    ///
    /// A running session keeps crediting the category it started with.
    pub fn select_category(&mut self, name: &str) -> Result<&CategoryName, ValidationError> {
        let Some(category) = self.ledger.get(name.trim()) else {
            return Err(ValidationError::UnknownCategory {
                name: name.to_string(),
            });
        };
        self.current = category.clone();
        Ok(&self.current)
    }

    /// Sets the overlay strength, clamped to \[0, 1\].
    pub const fn set_overlay_alpha(&mut self, alpha: f32) -> OverlayAlpha {
        let alpha = OverlayAlpha::clamped(alpha);
        self.preferences.set_overlay_alpha(alpha);
        alpha
    }

    /// Replaces the background image.
    pub fn set_background(&mut self, data_url: String) {
        self.preferences.set_background_data_url(Some(data_url));
    }

    pub fn clear_background(&mut self) {
        self.preferences.set_background_data_url(None);
    }

    pub const fn set_background_fit(&mut self, fit: BackgroundFit) {
        self.preferences.set_background_fit(fit);
    }

    pub const fn set_background_attachment(&mut self, attachment: BackgroundAttachment) {
        self.preferences.set_background_attachment(attachment);
    }

    /// Turns the decorative effects on or off. Turning them off unpauses.
    pub const fn set_effects_enabled(&mut self, enabled: bool) {
        self.preferences.set_effects_enabled(enabled);
    }

    /// Flips the animation pause flag, returning the new value.
    pub const fn toggle_animation_paused(&mut self) -> Result<bool, ValidationError> {
        if !self.preferences.effects_enabled() {
            return Err(ValidationError::EffectsDisabled);
        }
        let paused = !self.preferences.animation_paused();
        self.preferences.set_animation_paused(paused);
        Ok(paused)
    }

    /// Computes what the display shows at `now`. Never mutates.
    pub fn view(&self, now: DateTime<Utc>, goal_seconds: u64) -> TrackerView {
        let session_seconds = self.session.elapsed_seconds(now);
        let live = if self.session.bound_category() == Some(&self.current) {
            session_seconds
        } else {
            0
        };
        let current_total = self
            .ledger
            .total_of(self.current.as_str())
            .saturating_add(live);

        TrackerView {
            current_category: self.current.clone(),
            current_total,
            session_seconds,
            session_category: self.session.bound_category().cloned(),
            progress_percent: progress_percent(current_total, goal_seconds),
            totals: self
                .ledger
                .iter()
                .map(|(name, secs)| (name.clone(), secs))
                .collect(),
        }
    }
}
