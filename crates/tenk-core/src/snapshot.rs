//! Serializable copies of the tracker state and the schema migration.
//!
//! # Payload layout
//!
//! The JSON payload keeps the field names of the first browser version so
//! old saves and exports stay readable:
//!
//! ```text
//! { totalSeconds, running, sessionStart, techTotals, currentTech,
//!   sessionTech, backgroundDataUrl, meteorEnabled, animationPaused,
//!   overlayAlpha, bgFit, bgAttachment }
//! ```
//!
//! `totalSeconds` is always written as the sum of `techTotals`. Payloads
//! written before categories existed carry only `totalSeconds`; they are
//! migrated into a single `General` category when decoded.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ledger::CategoryLedger;
use crate::preferences::Preferences;
use crate::session::Session;
use crate::types::{BackgroundAttachment, BackgroundFit, CategoryName, OverlayAlpha};

/// A full copy of ledger, session, display pointer and preferences.
///
/// Taken at save/export time; it never aliases live tracker state.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    ledger: CategoryLedger,
    session: Session,
    current_category: CategoryName,
    preferences: Preferences,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            ledger: CategoryLedger::new(),
            session: Session::Idle,
            current_category: CategoryName::general(),
            preferences: Preferences::default(),
        }
    }
}

impl Snapshot {
    /// Assembles a snapshot, making sure the current category is tracked.
    pub fn new(
        mut ledger: CategoryLedger,
        session: Session,
        current_category: CategoryName,
        preferences: Preferences,
    ) -> Self {
        ledger.ensure_category(&current_category);
        Self {
            ledger,
            session,
            current_category,
            preferences,
        }
    }

    pub const fn ledger(&self) -> &CategoryLedger {
        &self.ledger
    }

    pub const fn session(&self) -> &Session {
        &self.session
    }

    pub const fn current_category(&self) -> &CategoryName {
        &self.current_category
    }

    pub const fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Derived legacy single total.
    pub fn legacy_total(&self) -> u64 {
        self.ledger.legacy_total()
    }

    /// Splits the snapshot into its owned parts.
    pub fn into_parts(self) -> (CategoryLedger, Session, CategoryName, Preferences) {
        (
            self.ledger,
            self.session,
            self.current_category,
            self.preferences,
        )
    }
}

/// Serializes a snapshot into the compact persisted form.
pub fn encode(snapshot: &Snapshot) -> Result<String, serde_json::Error> {
    serde_json::to_string(&StoredState::from(snapshot))
}

/// Parses a persisted or exported payload, migrating legacy layouts.
pub fn decode(bytes: &[u8]) -> Result<Snapshot, serde_json::Error> {
    let raw: RawPayload = serde_json::from_slice(bytes)?;
    Ok(raw.into_snapshot())
}

/// Wire form written by this version.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StoredState<'a> {
    total_seconds: u64,
    running: bool,
    session_start: Option<i64>,
    tech_totals: IndexMap<&'a str, u64>,
    current_tech: &'a str,
    session_tech: Option<&'a str>,
    background_data_url: Option<&'a str>,
    meteor_enabled: bool,
    animation_paused: bool,
    overlay_alpha: OverlayAlpha,
    bg_fit: BackgroundFit,
    bg_attachment: BackgroundAttachment,
}

impl<'a> From<&'a Snapshot> for StoredState<'a> {
    fn from(snapshot: &'a Snapshot) -> Self {
        let prefs = &snapshot.preferences;
        Self {
            total_seconds: snapshot.legacy_total(),
            running: snapshot.session.is_running(),
            session_start: snapshot
                .session
                .started_at()
                .map(|started| started.timestamp_millis()),
            tech_totals: snapshot
                .ledger
                .iter()
                .map(|(name, secs)| (name.as_str(), secs))
                .collect(),
            current_tech: snapshot.current_category.as_str(),
            session_tech: snapshot.session.bound_category().map(CategoryName::as_str),
            background_data_url: prefs.background_data_url(),
            meteor_enabled: prefs.effects_enabled(),
            animation_paused: prefs.animation_paused(),
            overlay_alpha: prefs.overlay_alpha(),
            bg_fit: prefs.background_fit(),
            bg_attachment: prefs.background_attachment(),
        }
    }
}

/// Payload as found on disk or in an import file, before migration.
///
/// Every field is optional and loosely typed: older versions omitted most
/// of them, and a field of the wrong type is coerced rather than rejected.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawPayload {
    total_seconds: Option<Value>,
    running: Option<Value>,
    session_start: Option<Value>,
    tech_totals: Option<Value>,
    current_tech: Option<Value>,
    session_tech: Option<Value>,
    background_data_url: Option<Value>,
    meteor_enabled: Option<Value>,
    animation_paused: Option<Value>,
    overlay_alpha: Option<Value>,
    bg_fit: Option<Value>,
    bg_attachment: Option<Value>,
}

/// Category layout of a decoded payload.
#[derive(Debug, PartialEq, Eq)]
enum Payload {
    /// Per-category totals.
    Current(IndexMap<CategoryName, u64>),
    /// A single total from before categories existed.
    Legacy { total_seconds: u64 },
}

impl RawPayload {
    fn payload(&self) -> Payload {
        if let Some(Value::Object(map)) = &self.tech_totals {
            let mut totals = IndexMap::new();
            for (name, value) in map {
                let Ok(category) = CategoryName::new(name.as_str()) else {
                    tracing::warn!(name, "dropping category with empty name");
                    continue;
                };
                let Some(secs) = seconds_from_value(value) else {
                    tracing::warn!(category = %category, %value, "dropping category with invalid total");
                    continue;
                };
                totals.insert(category, secs);
            }
            if !totals.is_empty() {
                return Payload::Current(totals);
            }
        }

        Payload::Legacy {
            total_seconds: self
                .total_seconds
                .as_ref()
                .and_then(seconds_from_value)
                .unwrap_or(0),
        }
    }

    fn into_snapshot(self) -> Snapshot {
        let ledger = match self.payload() {
            Payload::Current(totals) => CategoryLedger::from_totals(totals),
            Payload::Legacy { total_seconds } => {
                tracing::debug!(total_seconds, "migrating legacy single-total payload");
                CategoryLedger::from_totals(IndexMap::from([(
                    CategoryName::general(),
                    total_seconds,
                )]))
            }
        };

        let current_category = category_from_value(self.current_tech.as_ref())
            .or_else(|| ledger.first().cloned())
            .unwrap_or_else(CategoryName::general);

        let session_start = self.session_start.as_ref().and_then(millis_from_value);
        let session = match (is_truthy(self.running.as_ref()), session_start) {
            (true, Some(ms)) => match DateTime::<Utc>::from_timestamp_millis(ms) {
                Some(started_at) => Session::Running {
                    started_at,
                    category: category_from_value(self.session_tech.as_ref())
                        .unwrap_or_else(|| current_category.clone()),
                },
                None => {
                    tracing::warn!(session_start = ms, "dropping session with invalid start time");
                    Session::Idle
                }
            },
            _ => Session::Idle,
        };

        let mut preferences = Preferences::default();
        preferences.set_background_data_url(
            string_from_value(self.background_data_url.as_ref()).map(str::to_owned),
        );
        if let Some(value) = &self.overlay_alpha {
            match alpha_from_value(value) {
                Some(alpha) => preferences.set_overlay_alpha(alpha),
                None => tracing::warn!(%value, "using default overlay alpha"),
            }
        }
        if let Some(fit) = string_from_value(self.bg_fit.as_ref()) {
            match fit.parse() {
                Ok(fit) => preferences.set_background_fit(fit),
                Err(e) => tracing::warn!(error = %e, "using default background fit"),
            }
        }
        if let Some(attachment) = string_from_value(self.bg_attachment.as_ref()) {
            match attachment.parse() {
                Ok(attachment) => preferences.set_background_attachment(attachment),
                Err(e) => tracing::warn!(error = %e, "using default background attachment"),
            }
        }
        preferences.set_effects_enabled(is_truthy(self.meteor_enabled.as_ref()));
        preferences.set_animation_paused(is_truthy(self.animation_paused.as_ref()));

        Snapshot::new(ledger, session, current_category, preferences)
    }
}

/// Truthiness as the browser version saw it.
///
/// Missing, `null`, `false`, zero, NaN and the empty string are false;
/// everything else, including empty arrays and objects, is true.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

/// A string field; any other type counts as absent.
fn string_from_value(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

fn category_from_value(value: Option<&Value>) -> Option<CategoryName> {
    string_from_value(value).and_then(|name| CategoryName::new(name).ok())
}

/// A number or numeric string, if finite.
fn number_from_value(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Reads a second count the way the browser version coerced numbers.
///
/// Numbers and numeric strings are floored and clamped at zero; anything
/// else is rejected.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is finite, floored and clamped to zero before the cast"
)]
fn seconds_from_value(value: &Value) -> Option<u64> {
    if let Some(secs) = value.as_u64() {
        return Some(secs);
    }
    number_from_value(value).map(|secs| secs.max(0.0).floor() as u64)
}

/// Overlay strength from a JSON number, clamped into range. Strings and
/// other types are rejected.
#[expect(
    clippy::cast_possible_truncation,
    reason = "alpha is clamped to 0..=1 after the cast"
)]
fn alpha_from_value(value: &Value) -> Option<OverlayAlpha> {
    value
        .as_f64()
        .map(|alpha| OverlayAlpha::clamped(alpha as f32))
}

/// Reads an epoch-millisecond timestamp. Zero counts as unset.
#[expect(
    clippy::cast_possible_truncation,
    reason = "out-of-range values saturate and are rejected by chrono"
)]
fn millis_from_value(value: &Value) -> Option<i64> {
    let ms = match value.as_i64() {
        Some(ms) => ms,
        None => number_from_value(value)?.floor() as i64,
    };
    (ms != 0).then_some(ms)
}
