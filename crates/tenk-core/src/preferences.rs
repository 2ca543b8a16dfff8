//! Display preferences persisted alongside the ledger.

use crate::types::{BackgroundAttachment, BackgroundFit, OverlayAlpha};

/// Background and effect settings.
///
/// The animation can only be paused while effects are enabled; turning
/// effects off clears the paused flag.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Preferences {
    background_data_url: Option<String>,
    overlay_alpha: OverlayAlpha,
    background_fit: BackgroundFit,
    background_attachment: BackgroundAttachment,
    effects_enabled: bool,
    animation_paused: bool,
}

impl Preferences {
    /// Embedded background image as a `data:` URL.
    pub fn background_data_url(&self) -> Option<&str> {
        self.background_data_url.as_deref()
    }

    pub const fn overlay_alpha(&self) -> OverlayAlpha {
        self.overlay_alpha
    }

    pub const fn background_fit(&self) -> BackgroundFit {
        self.background_fit
    }

    pub const fn background_attachment(&self) -> BackgroundAttachment {
        self.background_attachment
    }

    pub const fn effects_enabled(&self) -> bool {
        self.effects_enabled
    }

    pub const fn animation_paused(&self) -> bool {
        self.animation_paused
    }

    /// Sets or clears the background image. Empty URLs clear it.
    pub fn set_background_data_url(&mut self, data_url: Option<String>) {
        self.background_data_url = data_url.filter(|url| !url.is_empty());
    }

    pub const fn set_overlay_alpha(&mut self, alpha: OverlayAlpha) {
        self.overlay_alpha = alpha;
    }

    pub const fn set_background_fit(&mut self, fit: BackgroundFit) {
        self.background_fit = fit;
    }

    pub const fn set_background_attachment(&mut self, attachment: BackgroundAttachment) {
        self.background_attachment = attachment;
    }

    /// Turns the decorative effects on or off.
    pub const fn set_effects_enabled(&mut self, enabled: bool) {
        self.effects_enabled = enabled;
        if !enabled {
            self.animation_paused = false;
        }
    }

    /// Sets the paused flag. Ignored while effects are disabled.
    pub const fn set_animation_paused(&mut self, paused: bool) {
        self.animation_paused = paused && self.effects_enabled;
    }
}
