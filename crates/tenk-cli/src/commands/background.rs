//! Background image and overlay settings.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use base64::{Engine as _, engine::general_purpose};
use tenk_core::{BackgroundAttachment, BackgroundFit};
use tenk_store::Store;

use super::util::{load_tracker, update};

pub fn show<W: Write>(writer: &mut W, store: &Store) -> Result<()> {
    let tracker = load_tracker(store)?;
    let prefs = tracker.preferences();
    let image = prefs
        .background_data_url()
        .map_or_else(|| "none".to_string(), describe_data_url);
    writeln!(writer, "Image:      {image}")?;
    writeln!(
        writer,
        "Fit:        {} (background-size: {})",
        prefs.background_fit(),
        prefs.background_fit().css_size()
    )?;
    writeln!(writer, "Attachment: {}", prefs.background_attachment())?;
    writeln!(writer, "Overlay:    {}", prefs.overlay_alpha())?;
    Ok(())
}

/// Embeds the image at `path` as the background.
pub fn set<W: Write>(writer: &mut W, store: &Store, path: &Path) -> Result<()> {
    let data_url = image_data_url(path)?;
    let size = data_url.len();
    update(store, |tracker| {
        tracker.set_background(data_url);
        Ok(())
    })?;
    tracing::debug!(path = %path.display(), size, "stored background image");
    writeln!(writer, "Background set from {}", path.display())?;
    Ok(())
}

pub fn clear<W: Write>(writer: &mut W, store: &Store) -> Result<()> {
    update(store, |tracker| {
        tracker.clear_background();
        Ok(())
    })?;
    writeln!(writer, "Background cleared")?;
    Ok(())
}

pub fn fit<W: Write>(writer: &mut W, store: &Store, fit: BackgroundFit) -> Result<()> {
    update(store, |tracker| {
        tracker.set_background_fit(fit);
        Ok(())
    })?;
    writeln!(writer, "Background fit: {fit}")?;
    Ok(())
}

pub fn attachment<W: Write>(
    writer: &mut W,
    store: &Store,
    attachment: BackgroundAttachment,
) -> Result<()> {
    update(store, |tracker| {
        tracker.set_background_attachment(attachment);
        Ok(())
    })?;
    writeln!(writer, "Background attachment: {attachment}")?;
    Ok(())
}

pub fn overlay<W: Write>(writer: &mut W, store: &Store, alpha: f32) -> Result<()> {
    let applied = update(store, |tracker| Ok(tracker.set_overlay_alpha(alpha)))?;
    writeln!(writer, "Overlay strength: {applied}")?;
    Ok(())
}

/// Reads an image file into a `data:` URL.
fn image_data_url(path: &Path) -> Result<String> {
    let mime = image_mime(path).with_context(|| {
        format!(
            "unsupported image type: {} (expected png, jpg, gif, webp, svg or bmp)",
            path.display()
        )
    })?;
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let encoded = general_purpose::STANDARD.encode(bytes);
    Ok(format!("data:{mime};base64,{encoded}"))
}

/// Guesses the MIME type from the file extension.
fn image_mime(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}

/// Short description of a data URL: its media type and payload size.
fn describe_data_url(url: &str) -> String {
    let media_type = url
        .strip_prefix("data:")
        .and_then(|rest| rest.split([';', ',']).next())
        .filter(|media| !media.is_empty())
        .unwrap_or("unknown");
    format!("{media_type} ({} bytes encoded)", url.len())
}
