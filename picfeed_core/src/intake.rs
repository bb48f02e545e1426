//! Turning picked files into inline post images, plus the single preview
//! slot the creation form renders from.

use std::fs;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::IntakeError;

/// A decoded upload: the data URL stored on the post and the RGBA pixels
/// used for the on-screen preview.
#[derive(Clone)]
pub struct InlineImage {
    pub data_url: String,
    pub mime: String,
    pub size: [usize; 2],
    pub pixels: Vec<u8>,
}

impl std::fmt::Debug for InlineImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InlineImage")
            .field("mime", &self.mime)
            .field("size", &self.size)
            .field("data_url_len", &self.data_url.len())
            .finish()
    }
}

/// RGBA pixels ready to become a texture.
#[derive(Debug, Clone)]
pub struct DecodedPixels {
    pub size: [usize; 2],
    pub pixels: Vec<u8>,
}

pub fn read_upload(path: &Path) -> Result<InlineImage, IntakeError> {
    let bytes = fs::read(path)?;
    decode_upload(&bytes)
}

pub fn decode_upload(bytes: &[u8]) -> Result<InlineImage, IntakeError> {
    let mime = sniff_image_mime(bytes)?;
    let decoded = decode_pixels(bytes)?;
    Ok(InlineImage {
        data_url: to_data_url(&mime, bytes),
        mime,
        size: decoded.size,
        pixels: decoded.pixels,
    })
}

pub fn decode_pixels(bytes: &[u8]) -> Result<DecodedPixels, IntakeError> {
    let dyn_img = image::load_from_memory(bytes)?;
    let rgba = dyn_img.to_rgba8();
    let size = [dyn_img.width() as usize, dyn_img.height() as usize];
    Ok(DecodedPixels {
        size,
        pixels: rgba.into_raw(),
    })
}

fn sniff_image_mime(bytes: &[u8]) -> Result<String, IntakeError> {
    match infer::get(bytes) {
        Some(kind) if kind.matcher_type() == infer::MatcherType::Image => {
            Ok(kind.mime_type().to_string())
        }
        Some(kind) => Err(IntakeError::UnsupportedType(kind.mime_type().to_string())),
        None => Err(IntakeError::UnsupportedType("unknown".into())),
    }
}

pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Splits a base64 `data:` URL into its MIME type and payload. Anything else
/// yields `None`.
pub fn parse_data_url(url: &str) -> Option<(String, Vec<u8>)> {
    let rest = url.strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;
    let mime = header.strip_suffix(";base64")?;
    let bytes = STANDARD.decode(payload.trim()).ok()?;
    Some((mime.to_string(), bytes))
}

pub fn is_data_url(url: &str) -> bool {
    url.starts_with("data:")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

/// One pending request and at most one ready value.
///
/// `begin` supersedes whatever was in flight; only the newest ticket can
/// resolve the slot. The ready value stays until a newer one replaces it.
#[derive(Debug)]
pub struct PreviewSlot<T> {
    generation: u64,
    pending: Option<u64>,
    ready: Option<T>,
}

impl<T> Default for PreviewSlot<T> {
    fn default() -> Self {
        Self {
            generation: 0,
            pending: None,
            ready: None,
        }
    }
}

impl<T> PreviewSlot<T> {
    pub fn begin(&mut self) -> Ticket {
        self.generation += 1;
        self.pending = Some(self.generation);
        Ticket(self.generation)
    }

    /// Stores `value` if `ticket` is still current. Returns whether it was
    /// applied.
    pub fn resolve(&mut self, ticket: Ticket, value: T) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.pending = None;
        self.ready = Some(value);
        true
    }

    /// Marks the current request as failed. Any earlier ready value is kept.
    pub fn fail(&mut self, ticket: Ticket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.pending = None;
        true
    }

    pub fn clear(&mut self) {
        self.pending = None;
        self.ready = None;
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn ready(&self) -> Option<&T> {
        self.ready.as_ref()
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        self.pending == Some(ticket.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn tiny_png() -> Vec<u8> {
        let img = RgbaImage::from_pixel(2, 3, Rgba([255, 0, 0, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).expect("encode png");
        out.into_inner()
    }

    #[test]
    fn png_upload_becomes_data_url() {
        let bytes = tiny_png();
        let inline = decode_upload(&bytes).expect("decode");
        assert_eq!(inline.mime, "image/png");
        assert_eq!(inline.size, [2, 3]);
        assert_eq!(inline.pixels.len(), 2 * 3 * 4);
        assert!(inline.data_url.starts_with("data:image/png;base64,"));

        let (mime, payload) = parse_data_url(&inline.data_url).expect("parse");
        assert_eq!(mime, "image/png");
        assert_eq!(payload, bytes);
    }

    #[test]
    fn non_image_bytes_are_rejected() {
        let err = decode_upload(b"just some text").unwrap_err();
        assert!(matches!(err, IntakeError::UnsupportedType(_)));

        let pdf = b"%PDF-1.4\n%...";
        assert!(matches!(
            decode_upload(pdf).unwrap_err(),
            IntakeError::UnsupportedType(mime) if mime == "application/pdf"
        ));
    }

    #[test]
    fn truncated_image_fails_to_decode() {
        let bytes = tiny_png();
        let err = decode_upload(&bytes[..16]).unwrap_err();
        assert!(matches!(err, IntakeError::Decode(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_upload(Path::new("/definitely/not/here.png")).unwrap_err();
        assert!(matches!(err, IntakeError::Io(_)));
    }

    #[test]
    fn parse_data_url_rejects_plain_urls() {
        assert!(parse_data_url("https://example.test/a.png").is_none());
        assert!(parse_data_url("data:image/png,notbase64").is_none());
        assert!(!is_data_url("https://example.test/a.png"));
    }

    #[test]
    fn newer_request_supersedes_older() {
        let mut slot = PreviewSlot::default();
        let first = slot.begin();
        let second = slot.begin();
        assert!(!slot.resolve(first, "old"));
        assert!(slot.is_loading());
        assert!(slot.resolve(second, "new"));
        assert_eq!(slot.ready(), Some(&"new"));
        assert!(!slot.is_loading());
    }

    #[test]
    fn late_resolution_after_newer_one_is_dropped() {
        let mut slot = PreviewSlot::default();
        let first = slot.begin();
        let second = slot.begin();
        assert!(slot.resolve(second, 2));
        assert!(!slot.resolve(first, 1));
        assert_eq!(slot.ready(), Some(&2));
    }

    #[test]
    fn cleared_slot_ignores_in_flight_request() {
        let mut slot = PreviewSlot::default();
        let ticket = slot.begin();
        slot.clear();
        assert!(!slot.resolve(ticket, 1));
        assert_eq!(slot.ready(), None);
    }

    #[test]
    fn begin_keeps_ready_value_until_replaced() {
        let mut slot = PreviewSlot::default();
        let first = slot.begin();
        assert!(slot.resolve(first, "good"));
        let second = slot.begin();
        assert!(slot.is_loading());
        assert_eq!(slot.ready(), Some(&"good"));
        assert!(slot.fail(second));
        assert_eq!(slot.ready(), Some(&"good"));
    }

    #[test]
    fn failure_leaves_slot_empty() {
        let mut slot: PreviewSlot<u8> = PreviewSlot::default();
        let ticket = slot.begin();
        assert!(slot.fail(ticket));
        assert!(!slot.is_loading());
        assert_eq!(slot.ready(), None);
    }
}
