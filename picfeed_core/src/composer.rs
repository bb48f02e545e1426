use tracing::{debug, warn};

use crate::error::IntakeError;
use crate::intake::{InlineImage, PreviewSlot, Ticket};
use crate::models::PostDraft;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerPhase {
    Idle,
    ModalOpen,
    PreviewLoading,
    PreviewReady,
}

/// Draft state behind the "new post" modal.
#[derive(Debug, Default)]
pub struct Composer {
    open: bool,
    pub caption: String,
    pub image_url: String,
    preview: PreviewSlot<InlineImage>,
    upload_error: Option<String>,
}

impl Composer {
    pub fn phase(&self) -> ComposerPhase {
        if !self.open {
            ComposerPhase::Idle
        } else if self.preview.is_loading() {
            ComposerPhase::PreviewLoading
        } else if self.preview.ready().is_some() {
            ComposerPhase::PreviewReady
        } else {
            ComposerPhase::ModalOpen
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Cancel or close: drops every draft field, including any upload still
    /// decoding.
    pub fn close(&mut self) {
        *self = Self {
            preview: std::mem::take(&mut self.preview),
            ..Self::default()
        };
        self.preview.clear();
    }

    /// Starts a new upload, superseding any previous one. The current
    /// preview stays visible until the new decode lands.
    pub fn begin_upload(&mut self) -> Ticket {
        self.upload_error = None;
        self.preview.begin()
    }

    /// Applies a finished decode. Stale tickets are ignored; returns whether
    /// the preview changed.
    pub fn finish_upload(&mut self, ticket: Ticket, result: Result<InlineImage, IntakeError>) -> bool {
        match result {
            Ok(image) => {
                let applied = self.preview.resolve(ticket, image);
                if applied {
                    debug!("upload preview ready");
                }
                applied
            }
            Err(err) => {
                let applied = self.preview.fail(ticket);
                if applied {
                    warn!(error = %err, "failed to decode upload");
                    self.upload_error = Some(err.to_string());
                }
                applied
            }
        }
    }

    pub fn preview(&self) -> Option<&InlineImage> {
        self.preview.ready()
    }

    pub fn upload_error(&self) -> Option<&str> {
        self.upload_error.as_deref()
    }

    /// Hands the draft over for creation and returns to `Idle`. A pending
    /// upload is abandoned; the last preview that finished is used.
    pub fn submit(&mut self) -> Option<PostDraft> {
        if !self.open {
            return None;
        }
        let draft = PostDraft {
            caption: std::mem::take(&mut self.caption),
            image_url: std::mem::take(&mut self.image_url),
            uploaded_image: self.preview.ready().map(|image| image.data_url.clone()),
        };
        self.close();
        Some(draft)
    }
}
