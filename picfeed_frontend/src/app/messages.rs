use std::path::PathBuf;

use log::{error, info};
use picfeed_core::error::IntakeError;
use picfeed_core::intake::{DecodedPixels, InlineImage, Ticket};

use super::tasks;
use super::PicfeedApp;

pub enum AppMessage {
    UploadPicked(PathBuf),
    UploadDecoded {
        ticket: Ticket,
        result: Result<InlineImage, IntakeError>,
    },
    ImageLoaded {
        key: String,
        result: Result<DecodedPixels, String>,
    },
}

pub(super) fn process_messages(app: &mut PicfeedApp) {
    while let Ok(message) = app.rx.try_recv() {
        match message {
            AppMessage::UploadPicked(path) => {
                if !app.composer.is_open() {
                    info!("ignoring upload picked after the composer closed");
                    continue;
                }
                let ticket = app.composer.begin_upload();
                tasks::decode_upload(app.tx.clone(), app.ctx.clone(), ticket, path);
            }
            AppMessage::UploadDecoded { ticket, result } => {
                if app.composer.finish_upload(ticket, result) {
                    app.preview_texture = None;
                }
            }
            AppMessage::ImageLoaded { key, result } => {
                if let Err(err) = &result {
                    error!("failed to load image {key}: {err}");
                }
                let next = app.images.finish(key, result);
                app.start_image_jobs(next);
            }
        }
    }
}
