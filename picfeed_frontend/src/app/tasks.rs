use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::thread;

use eframe::egui::Context;
use log::{error, info};
use picfeed_core::intake::{self, DecodedPixels, Ticket};

use super::messages::AppMessage;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

fn send(tx: &Sender<AppMessage>, ctx: &Context, message: AppMessage, label: &str) {
    if tx.send(message).is_err() {
        error!("failed to send {label} message");
        return;
    }
    ctx.request_repaint();
}

pub fn pick_upload(tx: Sender<AppMessage>, ctx: Context) {
    thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", IMAGE_EXTENSIONS)
            .pick_file()
        {
            send(&tx, &ctx, AppMessage::UploadPicked(path), "UploadPicked");
        }
    });
}

pub fn decode_upload(tx: Sender<AppMessage>, ctx: Context, ticket: Ticket, path: PathBuf) {
    thread::spawn(move || {
        info!("decoding upload {}", path.display());
        let result = intake::read_upload(&path);
        send(&tx, &ctx, AppMessage::UploadDecoded { ticket, result }, "UploadDecoded");
    });
}

/// Decodes an inline `data:` URL locally or downloads a remote one.
pub fn load_image(tx: Sender<AppMessage>, ctx: Context, key: String, source: String) {
    thread::spawn(move || {
        let result = load_pixels(&source);
        send(&tx, &ctx, AppMessage::ImageLoaded { key, result }, "ImageLoaded");
    });
}

fn load_pixels(source: &str) -> Result<DecodedPixels, String> {
    let bytes = if intake::is_data_url(source) {
        let (_, bytes) =
            intake::parse_data_url(source).ok_or_else(|| "malformed inline image".to_string())?;
        bytes
    } else {
        info!("downloading image from {source}");
        crate::http::fetch_bytes(source).map_err(|err| format!("{err:#}"))?
    };
    intake::decode_pixels(&bytes).map_err(|err| err.to_string())
}
