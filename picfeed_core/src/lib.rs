//! Post collection, persistence and upload handling for Picfeed. Nothing in
//! here touches the UI.

pub mod composer;
pub mod config;
pub mod error;
pub mod feed;
pub mod intake;
pub mod models;
pub mod seed;
pub mod storage;
pub mod store;
pub mod telemetry;

use tracing::warn;

pub use config::{FeedConfig, FeedPaths};
pub use feed::{Confirm, Feed};
pub use models::{Comment, Post, PostDraft};
pub use store::FeedStore;

/// Opens the sqlite sink described by `config` and hydrates a store from it.
/// When the database cannot be opened the store runs on an in-memory sink,
/// starting from the seed posts.
pub fn open_store(config: &FeedConfig) -> FeedStore {
    let sink: Box<dyn storage::PersistenceSink> =
        match storage::SqliteSink::open(&config.paths.db_path) {
            Ok(sink) => Box::new(sink),
            Err(err) => {
                warn!(
                    error = %err,
                    db = %config.paths.db_path.display(),
                    "failed to open feed database, changes will not be saved"
                );
                Box::new(storage::MemorySink::new())
            }
        };
    FeedStore::load(
        sink,
        config.storage_key.clone(),
        config.placeholder_image.clone(),
    )
}
