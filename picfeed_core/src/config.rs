use anyhow::{anyhow, Result};
use std::env;
use std::path::{Path, PathBuf};

use crate::store::DEFAULT_STORAGE_KEY;

pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "https://placehold.co/600x600?text=Picfeed";

#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub paths: FeedPaths,
    pub storage_key: String,
    pub placeholder_image: String,
}

impl FeedConfig {
    pub fn from_env() -> Result<Self> {
        let paths = match env::var("PICFEED_HOME") {
            Ok(raw) if !raw.trim().is_empty() => FeedPaths::from_base_dir(raw.trim())?,
            _ => FeedPaths::discover()?,
        };
        let storage_key = non_empty_var("PICFEED_STORAGE_KEY")
            .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string());
        let placeholder_image = non_empty_var("PICFEED_PLACEHOLDER_IMAGE")
            .unwrap_or_else(|| DEFAULT_PLACEHOLDER_IMAGE.to_string());
        Ok(Self {
            paths,
            storage_key,
            placeholder_image,
        })
    }

    pub fn new(paths: FeedPaths) -> Self {
        Self {
            paths,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

#[derive(Debug, Clone, Default)]
pub struct FeedPaths {
    pub base: PathBuf,
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
}

impl FeedPaths {
    /// `~/.picfeed`, or `./.picfeed` when no home directory is known.
    pub fn discover() -> Result<Self> {
        let base = match dirs::home_dir() {
            Some(home) => home.join(".picfeed"),
            None => env::current_dir()
                .map_err(|err| anyhow!("failed to resolve working directory: {err}"))?
                .join(".picfeed"),
        };
        Self::from_base_dir(base)
    }

    pub fn from_base_dir<P: AsRef<Path>>(base: P) -> Result<Self> {
        let base = base.as_ref().to_path_buf();
        let data_dir = base.join("data");
        let db_path = data_dir.join("picfeed.db");
        Ok(Self {
            base,
            data_dir,
            db_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn paths_hang_off_base_dir() {
        let dir = tempdir().expect("tempdir");
        let paths = FeedPaths::from_base_dir(dir.path()).expect("paths");
        assert_eq!(paths.data_dir, dir.path().join("data"));
        assert_eq!(paths.db_path, dir.path().join("data").join("picfeed.db"));
    }

    #[test]
    fn new_uses_defaults() {
        let config = FeedConfig::new(FeedPaths::default());
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.placeholder_image, DEFAULT_PLACEHOLDER_IMAGE);
    }
}
