//! Revert final posters to their cached originals.

use std::path::Path;

use tracing::{error, info};

use crate::images::PosterPaths;
use crate::scanner::media_dirs;

/// Copies every cached original back over its folder's `poster.jpg`.
///
/// Works on any directory with a cache, tagged or not, and never touches the
/// network.
pub struct RestoreManager<'a> {
    root: &'a Path,
}

impl<'a> RestoreManager<'a> {
    pub fn new(root: &'a Path) -> Self {
        Self { root }
    }

    /// Restore all folders and return how many posters were restored.
    pub fn restore_all(&self) -> usize {
        let mut restored = 0;

        for dir in media_dirs(self.root) {
            let paths = PosterPaths::for_folder(&dir);
            if !paths.has_cached_original() {
                continue;
            }

            match std::fs::copy(&paths.cache_file, &paths.final_file) {
                Ok(_) => {
                    info!(folder = %dir.display(), "Restored original poster");
                    restored += 1;
                }
                Err(e) => {
                    error!(folder = %dir.display(), error = %e, "Failed to restore poster");
                }
            }
        }

        restored
    }
}
