//! Media library scanner.
//!
//! Walks the media root and finds movie folders tagged with a TMDB ID.

pub mod identifier;

use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::images::CACHE_DIR_NAME;

pub use identifier::parse_tmdb_id;

/// A movie folder found by a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieFolder {
    pub path: PathBuf,
    pub tmdb_id: u64,
}

impl MovieFolder {
    pub fn new(path: impl Into<PathBuf>, tmdb_id: u64) -> Self {
        Self {
            path: path.into(),
            tmdb_id,
        }
    }

    /// The folder's own name, for log output.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Finds movie folders under a media root.
pub struct DirectoryScanner<'a> {
    root: &'a Path,
}

impl<'a> DirectoryScanner<'a> {
    pub fn new(root: &'a Path) -> Self {
        Self { root }
    }

    /// Every directory under the root whose name carries a TMDB ID tag.
    ///
    /// Folders named like the cache folder are never candidates themselves,
    /// but tagged folders below them still are. The result is sorted by path.
    pub fn scan(&self) -> Vec<MovieFolder> {
        let mut folders: Vec<MovieFolder> = media_dirs(self.root)
            .filter_map(|path| {
                let name = path.file_name()?.to_string_lossy();
                let tmdb_id = parse_tmdb_id(&name)?;
                debug!(folder = %path.display(), tmdb_id, "Matched movie folder");
                Some(MovieFolder::new(path, tmdb_id))
            })
            .collect();

        folders.sort_by(|a, b| a.path.cmp(&b.path));
        folders
    }
}

/// Returns `true` for the reserved cache folder name, compared case-insensitively.
pub fn is_cache_dir_name(name: &str) -> bool {
    name.eq_ignore_ascii_case(CACHE_DIR_NAME)
}

fn is_cache_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(is_cache_dir_name)
}

/// All directories below `root` (not `root` itself), except those named like
/// the cache folder.
pub fn media_dirs(root: &Path) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(root)
        .min_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|e| e.file_type().is_dir() && !is_cache_dir(e))
        .map(DirEntry::into_path)
}
