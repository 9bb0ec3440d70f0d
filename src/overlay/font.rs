use std::path::Path;

use ab_glyph::FontArc;

use crate::error::FontError;

/// Loads the font used by the rendered rating badge.
pub trait FontLoader {
    fn load(&self, path: &Path) -> Result<FontArc, FontError>;
}

/// Reads a TrueType/OpenType file from disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileFontLoader;

impl FontLoader for FileFontLoader {
    fn load(&self, path: &Path) -> Result<FontArc, FontError> {
        let bytes = std::fs::read(path).map_err(|source| FontError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        FontArc::try_from_vec(bytes).map_err(|_| FontError::Invalid(path.to_path_buf()))
    }
}
