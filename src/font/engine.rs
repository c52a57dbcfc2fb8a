//! Font engine capability
//!
//! The selector never touches a rendering library directly; it drives one
//! through this trait. Face handles are destroyed by dropping them.

use anyhow::Result;
use std::path::Path;
use std::rc::Rc;

/// Family name and style of a loaded face
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaceInfo {
    pub family: Option<String>,
    pub bold: bool,
    pub italic: bool,
    /// Number of faces in the face's source
    pub face_count: u32,
}

pub trait FontEngine {
    /// Loaded face handle; clones refer to the same face
    type Face: Clone;

    fn face_from_file(&self, path: &Path, index: u32) -> Result<Self::Face>;

    /// Create a face over shared bytes (the bytes are referenced, not copied)
    fn face_from_memory(&self, data: Rc<Vec<u8>>, index: u32) -> Result<Self::Face>;

    fn select_unicode_charmap(&self, face: &mut Self::Face) -> bool;

    fn set_pixel_size(&self, face: &mut Self::Face, width: u32, height: u32) -> bool;

    fn has_glyph(&self, face: &Self::Face, codepoint: u32) -> bool;

    fn describe(&self, face: &Self::Face) -> FaceInfo;
}
