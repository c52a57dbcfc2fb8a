//! FreeType font engine
//!
//! Implements the engine capability on top of freetype-rs. Faces are
//! reference counted by FreeType, so clones are cheap and the face is
//! destroyed when the last clone drops.

use anyhow::{anyhow, Result};
use freetype::face::StyleFlag;
use freetype::{Face, Library};
use log::info;
use std::path::Path;
use std::rc::Rc;

use super::engine::{FaceInfo, FontEngine};

pub struct FtEngine {
    library: Library,
}

impl FtEngine {
    pub fn new() -> Result<Self> {
        let library =
            Library::init().map_err(|e| anyhow!("FreeType initialization failed: {:?}", e))?;
        info!("FreeType initialized");
        Ok(Self { library })
    }
}

impl FontEngine for FtEngine {
    type Face = Face;

    fn face_from_file(&self, path: &Path, index: u32) -> Result<Face> {
        self.library
            .new_face(path, index as isize)
            .map_err(|e| anyhow!("FreeType font loading failed: {} ({:?})", path.display(), e))
    }

    fn face_from_memory(&self, data: Rc<Vec<u8>>, index: u32) -> Result<Face> {
        self.library
            .new_memory_face(data, index as isize)
            .map_err(|e| anyhow!("FreeType font loading failed: {:?}", e))
    }

    fn select_unicode_charmap(&self, face: &mut Face) -> bool {
        let err = unsafe {
            freetype::ffi::FT_Select_Charmap(face.raw_mut(), freetype::ffi::FT_ENCODING_UNICODE)
        };
        err == 0
    }

    fn set_pixel_size(&self, face: &mut Face, width: u32, height: u32) -> bool {
        face.set_pixel_sizes(width, height).is_ok()
    }

    fn has_glyph(&self, face: &Face, codepoint: u32) -> bool {
        face.get_char_index(codepoint as usize).is_some_and(|i| i != 0)
    }

    fn describe(&self, face: &Face) -> FaceInfo {
        let flags = face.style_flags();
        FaceInfo {
            family: face.family_name(),
            bold: flags.contains(StyleFlag::BOLD),
            italic: flags.contains(StyleFlag::ITALIC),
            face_count: face.raw().num_faces.max(0) as u32,
        }
    }
}
