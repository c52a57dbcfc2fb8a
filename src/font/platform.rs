//! Platform font enumeration
//!
//! Family lookup is required; fallback enumeration and private streams are
//! optional and default to "not available".

use log::debug;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::family::{FallbackList, Family, FontSource, Variant};
use crate::constants::{
    DEFAULT_FAMILY, DEFAULT_FONT_FILE, DEFAULT_MONOSPACE_FAMILY, DEFAULT_MONOSPACE_FONT_FILE,
    SYSTEM_FONT_PATH,
};

pub trait FontPlatform {
    /// Look up an installed family; `None` when the platform has no such family
    fn family(&self, name: &str) -> Option<Family>;

    /// Ordered fallback families able to render `codepoint` for `name`
    fn fallbacks(&self, _name: &str, _codepoint: u32) -> Option<FallbackList> {
        None
    }

    /// Bytes behind a platform-private stream source
    fn font_stream(&self, _index: i64) -> Option<Rc<Vec<u8>>> {
        None
    }
}

/// Resolve a font file name against the font directory
///
/// Absolute names are kept as they are.
pub fn make_file_path(font_dir: &Path, filename: &str) -> PathBuf {
    let path = Path::new(filename);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        font_dir.join(path)
    }
}

/// Family map backed by two configured files
///
/// Knows only the default family and the default monospace family; used
/// when no system font enumeration is available.
#[derive(Debug, Clone)]
pub struct StaticFonts {
    font_dir: PathBuf,
    font_file: String,
    monospace_font_file: String,
}

impl Default for StaticFonts {
    fn default() -> Self {
        Self {
            font_dir: PathBuf::from(SYSTEM_FONT_PATH),
            font_file: DEFAULT_FONT_FILE.to_string(),
            monospace_font_file: DEFAULT_MONOSPACE_FONT_FILE.to_string(),
        }
    }
}

impl StaticFonts {
    pub fn new(font_dir: PathBuf, font_file: Option<String>, monospace_font_file: Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            font_dir,
            font_file: font_file.unwrap_or(defaults.font_file),
            monospace_font_file: monospace_font_file.unwrap_or(defaults.monospace_font_file),
        }
    }
}

impl FontPlatform for StaticFonts {
    fn family(&self, name: &str) -> Option<Family> {
        let file = if name.eq_ignore_ascii_case(DEFAULT_FAMILY) {
            &self.font_file
        } else if name.eq_ignore_ascii_case(DEFAULT_MONOSPACE_FAMILY) {
            &self.monospace_font_file
        } else {
            return None;
        };

        let path = make_file_path(&self.font_dir, file);
        debug!("static font map: {} -> {}", name, path.display());

        let mut family = Family::new(name);
        family.add_variant(Variant::new(FontSource::File(path), 0, false, false));
        Some(family)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_file_path() {
        let dir = Path::new("/usr/share/fonts");
        assert_eq!(
            make_file_path(dir, "truetype/a.ttf"),
            PathBuf::from("/usr/share/fonts/truetype/a.ttf")
        );
        assert_eq!(make_file_path(dir, "/opt/b.ttf"), PathBuf::from("/opt/b.ttf"));
    }

    #[test]
    fn test_static_map_knows_only_defaults() {
        let fonts = StaticFonts::new(PathBuf::from("/fonts"), Some("main.ttf".to_string()), None);

        let family = fonts.family("SERIF").expect("default family");
        assert_eq!(family.name, "serif");
        assert_eq!(family.variants.len(), 1);
        assert_eq!(
            family.variants[0].source,
            FontSource::File(PathBuf::from("/fonts/main.ttf"))
        );

        let mono = fonts.family("monospace").expect("monospace family");
        assert_eq!(
            mono.variants[0].source,
            FontSource::File(PathBuf::from("/fonts").join(DEFAULT_MONOSPACE_FONT_FILE))
        );

        assert!(fonts.family("Arial").is_none());
        assert!(fonts.fallbacks("Serif", 0x41).is_none());
    }
}
