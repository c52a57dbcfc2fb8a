//! fontconfig integration
//!
//! Family lookup and fallback enumeration over installed fonts

use anyhow::{anyhow, Result};
use fontconfig::Fontconfig;
use log::{debug, info, warn};
use std::collections::HashSet;
use std::path::PathBuf;
use std::process::Command;

use super::family::{FallbackList, Family, FontSource, Variant};
use super::platform::{FontPlatform, StaticFonts};
use crate::constants::MAX_SYSTEM_FALLBACKS;

/// Styles queried for every family, with their bold/italic flags
const STYLES: [(&str, bool, bool); 4] = [
    ("Regular", false, false),
    ("Bold", true, false),
    ("Italic", false, true),
    ("Bold Italic", true, true),
];

/// Search fonts using fontconfig
pub struct FontconfigPlatform {
    fc: Fontconfig,
    /// Answers for the default family names when fontconfig has no match
    fallback_map: StaticFonts,
}

impl FontconfigPlatform {
    /// Initialize fontconfig
    pub fn new(fallback_map: StaticFonts) -> Result<Self> {
        let fc = Fontconfig::new().ok_or_else(|| anyhow!("fontconfig initialization failed"))?;
        info!("fontconfig initialized");
        Ok(Self { fc, fallback_map })
    }

    /// Search by font name and style
    /// Verifies that the returned font actually matches the requested family name
    /// (fontconfig always returns the "closest" match, even if completely unrelated)
    /// Returns the file and the face index inside it
    fn find_font(&self, family: &str, style: &str) -> Option<(PathBuf, u32)> {
        let font = self.fc.find(family, Some(style))?;
        if names_match(family, &font.name) {
            return Some((font.path, face_index(font.index)));
        }
        debug!(
            "fontconfig: rejected false match for \"{}\" {}: got \"{}\"",
            family, style, font.name
        );
        None
    }
}

/// Face index inside a collection; fontconfig leaves it unset for single-face files
fn face_index(index: Option<i32>) -> u32 {
    index.and_then(|i| u32::try_from(i).ok()).unwrap_or(0)
}

/// Loose family name comparison (either contains the other, ignoring case)
fn names_match(requested: &str, got: &str) -> bool {
    let req = requested.to_ascii_lowercase();
    let got = got.to_ascii_lowercase();
    got.contains(&req) || req.contains(&got)
}

impl FontPlatform for FontconfigPlatform {
    fn family(&self, name: &str) -> Option<Family> {
        let mut family = Family::new(name);
        let mut seen = HashSet::new();

        for (style, bold, italic) in STYLES {
            let Some((path, index)) = self.find_font(name, style) else {
                continue;
            };
            // Missing styles resolve to a face we already have
            if seen.insert((path.clone(), index)) {
                family.add_variant(Variant::new(FontSource::File(path), index, bold, italic));
            }
        }

        if family.variants.is_empty() {
            return self.fallback_map.family(name);
        }
        Some(family)
    }

    /// Families sorted by fontconfig for `name` with `codepoint` in the charset.
    /// Uses `fc-match` command with charset query.
    fn fallbacks(&self, name: &str, codepoint: u32) -> Option<FallbackList> {
        let query = format!("{}:charset={:04X}", name, codepoint);
        let output = match Command::new("fc-match")
            .args(["-s", "-f", "%{family[0]}\n", &query])
            .output()
        {
            Ok(output) if output.status.success() => output,
            Ok(_) => return None,
            Err(e) => {
                warn!("fc-match failed: {}", e);
                return None;
            }
        };

        let text = String::from_utf8(output.stdout).ok()?;
        let list = parse_family_lines(&text);
        if list.is_empty() {
            return None;
        }
        debug!("fontconfig fallbacks for {} U+{:04X}: {} families", name, codepoint, list.len());
        Some(list)
    }
}

/// Unique, non-empty family names as unhydrated stubs, in output order
fn parse_family_lines(text: &str) -> FallbackList {
    let mut seen = HashSet::new();
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| seen.insert(line.to_lowercase()))
        .take(MAX_SYSTEM_FALLBACKS)
        .map(Family::stub)
        .collect()
}
