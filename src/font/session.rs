//! Per-filter font session
//!
//! Owns everything font resolution mutates: the family registry, the
//! fallback lists, the face cache and the anonymous family counter. One
//! session belongs to one rendering pipeline; nothing here is shared
//! across threads and everything is torn down together on drop.

use log::{debug, info, warn};
use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

use super::engine::FontEngine;
use super::face_cache::FaceCache;
use super::family::{FallbackList, Family, FontSource, Variant};
use super::platform::FontPlatform;
use super::registry::FamilyRegistry;
use crate::config::Config;
use crate::constants::{ANONYMOUS_FAMILY_PREFIX, DEFAULT_FALLBACKS, DEFAULT_FAMILY, DEFAULT_MONOSPACE_FAMILY};
use crate::style::{RenderTarget, TextStyle};

/// MIME types accepted as font attachments
const FONT_MIME_TYPES: &[&str] = &[
    "application/x-truetype-font",
    "application/x-font-otf",
    "application/x-font-ttf",
    "application/vnd.ms-opentype",
    "application/font-sfnt",
    "font/ttf",
    "font/otf",
    "font/sfnt",
    "font/collection",
];

/// File extensions accepted as font attachments
const FONT_EXTENSIONS: &[&str] = &["ttf", "otf", "ttc", "otc"];

/// Host document attachment
#[derive(Debug, Clone)]
pub struct Attachment {
    pub name: String,
    pub mime: String,
    /// Owned by the host; the session only keeps references
    pub data: Rc<Vec<u8>>,
}

impl Attachment {
    pub fn new(name: &str, mime: &str, data: Rc<Vec<u8>>) -> Self {
        Self {
            name: name.to_string(),
            mime: mime.to_string(),
            data,
        }
    }

    pub fn is_font(&self) -> bool {
        if FONT_MIME_TYPES.iter().any(|m| self.mime.eq_ignore_ascii_case(m)) {
            return true;
        }
        Path::new(&self.name)
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| FONT_EXTENSIONS.iter().any(|f| ext.eq_ignore_ascii_case(f)))
    }
}

/// Session settings
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Default family spec, also the last-resort family
    pub family: String,
    pub monospace_family: String,
    /// Static default fallback list
    pub fallbacks: Vec<String>,
    /// Style faces are probed with during coverage searches
    pub default_style: TextStyle,
    pub target: RenderTarget,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            family: DEFAULT_FAMILY.to_string(),
            monospace_family: DEFAULT_MONOSPACE_FAMILY.to_string(),
            fallbacks: DEFAULT_FALLBACKS.iter().map(|s| s.to_string()).collect(),
            default_style: TextStyle::default(),
            target: RenderTarget::default(),
        }
    }
}

impl From<&Config> for SessionOptions {
    fn from(config: &Config) -> Self {
        let font = &config.font;
        Self {
            family: font.family.clone(),
            monospace_family: font.monospace_family.clone(),
            fallbacks: font.fallbacks.clone(),
            default_style: TextStyle {
                font_size: font.size,
                relative_size: font.relative_size,
                family: Some(font.family.clone()),
                monospace_family: Some(font.monospace_family.clone()),
                ..Default::default()
            },
            target: RenderTarget {
                frame_height: config.target.frame_height,
                zoom_percent: font.scale,
            },
        }
    }
}

pub struct FontSession<E: FontEngine, P: FontPlatform> {
    pub(super) platform: P,
    pub(super) registry: FamilyRegistry,
    pub(super) faces: FaceCache<E>,
    /// Families found in font attachments, if the host supplied any
    pub(super) attachment_fallbacks: Option<FallbackList>,
    /// Platform fallback lists keyed by (case-folded name, codepoint)
    pub(super) system_fallbacks: HashMap<(String, u32), FallbackList>,
    pub(super) default_fallbacks: FallbackList,
    pub(super) default_style: TextStyle,
    pub(super) family: String,
    pub(super) monospace_family: String,
    anonymous_families: u32,
}

impl<E: FontEngine, P: FontPlatform> FontSession<E, P> {
    pub fn new(engine: E, platform: P, options: SessionOptions) -> Self {
        let default_fallbacks = options.fallbacks.iter().map(|n| Family::stub(n)).collect();
        info!(
            "font session: family \"{}\", monospace \"{}\", {} default fallbacks",
            options.family,
            options.monospace_family,
            options.fallbacks.len()
        );

        let mut default_style = options.default_style;
        default_style.flags = Default::default();

        Self {
            platform,
            registry: FamilyRegistry::new(),
            faces: FaceCache::new(engine, options.target),
            attachment_fallbacks: None,
            system_fallbacks: HashMap::new(),
            default_fallbacks,
            default_style,
            family: options.family,
            monospace_family: options.monospace_family,
            anonymous_families: 0,
        }
    }

    pub fn engine(&self) -> &E {
        self.faces.engine()
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn registry(&self) -> &FamilyRegistry {
        &self.registry
    }

    pub fn face_cache(&self) -> &FaceCache<E> {
        &self.faces
    }

    pub fn attachment_families(&self) -> &[Family] {
        self.attachment_fallbacks.as_deref().unwrap_or(&[])
    }

    pub(super) fn family_spec_for<'s>(&'s self, style: &'s TextStyle) -> &'s str {
        match style.family_spec() {
            Some(spec) => spec,
            None if style.flags.contains(crate::style::StyleFlags::MONOSPACED) => self.monospace_family.as_str(),
            None => self.family.as_str(),
        }
    }

    /// Name for a family that has none
    fn anonymous_family_name(&mut self) -> String {
        let name = format!("{}-{:04}", ANONYMOUS_FAMILY_PREFIX, self.anonymous_families);
        self.anonymous_families += 1;
        name
    }

    /// Index the font attachments and build the attachment fallback list
    ///
    /// Every face of every font attachment becomes a variant of the family
    /// named in the face. Returns the number of faces added.
    pub fn load_attachments(&mut self, attachments: &[Attachment]) -> usize {
        let mut loaded = 0;

        for attachment in attachments.iter().filter(|a| a.is_font()) {
            let index = self.faces.add_attachment(Rc::clone(&attachment.data));
            let source = FontSource::Attachment(index as i64);

            let mut face_index = 0;
            loop {
                let info = match self
                    .faces
                    .engine()
                    .face_from_memory(Rc::clone(&attachment.data), face_index)
                {
                    Ok(face) => self.faces.engine().describe(&face),
                    Err(e) => {
                        if face_index == 0 {
                            warn!("attachment {}: not a usable font ({})", attachment.name, e);
                        }
                        break;
                    }
                };

                let name = match info.family.as_deref().filter(|n| !n.is_empty()) {
                    Some(name) => name.to_string(),
                    None => self.anonymous_family_name(),
                };

                let list = self.attachment_fallbacks.get_or_insert_with(Vec::new);
                let pos = match list.iter().position(|f| f.matches_name(&name)) {
                    Some(pos) => pos,
                    None => {
                        list.push(Family::new(&name));
                        list.len() - 1
                    }
                };
                list[pos].add_variant(Variant::new(source.clone(), face_index, info.bold, info.italic));

                loaded += 1;
                face_index += 1;
                if face_index >= info.face_count {
                    break;
                }
            }
        }

        info!(
            "font attachments: {} faces in {} families",
            loaded,
            self.attachment_families().len()
        );
        loaded
    }

    /// Log every known family and fallback list at debug level
    pub fn dump_families(&self) {
        debug!("registry:");
        for family in self.registry.iter() {
            dump_family(family);
        }
        if let Some(list) = &self.attachment_fallbacks {
            debug!("attachments:");
            list.iter().for_each(dump_family);
        }
        for ((name, codepoint), list) in &self.system_fallbacks {
            debug!("fallbacks for {} U+{:04X}:", name, codepoint);
            list.iter().for_each(dump_family);
        }
        debug!("default list:");
        self.default_fallbacks.iter().for_each(dump_family);
    }
}

fn dump_family(family: &Family) {
    debug!("\t{}", family.name);
    for variant in &family.variants {
        debug!(
            "\t\t({}): {} - {}",
            variant.style_name(),
            variant.source,
            variant.index
        );
    }
}
