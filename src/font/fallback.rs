//! Coverage search over fallback lists
//!
//! A family covers a codepoint when one of its variants loads and reports a
//! glyph for it. Lists are searched strictly left to right; there is no
//! scoring at this level.

use log::debug;

use super::engine::FontEngine;
use super::face_cache::FaceCache;
use super::family::{Family, Variant};
use super::platform::FontPlatform;
use super::registry::FamilyRegistry;
use crate::style::TextStyle;

/// Borrowed view of the session state a coverage search needs
pub struct FallbackResolver<'a, E: FontEngine, P: FontPlatform + ?Sized> {
    pub registry: &'a mut FamilyRegistry,
    pub faces: &'a mut FaceCache<E>,
    pub platform: &'a P,
    /// Style faces are loaded at for probing
    pub probe_style: &'a TextStyle,
}

impl<'a, E: FontEngine, P: FontPlatform + ?Sized> FallbackResolver<'a, E, P> {
    pub fn variant_covers(&mut self, variant: &Variant, codepoint: u32) -> bool {
        match self
            .faces
            .acquire(&variant.source, variant.index, self.probe_style, self.platform)
        {
            Ok(face) => self.faces.engine().has_glyph(&face, codepoint),
            Err(_) => false,
        }
    }

    pub fn family_covers(&mut self, family: &Family, codepoint: u32) -> bool {
        family.variants.iter().any(|v| self.variant_covers(v, codepoint))
    }

    /// First stub in `stubs` covering `codepoint`
    ///
    /// Empty stubs are hydrated from the registry in place; a stub the
    /// registry knows nothing about is skipped. Hydration is not guarded
    /// against concurrent callers.
    pub fn search_fallbacks(&mut self, stubs: &mut [Family], codepoint: u32) -> Option<usize> {
        for (i, stub) in stubs.iter_mut().enumerate() {
            if !stub.is_hydrated() {
                match self.registry.get_family(&stub.name, self.platform) {
                    Some(family) => stub.variants = family.variants.clone(),
                    None => continue,
                }
            }

            if self.family_covers(stub, codepoint) {
                debug!("fallback \"{}\" covers U+{:04X}", stub.name, codepoint);
                return Some(i);
            }
        }
        None
    }

    /// Family in `list` named `name` (case-insensitive) that covers `codepoint`
    pub fn search_by_family_name(&mut self, list: &[Family], name: &str, codepoint: u32) -> Option<usize> {
        list.iter()
            .position(|f| f.matches_name(name) && f.is_hydrated() && self.family_covers(f, codepoint))
    }
}
