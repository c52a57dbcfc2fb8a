//! Face selection
//!
//! Turns a family spec, a style and an optional codepoint into a loaded
//! face. The coverage search walks four tiers in order:
//! 1. requested names (attachments first, then installed families)
//! 2. any attachment family
//! 3. platform fallbacks for each requested name
//! 4. the static default list
//!
//! The chosen family's variants are then scored against the request.

use log::{debug, warn};
use std::rc::Rc;

use super::engine::FontEngine;
use super::fallback::FallbackResolver;
use super::family::{Family, Variant};
use super::platform::FontPlatform;
use super::session::FontSession;
use crate::constants::DEFAULT_FAMILY;
use crate::error::{FontError, FontResult};
use crate::style::TextStyle;

const SCORE_COVERAGE: u32 = 1000;
const SCORE_BOLD: u32 = 100;
const SCORE_ITALIC: u32 = 10;

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Split a comma separated family spec into names
///
/// Each piece is trimmed of spaces and tabs and loses one layer of double
/// quotes; empty pieces are dropped.
pub fn parse_family_spec(spec: &str) -> Vec<String> {
    spec.split(',')
        .filter_map(|piece| {
            let mut name = piece.trim_matches(is_blank);
            if name.starts_with('"') && name.ends_with('"') {
                name = name.get(1..name.len().saturating_sub(1)).unwrap_or("");
            }
            (!name.is_empty()).then(|| name.to_string())
        })
        .collect()
}

/// Score of `variant` for the request; higher is better
fn score_variant<E: FontEngine, P: FontPlatform + ?Sized>(
    resolver: &mut FallbackResolver<'_, E, P>,
    variant: &Variant,
    bold: bool,
    italic: bool,
    codepoint: u32,
) -> u32 {
    let mut score = 0;
    if codepoint != 0 && resolver.variant_covers(variant, codepoint) {
        score += SCORE_COVERAGE;
    }
    if variant.bold == bold {
        score += SCORE_BOLD;
    }
    if variant.italic == italic {
        score += SCORE_ITALIC;
    }
    score
}

/// Best variant of `family`
///
/// Scans in order and only replaces the winner on a strictly higher score,
/// so ties keep the earlier variant and the first variant wins by default.
pub fn best_variant<E: FontEngine, P: FontPlatform + ?Sized>(
    resolver: &mut FallbackResolver<'_, E, P>,
    family: &Family,
    bold: bool,
    italic: bool,
    codepoint: u32,
) -> Option<Rc<Variant>> {
    let mut best = family.variants.first()?;
    let mut best_score = 0;

    for variant in &family.variants {
        let score = score_variant(resolver, variant, bold, italic, codepoint);
        if score > best_score {
            best = variant;
            best_score = score;
        }
    }

    Some(Rc::clone(best))
}

impl<E: FontEngine, P: FontPlatform> FontSession<E, P> {
    /// Select and load the face for `style` able to render `codepoint`
    ///
    /// `codepoint == 0` skips the coverage search. The family spec is the
    /// style's own, or the session default when the style carries none.
    pub fn select_face(&mut self, style: &TextStyle, codepoint: u32) -> FontResult<E::Face> {
        let spec = self.family_spec_for(style).to_string();
        self.select_face_for_spec(&spec, style, codepoint)
    }

    /// Select and load a face for an explicit family spec
    pub fn select_face_for_spec(&mut self, spec: &str, style: &TextStyle, codepoint: u32) -> FontResult<E::Face> {
        let names = parse_family_spec(spec);
        if names.is_empty() {
            warn!("SelectAndLoadFace: empty family spec \"{}\"", spec);
            return Err(FontError::NoFamilySpecified);
        }

        let family = if codepoint != 0 {
            match self.find_covering_family(&names, codepoint) {
                Some(family) => Some(family),
                None => {
                    warn!(
                        "SelectAndLoadFace: no font found for family: {}, codepoint: 0x{:x}",
                        spec, codepoint
                    );
                    return Err(FontError::NoCoverageFound {
                        spec: spec.to_string(),
                        codepoint,
                    });
                }
            }
        } else {
            None
        };

        let family = match family.filter(|f| f.is_hydrated()) {
            Some(family) => family,
            None => self.fallback_family(&names[0])?,
        };

        let variant = {
            let mut resolver = self.resolver();
            best_variant(&mut resolver, &family, style.bold(), style.italic(), codepoint)
        }
        .ok_or_else(|| FontError::FamilyUnavailable(family.name.clone()))?;

        debug!(
            "selected {} ({}) {} #{} for U+{:04X}",
            family.name,
            variant.style_name(),
            variant.source,
            variant.index,
            codepoint
        );

        self.faces
            .acquire(&variant.source, variant.index, style, &self.platform)
    }

    fn resolver(&mut self) -> FallbackResolver<'_, E, P> {
        FallbackResolver {
            registry: &mut self.registry,
            faces: &mut self.faces,
            platform: &self.platform,
            probe_style: &self.default_style,
        }
    }

    /// Installed family for `name`, else the first available default family
    ///
    /// The configured default is a spec of its own; its names are tried in
    /// order with `DEFAULT_FAMILY` last.
    fn fallback_family(&mut self, name: &str) -> FontResult<Family> {
        if let Some(family) = self.registry.get_family(name, &self.platform) {
            return Ok((*family).clone());
        }
        debug!("family \"{}\" not found, using \"{}\"", name, self.family);

        let mut defaults = parse_family_spec(&self.family);
        if !defaults.iter().any(|n| n.eq_ignore_ascii_case(DEFAULT_FAMILY)) {
            defaults.push(DEFAULT_FAMILY.to_string());
        }
        defaults
            .iter()
            .find_map(|n| self.registry.get_family(n, &self.platform))
            .map(|family| (*family).clone())
            .ok_or_else(|| FontError::FamilyUnavailable(self.family.clone()))
    }

    fn find_covering_family(&mut self, names: &[String], codepoint: u32) -> Option<Family> {
        let mut resolver = FallbackResolver {
            registry: &mut self.registry,
            faces: &mut self.faces,
            platform: &self.platform,
            probe_style: &self.default_style,
        };

        // Requested names: attachment families first, then installed ones
        for name in names {
            if let Some(list) = self.attachment_fallbacks.as_deref() {
                if let Some(i) = resolver.search_by_family_name(list, name, codepoint) {
                    return Some(list[i].clone());
                }
            }

            if let Some(family) = resolver.registry.get_family(name, resolver.platform) {
                if resolver.family_covers(&family, codepoint) {
                    return Some((*family).clone());
                }
            }
        }

        // Any attachment
        if let Some(list) = self.attachment_fallbacks.as_deref_mut() {
            if let Some(i) = resolver.search_fallbacks(list, codepoint) {
                return Some(list[i].clone());
            }
        }

        // Platform fallbacks, memoized so stub hydration persists
        for name in names {
            let key = (name.to_lowercase(), codepoint);
            if !self.system_fallbacks.contains_key(&key) {
                match self.platform.fallbacks(name, codepoint) {
                    Some(list) => {
                        self.system_fallbacks.insert(key.clone(), list);
                    }
                    None => continue,
                }
            }

            if let Some(list) = self.system_fallbacks.get_mut(&key) {
                if let Some(i) = resolver.search_fallbacks(list, codepoint) {
                    return Some(list[i].clone());
                }
            }
        }

        // Static default list
        resolver
            .search_fallbacks(&mut self.default_fallbacks, codepoint)
            .map(|i| self.default_fallbacks[i].clone())
    }
}
