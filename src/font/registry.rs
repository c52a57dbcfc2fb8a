//! Name-indexed family registry
//!
//! Families are fetched from the platform on first request and memoized
//! under their case-folded name. Only families with at least one variant
//! are stored, so a miss is asked again next time.

use log::debug;
use std::collections::HashMap;
use std::rc::Rc;

use super::family::Family;
use super::platform::FontPlatform;

#[derive(Debug, Default)]
pub struct FamilyRegistry {
    families: HashMap<String, Rc<Family>>,
}

impl FamilyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Memoized family for `name`, asking the platform on first request
    pub fn get_family<P: FontPlatform + ?Sized>(&mut self, name: &str, platform: &P) -> Option<Rc<Family>> {
        let key = name.to_lowercase();
        if let Some(family) = self.families.get(&key) {
            return Some(Rc::clone(family));
        }

        let found = platform.family(name)?;
        if found.variants.is_empty() {
            debug!("family \"{}\": platform returned no variants", name);
            return None;
        }

        let family = Rc::new(Family {
            name: key.clone(),
            variants: found.variants,
        });
        debug!("family \"{}\": {} variants", key, family.variants.len());
        self.families.insert(key, Rc::clone(&family));
        Some(family)
    }

    /// Memoized family, without asking the platform
    pub fn lookup(&self, name: &str) -> Option<&Rc<Family>> {
        self.families.get(&name.to_lowercase())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rc<Family>> {
        self.families.values()
    }

    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }
}
