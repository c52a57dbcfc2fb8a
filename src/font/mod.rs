//! Font family resolution and face caching
//!
//! Handles:
//! - Family/variant model and font sources (files, attachments, streams)
//! - Loaded face cache keyed by source, index and pixel size
//! - Name-indexed family registry backed by the platform
//! - Coverage search over fallback lists
//! - Variant scoring and face selection
//! - FreeType engine and fontconfig platform backends

pub mod engine;
pub mod face_cache;
pub mod fallback;
pub mod family;
pub mod fontconfig;
pub mod freetype;
pub mod platform;
pub mod registry;
pub mod selector;
pub mod session;

#[cfg(test)]
pub(crate) mod mock;

pub use engine::{FaceInfo, FontEngine};
pub use face_cache::{FaceCache, FaceKey};
pub use fallback::FallbackResolver;
pub use family::{FallbackList, Family, FontSource, Variant};
pub use self::fontconfig::FontconfigPlatform;
pub use self::freetype::FtEngine;
pub use platform::{make_file_path, FontPlatform, StaticFonts};
pub use registry::FamilyRegistry;
pub use selector::parse_family_spec;
pub use session::{Attachment, FontSession, SessionOptions};
