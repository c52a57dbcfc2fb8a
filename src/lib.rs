//! fontsel - font family resolution for text rendering
//!
//! Picks the face that best renders a styled run of text across embedded
//! attachments, installed families, platform fallbacks and a default list,
//! and caches loaded faces per source and pixel size.

pub mod config;
pub mod constants;
pub mod error;
pub mod font;
pub mod style;

pub use error::{FontError, FontResult};
pub use font::{Attachment, FontEngine, FontPlatform, FontSession, SessionOptions};
pub use style::{RenderTarget, StyleFlags, TextStyle};
