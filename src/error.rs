//! Typed errors of face selection and loading

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FontError {
    #[error("invalid font attachment index {index} ({count} font attachments)")]
    AttachmentIndexInvalid { index: i64, count: usize },

    #[error("error creating face for {key}: {reason}")]
    FaceCreationFailed { key: String, reason: String },

    #[error("no unicode charmap in face {key}")]
    CharmapUnavailable { key: String },

    #[error("failed to set pixel size for {key}")]
    PixelSizeFailed { key: String },

    #[error("no font family specified")]
    NoFamilySpecified,

    #[error("no font found for family \"{spec}\", codepoint U+{codepoint:04X}")]
    NoCoverageFound { spec: String, codepoint: u32 },

    #[error("font family \"{0}\" is not available")]
    FamilyUnavailable(String),
}

pub type FontResult<T> = Result<T, FontError>;
