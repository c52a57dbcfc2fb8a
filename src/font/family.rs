//! Families, variants and font sources

use std::fmt;
use std::path::PathBuf;
use std::rc::Rc;

/// Prefix of attachment sources (`:/<index>`)
const ATTACHMENT_PREFIX: &str = ":/";
/// Prefix of platform stream sources (`:dw/<index>`)
const STREAM_PREFIX: &str = ":dw/";

/// Where the bytes of a font come from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FontSource {
    /// Ordinary font file
    File(PathBuf),
    /// Index into the session's font attachments
    Attachment(i64),
    /// Platform-private stream index
    Stream(i64),
}

impl FontSource {
    /// Parse the string form used by platform backends and the host
    ///
    /// Malformed indices become -1, which never resolves.
    pub fn parse(s: &str) -> Self {
        if let Some(index) = s.strip_prefix(ATTACHMENT_PREFIX) {
            Self::Attachment(index.trim().parse().unwrap_or(-1))
        } else if let Some(index) = s.strip_prefix(STREAM_PREFIX) {
            Self::Stream(index.trim().parse().unwrap_or(-1))
        } else {
            Self::File(PathBuf::from(s))
        }
    }
}

impl fmt::Display for FontSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Attachment(index) => write!(f, "{}{}", ATTACHMENT_PREFIX, index),
            Self::Stream(index) => write!(f, "{}{}", STREAM_PREFIX, index),
        }
    }
}

/// One concrete face of a family
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub source: FontSource,
    /// Face index within the source
    pub index: u32,
    pub bold: bool,
    pub italic: bool,
}

impl Variant {
    pub fn new(source: FontSource, index: u32, bold: bool, italic: bool) -> Self {
        Self {
            source,
            index,
            bold,
            italic,
        }
    }

    pub fn is_plain(&self) -> bool {
        !self.bold && !self.italic
    }

    pub fn style_name(&self) -> &'static str {
        match (self.bold, self.italic) {
            (false, false) => "Regular",
            (true, false) => "Bold",
            (false, true) => "Italic",
            (true, true) => "Bold Italic",
        }
    }
}

/// Named group of variants
///
/// Also used as a fallback stub: a name with no variants yet, hydrated from
/// the registry on first search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Family {
    /// Case-folded display name
    pub name: String,
    pub variants: Vec<Rc<Variant>>,
}

impl Family {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_lowercase(),
            variants: Vec::new(),
        }
    }

    /// Fallback stub (no variants until hydrated)
    pub fn stub(name: &str) -> Self {
        Self::new(name)
    }

    /// Add a variant
    ///
    /// A plain variant arriving while the head of the list is styled is
    /// moved to the front; everything else appends.
    pub fn add_variant(&mut self, variant: Variant) {
        let head_is_styled = self.variants.first().is_some_and(|v| !v.is_plain());
        if head_is_styled && variant.is_plain() {
            self.variants.insert(0, Rc::new(variant));
        } else {
            self.variants.push(Rc::new(variant));
        }
    }

    pub fn is_hydrated(&self) -> bool {
        !self.variants.is_empty()
    }

    pub fn matches_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// Ordered fallback list, highest priority first
pub type FallbackList = Vec<Family>;
