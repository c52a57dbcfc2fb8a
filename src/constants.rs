//! Global constants for fontsel
//!
//! Default family names, font files and sizing values shared by the
//! selector, the static family map and the configuration defaults.

// ============================================================================
// Families
// ============================================================================

/// Family used when the requested family has no usable variants
pub const DEFAULT_FAMILY: &str = "Serif";

/// Family used for monospaced text when none is configured
pub const DEFAULT_MONOSPACE_FAMILY: &str = "Monospace";

/// Static default fallback list (last tier of the coverage search)
pub const DEFAULT_FALLBACKS: &[&str] = &[
    "DejaVu Sans",
    "Noto Sans",
    "Arial Unicode MS",
    "FreeSerif",
    "Unifont",
];

/// Name prefix for families created without a name
pub const ANONYMOUS_FAMILY_PREFIX: &str = "fallback";

// ============================================================================
// Font Files
// ============================================================================

/// Base directory for relative font file names
pub const SYSTEM_FONT_PATH: &str = "/usr/share/fonts";

/// Backing file of the default family in the static map
pub const DEFAULT_FONT_FILE: &str = "truetype/freefont/FreeSerifBold.ttf";

/// Backing file of the default monospace family in the static map
pub const DEFAULT_MONOSPACE_FONT_FILE: &str = "truetype/freefont/FreeMono.ttf";

// ============================================================================
// Sizing
// ============================================================================

/// Pixel size used when a style sets neither an explicit nor a relative size
pub const STYLE_DEFAULT_FONT_SIZE: u32 = 20;

/// Default relative size (percent of the output frame height)
pub const STYLE_DEFAULT_REL_FONT_SIZE: f32 = 6.25;

/// Zoom percent meaning "no scaling"
pub const DEFAULT_ZOOM_PERCENT: u32 = 100;

/// Output frame height assumed when the host does not provide one
pub const DEFAULT_FRAME_HEIGHT: u32 = 720;

// ============================================================================
// Platform Enumeration
// ============================================================================

/// Maximum number of family names taken from one system fallback query
pub const MAX_SYSTEM_FALLBACKS: usize = 24;
