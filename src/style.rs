//! Text style input of the selector

use bitflags::bitflags;

use crate::constants::{DEFAULT_ZOOM_PERCENT, STYLE_DEFAULT_FONT_SIZE};

bitflags! {
    /// Style flags that influence family choice, variant scoring and face size
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleFlags: u32 {
        const BOLD = 1 << 0;
        const ITALIC = 1 << 1;
        const MONOSPACED = 1 << 2;
        const HALFWIDTH = 1 << 3;
        const DOUBLEWIDTH = 1 << 4;
    }
}

/// Requested text style
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextStyle {
    /// Explicit pixel size (0 = unset)
    pub font_size: u32,
    /// Size in percent of the output frame height (0.0 = unset)
    pub relative_size: f32,
    pub flags: StyleFlags,
    /// Primary family spec, e.g. `"Arial", Helvetica`
    pub family: Option<String>,
    /// Family spec used when `MONOSPACED` is set
    pub monospace_family: Option<String>,
}

impl TextStyle {
    pub fn bold(&self) -> bool {
        self.flags.contains(StyleFlags::BOLD)
    }

    pub fn italic(&self) -> bool {
        self.flags.contains(StyleFlags::ITALIC)
    }

    /// Family spec this style asks for, if it carries one
    pub fn family_spec(&self) -> Option<&str> {
        if self.flags.contains(StyleFlags::MONOSPACED) {
            self.monospace_family.as_deref()
        } else {
            self.family.as_deref()
        }
    }
}

/// Output frame the text is rendered into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderTarget {
    pub frame_height: u32,
    /// Global zoom in percent
    pub zoom_percent: u32,
}

impl Default for RenderTarget {
    fn default() -> Self {
        Self {
            frame_height: crate::constants::DEFAULT_FRAME_HEIGHT,
            zoom_percent: DEFAULT_ZOOM_PERCENT,
        }
    }
}

/// Pixel dimensions of a face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelSize {
    pub height: u32,
    pub width: u32,
}

impl RenderTarget {
    /// Live pixel height for `style`
    ///
    /// Explicit size wins over relative size; the result is then scaled by
    /// the global zoom.
    pub fn live_size(&self, style: &TextStyle) -> u32 {
        let mut size = if style.font_size > 0 {
            style.font_size
        } else if style.relative_size > 0.0 {
            (self.frame_height as f32 * style.relative_size / 100.0) as u32
        } else {
            STYLE_DEFAULT_FONT_SIZE
        };

        if self.zoom_percent != DEFAULT_ZOOM_PERCENT {
            size = u32::try_from(size as u64 * self.zoom_percent as u64 / 100).unwrap_or(u32::MAX);
        }
        size
    }

    /// Height and width; width is halved or doubled by the width flags
    pub fn pixel_size(&self, style: &TextStyle) -> PixelSize {
        let height = self.live_size(style);
        let width = if style.flags.contains(StyleFlags::HALFWIDTH) {
            height / 2
        } else if style.flags.contains(StyleFlags::DOUBLEWIDTH) {
            height.saturating_mul(2)
        } else {
            height
        };
        PixelSize { height, width }
    }
}
