//! Style configuration supplied wholesale by the owning view.
//!
//! A cell never derives visual parameters on its own; the view assembles a
//! [`CellStyleOption`] from its theme and pushes it through
//! `ItemListCell::set_style_option`. The record is treated as opaque by the
//! cell core - it is stored, diffed, handed to the renderer, and nothing
//! else.

use crate::geometry::Size;

/// A color with premultiplied alpha, components in the 0.0-1.0 range.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Create a new color from premultiplied RGBA components.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from non-premultiplied RGBA components.
    #[inline]
    pub fn from_rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: r * a,
            g: g * a,
            b: b * a,
            a,
        }
    }

    /// Create an opaque color from RGB components.
    #[inline]
    pub const fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create an opaque color from 8-bit RGB components.
    #[inline]
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Scale the color's alpha, keeping premultiplication consistent.
    #[inline]
    pub fn with_opacity(self, opacity: f32) -> Self {
        let opacity = opacity.clamp(0.0, 1.0);
        Self {
            r: self.r * opacity,
            g: self.g * opacity,
            b: self.b * opacity,
            a: self.a * opacity,
        }
    }

    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Self = Self::from_rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::from_rgb(1.0, 1.0, 1.0);
}

/// A font request the text backend resolves to a concrete face.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    /// Family name, empty for the platform default.
    pub family: String,
    /// Point size.
    pub size: f32,
    /// Weight on the 100-900 scale; 400 is regular.
    pub weight: u16,
    pub italic: bool,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: String::new(),
            size: 12.0,
            weight: 400,
            italic: false,
        }
    }
}

/// Style information for rendering an item-view cell.
///
/// Assembled by the owning view and pushed to every visible cell whenever
/// the theme, font, or view mode changes. Compared by value: pushing an
/// identical record is a no-op and fires no change hook.
#[derive(Debug, Clone, PartialEq)]
pub struct CellStyleOption {
    /// Font used for the primary text role.
    pub font: FontSpec,
    /// Default edge length for icons, in logical pixels.
    pub icon_size: u32,
    /// Padding around the whole cell content.
    pub padding: f32,
    /// Horizontal gap between the icon and the text block.
    pub horizontal_margin: f32,
    /// Vertical gap between stacked text roles.
    pub vertical_margin: f32,
    /// Maximum number of text lines before elision.
    pub max_text_lines: u32,
    /// Foreground (text) color.
    pub text_color: Color,
    /// Base background color.
    pub background_color: Color,
    /// Fill used for the selection rectangle.
    pub selection_color: Color,
    /// Fill composited over the cached base while hovered.
    pub hover_color: Color,
    /// Background for every other row when alternate backgrounds are on.
    pub alternate_background_color: Color,
}

impl Default for CellStyleOption {
    fn default() -> Self {
        Self {
            font: FontSpec::default(),
            icon_size: 16,
            padding: 4.0,
            horizontal_margin: 4.0,
            vertical_margin: 2.0,
            max_text_lines: 2,
            text_color: Color::BLACK,
            background_color: Color::WHITE,
            selection_color: Color::from_rgb8(0x3d, 0x8e, 0xc9),
            hover_color: Color::from_rgba(0.24, 0.56, 0.79, 0.3),
            alternate_background_color: Color::from_rgb8(0xf5, 0xf5, 0xf5),
        }
    }
}

impl CellStyleOption {
    /// Icon size as a square [`Size`].
    #[inline]
    pub fn icon_size_f(&self) -> Size {
        Size::new(self.icon_size as f32, self.icon_size as f32)
    }
}
