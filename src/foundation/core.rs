use crate::foundation::math::lerp_f32;

/// Single-precision 2D vector used for item position, scale and bounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Vec2f {
    /// Horizontal component.
    pub x: f32,
    /// Vertical component.
    pub y: f32,
}

impl Vec2f {
    /// The zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Build a vector from its components.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Component-wise `(1 - t) * self + t * other`; exact at both ends.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            x: lerp_f32(self.x, other.x, t),
            y: lerp_f32(self.y, other.y, t),
        }
    }

    /// `self + other * factor`.
    pub fn offset(self, other: Self, factor: f32) -> Self {
        Self {
            x: self.x + other.x * factor,
            y: self.y + other.y * factor,
        }
    }

    pub(crate) fn to_point(self) -> kurbo::Point {
        kurbo::Point::new(f64::from(self.x), f64::from(self.y))
    }

    pub(crate) fn from_point(p: kurbo::Point) -> Self {
        Self {
            x: p.x as f32,
            y: p.y as f32,
        }
    }
}

/// Item crop in whole pixels, `[left, top, right, bottom]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Crop {
    /// Pixels cropped from the left edge.
    pub left: i32,
    /// Pixels cropped from the top edge.
    pub top: i32,
    /// Pixels cropped from the right edge.
    pub right: i32,
    /// Pixels cropped from the bottom edge.
    pub bottom: i32,
}

impl Crop {
    /// Build a crop from its four edges.
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Linear interpolation truncated toward zero.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        fn edge(a: i32, b: i32, t: f32) -> i32 {
            ((1.0 - t) * a as f32 + t * b as f32) as i32
        }

        Self {
            left: edge(self.left, other.left, t),
            top: edge(self.top, other.top, t),
            right: edge(self.right, other.right, t),
            bottom: edge(self.bottom, other.bottom, t),
        }
    }

    /// `self + other * factor` with every edge clamped to `>= 0`. Saturates at the `i32` range.
    pub fn offset_clamped(self, other: Self, factor: i32) -> Self {
        fn edge(a: i32, b: i32, factor: i32) -> i32 {
            a.saturating_add(b.saturating_mul(factor)).max(0)
        }

        Self {
            left: edge(self.left, other.left, factor),
            top: edge(self.top, other.top, factor),
            right: edge(self.right, other.right, factor),
            bottom: edge(self.bottom, other.bottom, factor),
        }
    }

    /// `self - other`, edge by edge, saturating at the `i32` range.
    pub fn difference(self, other: Self) -> Self {
        Self {
            left: self.left.saturating_sub(other.left),
            top: self.top.saturating_sub(other.top),
            right: self.right.saturating_sub(other.right),
            bottom: self.bottom.saturating_sub(other.bottom),
        }
    }
}

/// Size of the rendering canvas an item lives on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Integer half-width, matching how the host reports canvas centers.
    pub fn half_width(self) -> f32 {
        (self.width >> 1) as f32
    }

    /// Integer half-height.
    pub fn half_height(self) -> f32 {
        (self.height >> 1) as f32
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
