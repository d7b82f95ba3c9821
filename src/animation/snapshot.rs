use crate::{
    animation::ease::quad_bezier,
    foundation::core::{Canvas, Crop, Vec2f},
    foundation::math::lerp_f32,
};

/// Spatial state of a scene item: everything a move animates.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TransformSnapshot {
    /// Position in canvas pixels.
    pub position: Vec2f,
    /// Rotation in degrees.
    pub rotation: f32,
    /// Scale factors.
    pub scale: Vec2f,
    /// Bounding box size.
    pub bounds: Vec2f,
    /// Crop in whole pixels.
    pub crop: Crop,
}

/// Interpolation parameters for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Progress {
    /// Eased parameter used for position, rotation, scale and bounds.
    pub eased: f32,
    /// Un-eased parameter in `[0, 1]` used for crop.
    pub linear: f32,
}

impl Progress {
    /// Progress at the start of the travel.
    pub const START: Self = Self {
        eased: 0.0,
        linear: 0.0,
    };
    /// Progress at the end of the travel.
    pub const END: Self = Self {
        eased: 1.0,
        linear: 1.0,
    };
}

impl TransformSnapshot {
    /// Untransformed item: origin, no rotation, unit scale, empty bounds and crop.
    pub fn identity() -> Self {
        Self {
            scale: Vec2f::new(1.0, 1.0),
            ..Self::default()
        }
    }

    /// `self + delta * factor`, used for relative targets (`factor` is `1` or `-1`).
    ///
    /// Crop edges are clamped to `>= 0` as they accumulate.
    pub fn offset(&self, delta: &Self, factor: f32) -> Self {
        Self {
            position: self.position.offset(delta.position, factor),
            rotation: self.rotation + delta.rotation * factor,
            scale: self.scale.offset(delta.scale, factor),
            bounds: self.bounds.offset(delta.bounds, factor),
            crop: self.crop.offset_clamped(delta.crop, factor as i32),
        }
    }

    /// `self - other`, component-wise, without clamping.
    pub fn difference(&self, other: &Self) -> Self {
        Self {
            position: self.position.offset(other.position, -1.0),
            rotation: self.rotation - other.rotation,
            scale: self.scale.offset(other.scale, -1.0),
            bounds: self.bounds.offset(other.bounds, -1.0),
            crop: self.crop.difference(other.crop),
        }
    }

    /// Whether any component differs. Floats are compared exactly.
    pub fn differs(&self, other: &Self) -> bool {
        self != other
    }

    /// Interpolate from `from` to `to`.
    ///
    /// A non-zero `curve` bends the position path into a quadratic Bezier whose control point
    /// bows away from the canvas center.
    pub fn interpolate(
        from: &Self,
        to: &Self,
        progress: Progress,
        curve: f32,
        canvas: Canvas,
    ) -> Self {
        let t = progress.eased;
        let position = if curve != 0.0 {
            let control = curve_control_point(from.position, to.position, curve, canvas);
            quad_bezier(from.position, control, to.position, t)
        } else {
            from.position.lerp(to.position, t)
        };
        Self {
            position,
            rotation: lerp_f32(from.rotation, to.rotation, t),
            scale: from.scale.lerp(to.scale, t),
            bounds: from.bounds.lerp(to.bounds, t),
            crop: from.crop.lerp(to.crop, progress.linear),
        }
    }
}

/// Control point of a curved position path.
///
/// The midpoint of `from`/`to` is pushed along x by the vertical span and along y by the
/// horizontal span, each toward the canvas edge the midpoint already lies closer to.
pub fn curve_control_point(from: Vec2f, to: Vec2f, curve: f32, canvas: Canvas) -> Vec2f {
    let diff_x = (from.x - to.x).abs();
    let diff_y = (from.y - to.y).abs();
    let mut control = Vec2f::new(0.5 * from.x + 0.5 * to.x, 0.5 * from.y + 0.5 * to.y);
    if control.x >= canvas.half_width() {
        control.x += diff_y * curve;
    } else {
        control.x -= diff_y * curve;
    }
    if control.y >= canvas.half_height() {
        control.y += diff_x * curve;
    } else {
        control.y -= diff_x * curve;
    }
    control
}

#[cfg(test)]
#[path = "../../tests/unit/animation/snapshot.rs"]
mod tests;
