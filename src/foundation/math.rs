/// `(1 - t) * a + t * b`, which returns `a` and `b` bit-exactly at `t = 0` and `t = 1`.
pub(crate) fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    (1.0 - t) * a + t * b
}

pub(crate) fn lerp_f64(a: f64, b: f64, t: f32) -> f64 {
    let t = f64::from(t);
    (1.0 - t) * a + t * b
}

pub(crate) fn clamp01(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}
