pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

/// Linear interpolation with `t` clamped to `[0, 1]`.
pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    a + (b - a) * t
}

/// `x / y` clamped into `[0, 1]`; zero or non-finite denominators map to 1.
pub(crate) fn unit_ratio(x: f64, y: f64) -> f64 {
    if !(y.is_finite() && y > 0.0) {
        return 1.0;
    }
    (x / y).clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
