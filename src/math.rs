//! Numeric conditioning shared by the control loop.
//!
//! Pure functions only. These sit on the hot path of every control cycle,
//! so preconditions are documented rather than checked.

use core::f32::consts::{PI, TAU};

/// Standard gravity (m/s²).
pub const ONE_G: f32 = 9.806_65;

/// Linearly remap `x` from `[in_min, in_max]` onto `[out_min, out_max]`.
///
/// The result is not clamped: inputs outside the source range extrapolate.
///
/// # Precondition
///
/// `in_max != in_min`. A degenerate source range divides by zero and
/// yields `inf`/`NaN`; callers guarantee this by construction.
#[inline]
pub fn map_range(x: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    out_min + (x - in_min) * (out_max - out_min) / (in_max - in_min)
}

/// [`map_range`] for integer sources such as raw ADC counts or stick
/// positions. The subtraction happens in integer space so large counts
/// do not lose precision before scaling.
///
/// Same precondition: `in_max != in_min`.
#[inline]
pub fn map_range_int(x: i64, in_min: i64, in_max: i64, out_min: f32, out_max: f32) -> f32 {
    out_min + (x - in_min) as f32 * (out_max - out_min) / (in_max - in_min) as f32
}

/// Wrap an angle in radians into `[-π, π)`.
///
/// Works for any number of accumulated revolutions. Non-finite input
/// yields `NaN`.
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    // `%` keeps the sign of the dividend, so `a` lands in (-2π, 2π).
    let a = angle % TAU;
    if a >= PI {
        a - TAU
    } else if a < -PI {
        a + TAU
    } else {
        a
    }
}
