//! Numeric conversion helpers centralizing lossy casts.

use num_traits::cast::cast;

/// Convert a slot count or index to f64, returning 0.0 if the value cannot be represented.
#[must_use]
pub fn usize_to_f64(value: usize) -> f64 {
    cast::<usize, f64>(value).unwrap_or(0.0)
}

/// Floor a non-negative f64 into a slot index, returning `None` for NaN or negative values.
#[must_use]
pub fn floor_f64_to_usize(value: f64) -> Option<usize> {
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    cast::<f64, usize>(value.floor())
}
