//! Drag-constrained thumb positioning.

use tracing::trace;

use crate::error::SliderError;
use crate::round_half_up;

/// Corrected value for the thumb at `active_index` being dragged toward `raw_value`.
///
/// Clamps against the left neighbor first, then the right neighbor, then
/// rounds to the nearest whole unit. The clamps are applied one after the
/// other: when the neighbors are closer together than `2 * min_separation`
/// the right-hand clamp wins.
///
/// # Example
///
/// ```
/// use gradient_range::positioner::resolve_drag;
///
/// assert_eq!(resolve_drag(&[20.0, 80.0], 0, 5.0, 78.0).unwrap(), 75.0);
/// assert_eq!(resolve_drag(&[20.0, 80.0], 1, 5.0, 22.0).unwrap(), 25.0);
/// ```
pub fn resolve_drag(
    thumbs: &[f64],
    active_index: usize,
    min_separation: f64,
    raw_value: f64,
) -> Result<f64, SliderError> {
    if active_index >= thumbs.len() {
        return Err(SliderError::NoSuchThumb {
            index: active_index,
            count: thumbs.len(),
        });
    }

    let mut value = raw_value;

    if let Some(left) = active_index.checked_sub(1).map(|i| thumbs[i]) {
        if left + min_separation > value {
            value = left + min_separation;
        }
    }

    if let Some(&right) = thumbs.get(active_index + 1) {
        if right - min_separation < value {
            value = right - min_separation;
        }
    }

    let resolved = round_half_up(value);
    trace!(active_index, raw_value, resolved, "resolved drag");
    Ok(resolved)
}

/// On-screen extent of the track along the drag axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackBox {
    /// Absolute coordinate of the track's leading edge
    pub start: f64,
    /// Track length in the same units as `start`
    pub length: f64,
}

impl TrackBox {
    pub fn new(start: f64, length: f64) -> Self {
        Self { start, length }
    }

    /// Fraction along the track for an absolute pointer coordinate, in [0, 1].
    ///
    /// A zero-length track (or any non-finite ratio) maps to 0.
    pub fn click_pos(&self, coord: f64) -> f64 {
        let pos = (coord - self.start) / self.length;
        if pos.is_finite() { pos.clamp(0.0, 1.0) } else { 0.0 }
    }

    /// Raw slider value under `coord` for the domain `[min, max]`.
    pub fn value_at(&self, coord: f64, min: f64, max: f64) -> f64 {
        min + self.click_pos(coord) * (max - min)
    }
}
