//! Multi-thumb range slider engine with a gradient-painted track.
//!
//! Two small pure pieces drive the widget: [`gradient`] interpolates a
//! piecewise-linear color ramp to tint each thumb's label, and
//! [`positioner`] keeps a dragged thumb ordered and separated from its
//! neighbors. [`slider::RangeSlider`] ties them to a drag gesture; the
//! [`tui`] module is a terminal host for it.

pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod gesture;
pub mod gradient;
pub mod logging;
pub mod positioner;
pub mod slider;
pub mod tui;

pub use error::SliderError;
pub use gradient::{Gradient, GradientStop};
pub use slider::{RangeSlider, SliderConfig};

/// Round to the nearest integer, halves toward positive infinity.
///
/// Compares the fractional part instead of adding 0.5 first: `x + 0.5` rounds
/// up to 1.0 for the largest double below one half.
pub(crate) fn round_half_up(x: f64) -> f64 {
    let floor = x.floor();
    if x - floor >= 0.5 { floor + 1.0 } else { floor }
}

#[cfg(test)]
mod tests {
    use super::round_half_up;

    #[test]
    fn halves_round_toward_positive_infinity() {
        assert_eq!(round_half_up(12.5), 13.0);
        assert_eq!(round_half_up(-12.5), -12.0);
        assert_eq!(round_half_up(127.5), 128.0);
        assert_eq!(round_half_up(3.0), 3.0);
    }

    #[test]
    fn just_below_a_half_rounds_down() {
        let below_half = 0.5 - f64::EPSILON / 4.0;
        assert_eq!(below_half, 0.49999999999999994);
        assert_eq!(round_half_up(below_half), 0.0);
        assert_eq!(round_half_up(10.0 + 0.4999999999999), 10.0);
        assert_eq!(round_half_up(-0.5000000000000001), -1.0);
    }
}
