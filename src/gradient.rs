//! Piecewise-linear color gradient and thumb label color interpolation.
//!
//! A gradient is an ordered list of stops. Its domain runs from the first
//! stop's position to the last one's, so a slider built on it has its
//! `min`/`max` pinned to those two stops.

use std::fmt;
use std::str::FromStr;

use float_cmp::approx_eq;
use palette::Srgb;
use tracing::trace;

use crate::color::{Rgb, parse_color, to_css_rgb, to_hex};
use crate::error::SliderError;
use crate::round_half_up;

/// Default linear scalar applied to positions before computing the bracket ratio.
pub const DEFAULT_TRACK_SIZE: f64 = 100.0;

/// Default CSS gradient direction for horizontal tracks.
pub const DEFAULT_DIRECTION: &str = "to right";

/// A (position, color) anchor of the gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub position: f64,
    pub color: Rgb,
}

impl GradientStop {
    pub fn new(position: f64, color: Rgb) -> Self {
        Self { position, color }
    }
}

/// Where a query value falls relative to the stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bracket {
    /// Value sits exactly on the stop at this index
    Exact(usize),
    /// Value lies strictly between stops `lo` and `hi = lo + 1`
    Between { lo: usize, hi: usize },
}

/// Immutable, validated gradient with at least two strictly increasing stops.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    stops: Vec<GradientStop>,
}

impl Gradient {
    /// Build a gradient, rejecting stop lists that cannot be interpolated.
    pub fn new(stops: Vec<GradientStop>) -> Result<Self, SliderError> {
        if stops.len() < 2 {
            return Err(SliderError::InvalidGradient(format!(
                "need at least 2 stops, got {}",
                stops.len()
            )));
        }
        if let Some(bad) = stops.iter().find(|s| !s.position.is_finite()) {
            return Err(SliderError::InvalidGradient(format!(
                "stop position {} is not finite",
                bad.position
            )));
        }
        for pair in stops.windows(2) {
            if pair[1].position <= pair[0].position {
                return Err(SliderError::InvalidGradient(format!(
                    "stop positions must strictly increase ({} then {})",
                    pair[0].position, pair[1].position
                )));
            }
        }
        Ok(Self { stops })
    }

    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    /// Lower end of the domain (first stop's position).
    pub fn min(&self) -> f64 {
        self.stops[0].position
    }

    /// Upper end of the domain (last stop's position).
    pub fn max(&self) -> f64 {
        self.stops[self.stops.len() - 1].position
    }

    fn check_domain(&self, value: f64) -> Result<(), SliderError> {
        if !value.is_finite() || value < self.min() || value > self.max() {
            return Err(SliderError::OutOfRange {
                value,
                min: self.min(),
                max: self.max(),
            });
        }
        Ok(())
    }

    /// Locate the stops surrounding `value`.
    ///
    /// A value equal to any stop position (including the domain ends) resolves
    /// to that stop; otherwise `lo.position < value < hi.position`.
    pub fn bracket(&self, value: f64) -> Result<Bracket, SliderError> {
        self.check_domain(value)?;

        for (i, stop) in self.stops.iter().enumerate() {
            if approx_eq!(f64, value, stop.position, ulps = 2) {
                return Ok(Bracket::Exact(i));
            }
            if value < stop.position {
                // i > 0: value >= min and it did not match stop 0
                return Ok(Bracket::Between { lo: i - 1, hi: i });
            }
        }

        // Domain check guarantees a match above; treat the tail as the last stop.
        Ok(Bracket::Exact(self.stops.len() - 1))
    }

    /// Interpolated color at `value`, using the default track scalar.
    ///
    /// # Example
    ///
    /// ```
    /// use gradient_range::gradient::Gradient;
    ///
    /// let gradient = Gradient::default();
    /// let c = gradient.color_at(75.0).unwrap();
    /// assert_eq!((c.red, c.green, c.blue), (128, 171, 8));
    /// ```
    pub fn color_at(&self, value: f64) -> Result<Rgb, SliderError> {
        self.color_at_on_track(value, DEFAULT_TRACK_SIZE)
    }

    /// Interpolated color at `value`, measuring the bracket on a track of
    /// `track_size` linear units.
    ///
    /// Stop and query positions are converted to track units before the ratio
    /// is taken, so the result only depends on `track_size` through rounding.
    pub fn color_at_on_track(&self, value: f64, track_size: f64) -> Result<Rgb, SliderError> {
        let (lo, hi) = match self.bracket(value)? {
            Bracket::Exact(i) => return Ok(self.stops[i].color),
            Bracket::Between { lo, hi } => (self.stops[lo], self.stops[hi]),
        };

        let span = self.max() - self.min();
        let to_track = |position: f64| track_size * ((position - self.min()) / span);

        let lo_x = to_track(lo.position);
        let hi_x = to_track(hi.position) - lo_x;
        let value_x = to_track(value) - lo_x;

        if !(hi_x.is_finite() && hi_x > 0.0) {
            return Err(SliderError::InvalidGradient(format!(
                "bracket [{}, {}] has no width on a track of size {}",
                lo.position, hi.position, track_size
            )));
        }

        let ratio = value_x / hi_x;
        let color = blend(hi.color, lo.color, ratio);
        trace!(
            value,
            lo = lo.position,
            hi = hi.position,
            ratio,
            color = %to_hex(color),
            "interpolated gradient color"
        );
        Ok(color)
    }

    /// CSS `linear-gradient(...)` for painting the track background.
    ///
    /// Stop offsets are emitted as percentages of the domain.
    pub fn to_css(&self, direction: &str) -> String {
        let span = self.max() - self.min();
        let stops: Vec<String> = self
            .stops
            .iter()
            .map(|stop| {
                let percent = (stop.position - self.min()) * 100.0 / span;
                format!("{} {}%", to_css_rgb(stop.color), percent)
            })
            .collect();
        format!("linear-gradient({}, {})", direction, stops.join(", "))
    }
}

impl Default for Gradient {
    /// Red to yellow to green over 0..100.
    fn default() -> Self {
        Self {
            stops: vec![
                GradientStop::new(0.0, Srgb::new(0xff, 0x06, 0x24)),
                GradientStop::new(50.0, Srgb::new(0xff, 0xd3, 0x06)),
                GradientStop::new(100.0, Srgb::new(0x00, 0x82, 0x09)),
            ],
        }
    }
}

/// Blend two colors, `weight` toward `hi` and `1 - weight` toward `lo`.
///
/// The weight is recentered to [-1, 1] and back before use, which keeps the
/// rounding of each channel identical to the widget this engine drives.
pub fn blend(hi: Rgb, lo: Rgb, weight: f64) -> Rgb {
    let w = weight * 2.0 - 1.0;
    let w_hi = (w + 1.0) / 2.0;
    let w_lo = 1.0 - w_hi;

    let channel = |h: u8, l: u8| -> u8 {
        round_half_up(h as f64 * w_hi + l as f64 * w_lo).clamp(0.0, 255.0) as u8
    };

    Srgb::new(
        channel(hi.red, lo.red),
        channel(hi.green, lo.green),
        channel(hi.blue, lo.blue),
    )
}

/// Stops as `POS:#rrggbb` pairs joined by commas.
impl fmt::Display for Gradient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, stop) in self.stops.iter().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}:{}", stop.position, to_hex(stop.color))?;
        }
        Ok(())
    }
}

/// Parse `POS:COLOR` pairs separated by `,` or `;`.
///
/// Separators inside parentheses belong to the color, so
/// `0:rgb(255, 6, 36), 100:green` is two stops.
impl FromStr for Gradient {
    type Err = SliderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stops = split_top_level(s)
            .into_iter()
            .filter(|item| !item.trim().is_empty())
            .map(parse_stop)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(stops)
    }
}

fn parse_stop(item: &str) -> Result<GradientStop, SliderError> {
    let (position, color) = item.split_once(':').ok_or_else(|| {
        SliderError::InvalidGradient(format!("stop '{}' is not POS:COLOR", item.trim()))
    })?;
    let position: f64 = position.trim().parse().map_err(|_| {
        SliderError::InvalidGradient(format!("stop position '{}' is not a number", position.trim()))
    })?;
    Ok(GradientStop::new(position, parse_color(color)?))
}

fn split_top_level(s: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, ch) in s.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' | ';' if depth == 0 => {
                items.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    items.push(&s[start..]);
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_keeps_functional_colors_whole() {
        let parts = split_top_level("0:rgb(1, 2, 3); 100:hsl(120, 50%, 50%)");
        assert_eq!(parts, vec!["0:rgb(1, 2, 3)", " 100:hsl(120, 50%, 50%)"]);
    }

    #[test]
    fn stop_without_colon_is_rejected() {
        assert!(matches!(
            parse_stop("50 red"),
            Err(SliderError::InvalidGradient(_))
        ));
    }

    #[test]
    fn trailing_separator_is_ignored() {
        let g: Gradient = "0:red,100:blue,".parse().unwrap();
        assert_eq!(g.stops().len(), 2);
    }
}
