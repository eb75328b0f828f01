//! Range slider engine: thumbs, drag gestures and label colors.
//!
//! The host UI layer owns rendering and event delivery. It forwards pointer
//! down/move/up to a [`RangeSlider`] and re-renders from [`RangeSlider::thumbs`],
//! [`RangeSlider::colors`] and [`RangeSlider::background_css`].

use std::fmt;

use float_cmp::approx_eq;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::color::{Rgb, to_css_rgb_compact, to_hex};
use crate::error::SliderError;
use crate::gesture::{Gesture, PointerListeners};
use crate::gradient::{DEFAULT_DIRECTION, DEFAULT_TRACK_SIZE, Gradient};
use crate::positioner::{TrackBox, resolve_drag};

/// Construction-time slider settings. Never mutated after creation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    /// Lower end of the value domain
    pub min: f64,
    /// Upper end of the value domain
    pub max: f64,
    /// Linear scalar used when measuring gradient brackets
    pub track_size: f64,
    /// Smallest allowed gap between adjacent thumbs, in value units
    pub min_separation: f64,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
            track_size: DEFAULT_TRACK_SIZE,
            min_separation: 5.0,
        }
    }
}

impl SliderConfig {
    fn validate(&self) -> Result<(), SliderError> {
        if !(self.min.is_finite() && self.max.is_finite() && self.min < self.max) {
            return Err(SliderError::InvalidThumbs(format!(
                "domain [{}, {}] is empty or not finite",
                self.min, self.max
            )));
        }
        if !(self.track_size.is_finite() && self.track_size > 0.0) {
            return Err(SliderError::InvalidGradient(format!(
                "track size {} must be positive",
                self.track_size
            )));
        }
        if !(self.min_separation.is_finite() && self.min_separation >= 0.0) {
            return Err(SliderError::InvalidThumbs(format!(
                "minimum separation {} must be non-negative",
                self.min_separation
            )));
        }
        Ok(())
    }
}

/// Render-ready view of one thumb.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThumbView {
    pub index: usize,
    pub value: f64,
    /// CSS `left` offset, e.g. `75%`
    pub left: String,
    /// Label tint, e.g. `rgb(128,171,8)`
    pub color: String,
    pub hex: String,
}

/// Render-ready view of the whole slider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderSnapshot {
    pub min: f64,
    pub max: f64,
    pub thumbs: Vec<ThumbView>,
    pub background: String,
}

/// One line per thumb, then the track background.
impl fmt::Display for SliderSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for thumb in &self.thumbs {
            writeln!(
                f,
                "thumb {}: value={} left={} color={} ({})",
                thumb.index, thumb.value, thumb.left, thumb.color, thumb.hex
            )?;
        }
        writeln!(f, "background: {}", self.background)
    }
}

/// Multi-thumb slider over a gradient-painted track.
#[derive(Debug)]
pub struct RangeSlider {
    config: SliderConfig,
    gradient: Gradient,
    thumbs: Vec<f64>,
    colors: Vec<Rgb>,
    gesture: Gesture,
    drag_origin: Option<f64>,
    listeners: PointerListeners,
}

impl RangeSlider {
    /// Create a slider. The gradient's first and last stops must sit on
    /// `config.min` and `config.max`, and every thumb must lie in that range.
    pub fn new(
        config: SliderConfig,
        gradient: Gradient,
        thumbs: Vec<f64>,
    ) -> Result<Self, SliderError> {
        config.validate()?;

        if !approx_eq!(f64, gradient.min(), config.min, ulps = 2)
            || !approx_eq!(f64, gradient.max(), config.max, ulps = 2)
        {
            return Err(SliderError::InvalidGradient(format!(
                "stops span [{}, {}] but the slider spans [{}, {}]",
                gradient.min(),
                gradient.max(),
                config.min,
                config.max
            )));
        }

        if thumbs.is_empty() {
            return Err(SliderError::InvalidThumbs("at least one thumb is required".into()));
        }
        if let Some(&bad) = thumbs
            .iter()
            .find(|&&v| !v.is_finite() || v < config.min || v > config.max)
        {
            return Err(SliderError::InvalidThumbs(format!(
                "thumb value {} is outside [{}, {}]",
                bad, config.min, config.max
            )));
        }

        let colors = thumbs
            .iter()
            .map(|&v| gradient.color_at_on_track(v, config.track_size))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            config,
            gradient,
            thumbs,
            colors,
            gesture: Gesture::Idle,
            drag_origin: None,
            listeners: PointerListeners::new(),
        })
    }

    /// Use a host-provided listener registry instead of a private one.
    pub fn with_listeners(mut self, listeners: PointerListeners) -> Self {
        self.listeners = listeners;
        self
    }

    pub fn config(&self) -> &SliderConfig {
        &self.config
    }

    pub fn gradient(&self) -> &Gradient {
        &self.gradient
    }

    pub fn thumbs(&self) -> &[f64] {
        &self.thumbs
    }

    /// Label color per thumb, recomputed after every resolved move.
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn listeners(&self) -> &PointerListeners {
        &self.listeners
    }

    /// Start dragging thumb `index`.
    ///
    /// A pointer-down while another drag is in progress is ignored; only one
    /// thumb is dragged at a time.
    pub fn pointer_down(&mut self, index: usize) -> Result<(), SliderError> {
        if index >= self.thumbs.len() {
            return Err(SliderError::NoSuchThumb {
                index,
                count: self.thumbs.len(),
            });
        }
        if let Some(active) = self.gesture.active_index() {
            warn!(active, index, "pointer down while dragging, ignored");
            return Ok(());
        }

        self.drag_origin = Some(self.thumbs[index]);
        self.gesture = Gesture::Dragging {
            index,
            subscription: self.listeners.subscribe(),
        };
        debug!(index, "drag started");
        Ok(())
    }

    /// Handle a pointer move at absolute coordinate `coord` over `track`.
    ///
    /// Returns the new value of the dragged thumb, or `None` when idle.
    pub fn pointer_move(
        &mut self,
        coord: f64,
        track: TrackBox,
    ) -> Result<Option<f64>, SliderError> {
        if !self.gesture.is_dragging() {
            return Ok(None);
        }
        let raw = track.value_at(coord, self.config.min, self.config.max);
        self.move_active_to(raw)
    }

    /// Move the dragged thumb toward a raw value already in slider units.
    pub fn move_active_to(&mut self, raw_value: f64) -> Result<Option<f64>, SliderError> {
        let Some(index) = self.gesture.active_index() else {
            return Ok(None);
        };

        let value = resolve_drag(&self.thumbs, index, self.config.min_separation, raw_value)?;
        let color = match self
            .gradient
            .color_at_on_track(value, self.config.track_size)
        {
            Ok(color) => color,
            Err(e) => {
                warn!(index, raw_value, value, "rejected move: {}", e);
                return Err(e);
            }
        };

        self.thumbs[index] = value;
        self.recompute_colors()?;
        debug!(index, raw_value, value, color = %to_hex(color), "thumb moved");
        Ok(Some(value))
    }

    /// End the drag. Returns the index that was being dragged, if any.
    pub fn pointer_up(&mut self) -> Option<usize> {
        let index = self.gesture.active_index();
        self.gesture = Gesture::Idle;
        self.drag_origin = None;
        if let Some(index) = index {
            debug!(index, value = self.thumbs[index], "drag ended");
        }
        index
    }

    /// Abort the drag and put the thumb back where the gesture started.
    pub fn cancel(&mut self) -> Option<usize> {
        let index = self.gesture.active_index()?;
        if let Some(origin) = self.drag_origin.take() {
            self.thumbs[index] = origin;
        }
        self.gesture = Gesture::Idle;
        if let Err(e) = self.recompute_colors() {
            warn!("color recompute after cancel failed: {}", e);
        }
        debug!(index, "drag cancelled");
        Some(index)
    }

    /// Scripted gesture: press thumb `index`, move it toward `raw_value`, release.
    pub fn apply_drag(&mut self, index: usize, raw_value: f64) -> Result<f64, SliderError> {
        self.pointer_down(index)?;
        let moved = self.move_active_to(raw_value);
        self.pointer_up();
        moved.map(|v| v.unwrap_or(self.thumbs[index]))
    }

    fn recompute_colors(&mut self) -> Result<(), SliderError> {
        for (color, &value) in self.colors.iter_mut().zip(&self.thumbs) {
            *color = self
                .gradient
                .color_at_on_track(value, self.config.track_size)?;
        }
        Ok(())
    }

    /// Label tint for thumb `index` as CSS, e.g. `rgb(128,171,8)`.
    pub fn label_css(&self, index: usize) -> Option<String> {
        self.colors.get(index).map(|&c| to_css_rgb_compact(c))
    }

    /// CSS `left` offset for thumb `index` as a percentage of the domain.
    pub fn thumb_left_css(&self, index: usize) -> Option<String> {
        self.thumbs.get(index).map(|&v| format!("{}%", self.percent_of(v)))
    }

    /// Position of `value` as a percentage of the domain.
    ///
    /// Scales before dividing so whole-number positions on a whole-number
    /// domain stay exact (`57%`, not `56.99999999999999%`).
    pub fn percent_of(&self, value: f64) -> f64 {
        (value - self.config.min) * 100.0 / (self.config.max - self.config.min)
    }

    /// Track background, built from the unmodified gradient stops.
    pub fn background_css(&self) -> String {
        self.gradient.to_css(DEFAULT_DIRECTION)
    }

    pub fn snapshot(&self) -> SliderSnapshot {
        let thumbs = self
            .thumbs
            .iter()
            .zip(&self.colors)
            .enumerate()
            .map(|(index, (&value, &color))| ThumbView {
                index,
                value,
                left: format!("{}%", self.percent_of(value)),
                color: to_css_rgb_compact(color),
                hex: to_hex(color),
            })
            .collect();

        SliderSnapshot {
            min: self.config.min,
            max: self.config.max,
            thumbs,
            background: self.background_css(),
        }
    }
}

impl Default for RangeSlider {
    /// Two thumbs at the ends of the default 0..100 gradient.
    fn default() -> Self {
        let config = SliderConfig::default();
        let gradient = Gradient::default();
        let colors = vec![gradient.stops()[0].color, gradient.stops()[2].color];
        Self {
            config,
            gradient,
            thumbs: vec![config.min, config.max],
            colors,
            gesture: Gesture::Idle,
            drag_origin: None,
            listeners: PointerListeners::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_validated_construction() {
        let built = RangeSlider::new(
            SliderConfig::default(),
            Gradient::default(),
            vec![0.0, 100.0],
        )
        .unwrap();
        let default = RangeSlider::default();
        assert_eq!(built.thumbs(), default.thumbs());
        assert_eq!(built.colors(), default.colors());
    }

    #[test]
    fn rejected_move_leaves_state_untouched() {
        // Neighbors closer than twice the separation push the thumb below min.
        let mut slider =
            RangeSlider::new(SliderConfig::default(), Gradient::default(), vec![0.0, 3.0])
                .unwrap();
        slider.pointer_down(0).unwrap();
        let err = slider.move_active_to(1.0).unwrap_err();
        assert!(matches!(err, SliderError::OutOfRange { .. }));
        assert_eq!(slider.thumbs(), &[0.0, 3.0]);
        assert!(slider.gesture().is_dragging());
    }
}
