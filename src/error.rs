//! Error type shared by the gradient, positioner and slider engine.

/// Error type for slider engine operations.
///
/// Every failure is local to a single computation: nothing is retried and a
/// failed move or color query leaves the slider state untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum SliderError {
    /// Gradient stop list violates an ordering or boundary rule
    InvalidGradient(String),
    /// Query value lies outside the slider domain (or is not finite)
    OutOfRange { value: f64, min: f64, max: f64 },
    /// Initial thumb values are unusable
    InvalidThumbs(String),
    /// Thumb index does not exist
    NoSuchThumb { index: usize, count: usize },
    /// Color string could not be parsed
    InvalidColor(String),
}

impl std::fmt::Display for SliderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidGradient(reason) => write!(f, "Invalid gradient: {}", reason),
            Self::OutOfRange { value, min, max } => {
                write!(f, "Value {} is outside the range [{}, {}]", value, min, max)
            }
            Self::InvalidThumbs(reason) => write!(f, "Invalid thumbs: {}", reason),
            Self::NoSuchThumb { index, count } => {
                write!(f, "No thumb at index {} (slider has {})", index, count)
            }
            Self::InvalidColor(s) => write!(f, "Invalid color: {}", s),
        }
    }
}

impl std::error::Error for SliderError {}
