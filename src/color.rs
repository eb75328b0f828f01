//! sRGB color helpers: parsing and CSS formatting.

use csscolorparser::Color as CssColor;
use palette::Srgb;

use crate::error::SliderError;

/// 8-bit sRGB triple used for stops and thumb label tints.
pub type Rgb = Srgb<u8>;

/// Parse a color string in any CSS format (hex, rgb(), hsl(), named).
///
/// Alpha is discarded; gradients are opaque.
///
/// # Example
///
/// ```
/// use gradient_range::color::parse_color;
///
/// let c = parse_color("#ffd306").unwrap();
/// assert_eq!((c.red, c.green, c.blue), (255, 211, 6));
/// ```
pub fn parse_color(input: &str) -> Result<Rgb, SliderError> {
    let css_color: CssColor = input
        .trim()
        .parse()
        .map_err(|e| SliderError::InvalidColor(format!("'{}': {}", input, e)))?;
    let [r, g, b, _a] = css_color.to_rgba8();
    Ok(Srgb::new(r, g, b))
}

/// Format as a CSS functional color, e.g. `rgb(255, 6, 36)`.
pub fn to_css_rgb(color: Rgb) -> String {
    format!("rgb({}, {}, {})", color.red, color.green, color.blue)
}

/// Format without separator spaces, e.g. `rgb(128,171,8)` (label tint form).
pub fn to_css_rgb_compact(color: Rgb) -> String {
    format!("rgb({},{},{})", color.red, color.green, color.blue)
}

/// Format as a `#rrggbb` hex string.
pub fn to_hex(color: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}

/// Convert to a ratatui terminal color.
pub fn to_terminal(color: Rgb) -> ratatui::style::Color {
    ratatui::style::Color::Rgb(color.red, color.green, color.blue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_and_functional_colors() {
        assert_eq!(parse_color("red").unwrap(), Srgb::new(255, 0, 0));
        assert_eq!(parse_color("rgb(0, 130, 9)").unwrap(), Srgb::new(0, 130, 9));
        assert_eq!(parse_color(" #FF0624 ").unwrap(), Srgb::new(255, 6, 36));
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            parse_color("not-a-color"),
            Err(SliderError::InvalidColor(_))
        ));
    }

    #[test]
    fn formats_css_and_hex() {
        let c = Srgb::new(128u8, 171, 8);
        assert_eq!(to_css_rgb(c), "rgb(128, 171, 8)");
        assert_eq!(to_css_rgb_compact(c), "rgb(128,171,8)");
        assert_eq!(to_hex(c), "#80ab08");
    }
}
