#![forbid(unsafe_code)]

//! Translate-style helpers.
//!
//! Hosts that store an element's offset as a CSS-like
//! `translate(Xpx, Ypx)` string use these to read and write it.

use std::sync::LazyLock;

use framedrag_core::geometry::GeometryState;
use regex_lite::Regex;

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?\d+(?:\.\d+)?").expect("number regex"));

/// Parse the offset out of a `translate(...)` transform.
///
/// Returns `(0, 0)` when the string holds no `translate`. A missing second
/// component reads as `0`.
#[must_use]
pub fn parse_translate(transform: &str) -> (f64, f64) {
    if !transform.contains("translate") {
        return (0.0, 0.0);
    }
    let mut numbers = NUMBER
        .find_iter(transform)
        .map(|m| m.as_str().parse::<f64>().unwrap_or(0.0));
    let x = numbers.next().unwrap_or(0.0);
    let y = numbers.next().unwrap_or(0.0);
    (x, y)
}

/// Format an offset as `translate(Xpx, Ypx)`.
#[must_use]
pub fn format_translate(x: f64, y: f64) -> String {
    format!("translate({x}px, {y}px)")
}

/// Inline style for a moved/resized element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleDecl {
    pub transform: String,
    /// `None` when the width is unset or zero.
    pub width: Option<String>,
    /// `None` when the height is unset or zero.
    pub height: Option<String>,
}

/// Render a geometry state as inline style.
#[must_use]
pub fn rect_to_style(state: &GeometryState) -> StyleDecl {
    let px = |v: Option<f64>| v.filter(|v| *v != 0.0).map(|v| format!("{v}px"));
    StyleDecl {
        transform: format_translate(state.x, state.y),
        width: px(state.width),
        height: px(state.height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_integer_offsets() {
        assert_eq!(parse_translate("translate(30px, -10px)"), (30.0, -10.0));
    }

    #[test]
    fn parses_fractional_offsets() {
        assert_eq!(parse_translate("translate(12.5px, -0.25px)"), (12.5, -0.25));
    }

    #[test]
    fn loose_spacing_and_signs() {
        assert_eq!(parse_translate("translate( -12px ,  8.75px )"), (-12.0, 8.75));
    }

    #[test]
    fn non_translate_transform_is_origin() {
        assert_eq!(parse_translate(""), (0.0, 0.0));
        assert_eq!(parse_translate("rotate(45deg)"), (0.0, 0.0));
    }

    #[test]
    fn single_component_defaults_y() {
        assert_eq!(parse_translate("translateX(7px)"), (7.0, 0.0));
    }

    #[test]
    fn format_round_trips() {
        let s = format_translate(30.0, -10.0);
        assert_eq!(s, "translate(30px, -10px)");
        assert_eq!(parse_translate(&s), (30.0, -10.0));
    }

    #[test]
    fn style_omits_zero_size() {
        let style = rect_to_style(&GeometryState {
            width: Some(0.0),
            ..GeometryState::sized(1.0, 2.0, 0.0, 40.0)
        });
        assert_eq!(style.transform, "translate(1px, 2px)");
        assert_eq!(style.width, None);
        assert_eq!(style.height.as_deref(), Some("40px"));
        assert_eq!(rect_to_style(&GeometryState::offset(0.0, 0.0)).width, None);
    }
}
