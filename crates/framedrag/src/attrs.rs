#![forbid(unsafe_code)]

//! Declarative window attributes.
//!
//! Hosts that configure windows through string attributes (markup, config
//! maps) parse them here. Numeric attributes that fail to parse become `0`;
//! absent attributes stay `None` so engine defaults still apply.

use std::collections::HashMap;
use std::hash::BuildHasher;

use ahash::AHashMap;
use framedrag_core::geometry::Bounds;
use framedrag_core::resize::Constraints;

/// Default attribute prefix.
pub const DEFAULT_PREFIX: &str = "window";

/// Read-only string attribute lookup.
pub trait AttrSource {
    fn attr(&self, name: &str) -> Option<&str>;
}

impl<H: BuildHasher> AttrSource for HashMap<String, String, H> {
    fn attr(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl AttrSource for AHashMap<String, String> {
    fn attr(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl AttrSource for [(&str, &str)] {
    fn attr(&self, name: &str) -> Option<&str> {
        self.iter().find(|(k, _)| *k == name).map(|(_, v)| *v)
    }
}

/// Parsed window options.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WindowAttrs {
    /// Selector of the drag handle inside the window.
    pub header: Option<String>,
    pub min_width: Option<f64>,
    pub min_height: Option<f64>,
    pub max_width: Option<f64>,
    pub max_height: Option<f64>,
    pub top: Option<f64>,
    pub right: Option<f64>,
    pub bottom: Option<f64>,
    pub left: Option<f64>,
}

/// Lenient number parsing: anything unparsable is `0`.
fn number(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

impl WindowAttrs {
    /// Parse from `source`, reading `<prefix>-<name>` for each option.
    ///
    /// `None` uses [`DEFAULT_PREFIX`]; `Some("")` reads bare names.
    pub fn from_source<A: AttrSource + ?Sized>(source: &A, prefix: Option<&str>) -> Self {
        let prefix = prefix.unwrap_or(DEFAULT_PREFIX);
        let key = |name: &str| {
            if prefix.is_empty() {
                name.to_owned()
            } else {
                format!("{prefix}-{name}")
            }
        };
        let text = |name: &str| source.attr(&key(name)).map(str::to_owned);
        let num = |name: &str| source.attr(&key(name)).map(number);

        Self {
            header: text("header"),
            min_width: num("min-width"),
            min_height: num("min-height"),
            max_width: num("max-width"),
            max_height: num("max-height"),
            top: num("top"),
            right: num("right"),
            bottom: num("bottom"),
            left: num("left"),
        }
    }

    #[must_use]
    pub fn constraints(&self) -> Constraints {
        Constraints {
            min_width: self.min_width,
            min_height: self.min_height,
            max_width: self.max_width,
            max_height: self.max_height,
        }
    }

    /// Pointer-travel insets.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        Bounds {
            top: self.top,
            right: self.right,
            bottom: self.bottom,
            left: self.left,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_prefixed_attributes() {
        let source: &[(&str, &str)] = &[
            ("window-header", ".title"),
            ("window-min-width", "100"),
            ("window-max-height", " 640 "),
            ("window-top", "10"),
        ];
        let attrs = WindowAttrs::from_source(source, None);
        assert_eq!(attrs.header.as_deref(), Some(".title"));
        assert_eq!(attrs.min_width, Some(100.0));
        assert_eq!(attrs.max_height, Some(640.0));
        assert_eq!(attrs.top, Some(10.0));
        assert_eq!(attrs.left, None);
        assert_eq!(attrs.min_height, None);
    }

    #[test]
    fn unparsable_numbers_become_zero() {
        let source: &[(&str, &str)] = &[("window-min-width", "abc"), ("window-left", "")];
        let attrs = WindowAttrs::from_source(source, None);
        assert_eq!(attrs.min_width, Some(0.0));
        assert_eq!(attrs.left, Some(0.0));
        // Zero still falls back to the engine default.
        assert_eq!(attrs.constraints().effective_min_width(), 34.0);
    }

    #[test]
    fn custom_and_empty_prefix() {
        let mut map = HashMap::new();
        map.insert("pane-right".to_owned(), "5".to_owned());
        map.insert("bottom".to_owned(), "7".to_owned());
        assert_eq!(WindowAttrs::from_source(&map, Some("pane")).right, Some(5.0));
        assert_eq!(WindowAttrs::from_source(&map, Some("")).bottom, Some(7.0));
    }

    #[test]
    fn bounds_and_constraints_mirror_fields() {
        let mut map = AHashMap::new();
        map.insert("window-right".to_owned(), "20".to_owned());
        map.insert("window-max-width".to_owned(), "900".to_owned());
        let attrs = WindowAttrs::from_source(&map, None);
        assert_eq!(attrs.bounds().right, Some(20.0));
        assert_eq!(attrs.bounds().top, None);
        assert_eq!(attrs.constraints().max_width, Some(900.0));
    }
}
