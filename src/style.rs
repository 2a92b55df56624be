//! Inline `style` attribute codec.

use std::fmt;

/// Property declarations from a `style` attribute, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleMap {
    entries: Vec<(String, String)>,
}

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value.as_str())
    }

    /// Insert or overwrite a declaration. An overwritten property keeps its
    /// original position.
    pub fn insert(&mut self, property: impl Into<String>, value: impl Into<String>) {
        let property = property.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(name, _)| *name == property) {
            entry.1 = value;
        } else {
            self.entries.push((property, value));
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StyleMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = StyleMap::new();
        for (property, value) in iter {
            map.insert(property, value);
        }
        map
    }
}

/// A declaration that could not be read as `name:value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleWarning {
    /// No `:` in the declaration; it was kept as `name:0`.
    MissingColon { declaration: String },
    /// Nothing before the `:`; dropped.
    EmptyName { value: String },
    /// Nothing after the `:`; dropped.
    EmptyValue { property: String },
}

impl fmt::Display for StyleWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleWarning::MissingColon { declaration } => write!(
                f,
                "property or value missing in '{}', read as '{}:0'",
                declaration, declaration
            ),
            StyleWarning::EmptyName { value } => {
                write!(f, "property with no name (value '{}'), removed", value)
            }
            StyleWarning::EmptyValue { property } => {
                write!(f, "property '{}' has no value, removed", property)
            }
        }
    }
}

/// Parse a `style` attribute. Malformed declarations are reported, never fatal;
/// a repeated property keeps the last value.
pub fn decode(text: &str) -> (StyleMap, Vec<StyleWarning>) {
    let mut map = StyleMap::new();
    let mut warnings = Vec::new();

    for decl in text.split(';') {
        let decl = decl.trim();
        if decl.is_empty() {
            continue;
        }

        let (property, value) = match decl.split_once(':') {
            Some((property, value)) => (property.trim(), value.trim()),
            None => {
                warnings.push(StyleWarning::MissingColon {
                    declaration: decl.to_string(),
                });
                (decl, "0")
            }
        };

        if property.is_empty() {
            warnings.push(StyleWarning::EmptyName {
                value: value.to_string(),
            });
        } else if value.is_empty() {
            warnings.push(StyleWarning::EmptyValue {
                property: property.to_string(),
            });
        } else {
            map.insert(property, value);
        }
    }

    (map, warnings)
}

/// Serialize a style map back to attribute text. An empty map gives "".
pub fn encode(style: &StyleMap) -> String {
    style.to_string()
}

impl fmt::Display for StyleMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write!(f, "{}:{}", name, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_trims_and_keeps_order() {
        let (map, warnings) = decode(" stroke-width : 2px ;fill:red; opacity:0.5 ");
        assert!(warnings.is_empty());
        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(
            pairs,
            [("stroke-width", "2px"), ("fill", "red"), ("opacity", "0.5")]
        );
    }

    #[test]
    fn test_decode_empty_segments_are_silent() {
        let (map, warnings) = decode(";fill:red;;");
        assert!(warnings.is_empty());
        assert_eq!(map.len(), 1);

        let (map, warnings) = decode("   ");
        assert!(warnings.is_empty());
        assert!(map.is_empty());
    }

    #[test]
    fn test_decode_last_duplicate_wins_in_first_position() {
        let (map, _) = decode("fill:red;stroke:blue;fill:green");
        assert_eq!(map.get("fill"), Some("green"));
        assert_eq!(encode(&map), "fill:green;stroke:blue");
    }

    #[test]
    fn test_decode_splits_on_first_colon() {
        let (map, _) = decode("fill:url(data:image/png;base64)");
        // the `;` inside the url still splits; only the first `:` separates
        assert_eq!(map.get("fill"), Some("url(data:image/png"));
    }

    #[test]
    fn test_decode_missing_colon_defaults_to_zero() {
        let (map, warnings) = decode("stroke-dashoffset;fill:red");
        assert_eq!(map.get("stroke-dashoffset"), Some("0"));
        assert_eq!(
            warnings,
            [StyleWarning::MissingColon {
                declaration: "stroke-dashoffset".into()
            }]
        );
    }

    #[test]
    fn test_decode_drops_empty_name_and_value() {
        let (map, warnings) = decode(":red;fill: ;stroke:none");
        assert_eq!(encode(&map), "stroke:none");
        assert_eq!(
            warnings,
            [
                StyleWarning::EmptyName {
                    value: "red".into()
                },
                StyleWarning::EmptyValue {
                    property: "fill".into()
                },
            ]
        );
    }

    #[test]
    fn test_encode() {
        assert_eq!(encode(&StyleMap::new()), "");
        let map: StyleMap = [("fill", "red"), ("stroke", "none")].into_iter().collect();
        assert_eq!(encode(&map), "fill:red;stroke:none");
    }

    #[test]
    fn test_warning_messages_name_the_property() {
        let msg = StyleWarning::EmptyValue {
            property: "fill".into(),
        }
        .to_string();
        assert!(msg.contains("'fill'"));
    }
}
