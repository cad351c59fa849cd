//! Style Merger - deterministic two-layer style resolution.
//!
//! A component supplies `default_styles` (its baseline look) and the caller
//! supplies `styles` (per-instance overrides). [`merge`] folds the two into
//! one flat map: union of keys, override wins on collision, no deep merge.
//!
//! Maps are ordered (insertion order preserved) so the merged result - and
//! the markup the renderer emits from it - is deterministic: defaults keep
//! their positions, override-only keys append in their own order.

use crate::error::RenderError;

// =============================================================================
// Style Value
// =============================================================================

/// A single style declaration value.
///
/// Scalar by construction: there is no variant for a nested mapping, so the
/// only malformed shapes left to reject at runtime are compound strings
/// smuggling extra declarations.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    /// Textual value (`"red"`, `"1rem"`, `"flex-start"`).
    Keyword(String),
    /// Unitless numeric value (`1.5`, `0`).
    Number(f64),
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        Self::Keyword(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        Self::Keyword(value)
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for StyleValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

// =============================================================================
// Style Map
// =============================================================================

/// Ordered mapping of style property name to value.
///
/// # Example
///
/// ```ignore
/// use spark_ui::StyleMap;
///
/// let styles = StyleMap::new()
///     .with("color", "red")
///     .with("margin", "1rem");
/// assert_eq!(styles.to_inline(), "color:red;margin:1rem");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyleMap {
    entries: Vec<(String, StyleValue)>,
}

impl StyleMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of declarations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no declarations.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a declaration by property name.
    pub fn get(&self, key: &str) -> Option<&StyleValue> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    /// Whether a property is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Insert or replace a declaration.
    ///
    /// Replacing keeps the property's original position so later writers
    /// cannot reorder earlier declarations.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<StyleValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(name, _)| *name == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder-style [`StyleMap::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Iterate declarations in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Iterate property names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Serialize as an inline style attribute value.
    pub fn to_inline(&self) -> String {
        let mut out = String::new();
        for (name, value) in self.iter() {
            if !out.is_empty() {
                out.push(';');
            }
            out.push_str(name);
            out.push(':');
            match value {
                StyleValue::Keyword(text) => out.push_str(text),
                StyleValue::Number(number) => out.push_str(&number.to_string()),
            }
        }
        out
    }
}

impl FromIterator<(String, StyleValue)> for StyleMap {
    fn from_iter<I: IntoIterator<Item = (String, StyleValue)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.set(key, value);
        }
        map
    }
}

// =============================================================================
// Merge
// =============================================================================

/// Merge a default layer and an override layer into one map.
///
/// Absent input is the empty map. Keys present in exactly one input pass
/// through unchanged; on collision the override (`styles`) value wins.
/// Flat, single-level union - no deep merge, no concatenation.
pub fn merge(defaults: Option<&StyleMap>, overrides: Option<&StyleMap>) -> StyleMap {
    let mut merged = defaults.cloned().unwrap_or_default();
    if let Some(overrides) = overrides {
        for (key, value) in overrides.iter() {
            merged.set(key, value.clone());
        }
    }
    merged
}

// =============================================================================
// Validation
// =============================================================================

/// Reject malformed declarations instead of coercing them.
pub fn validate(map: &StyleMap) -> Result<(), RenderError> {
    for (key, value) in map.iter() {
        if key.trim().is_empty() {
            return Err(RenderError::MalformedStyle {
                key: key.to_string(),
                reason: "empty property name".to_string(),
            });
        }
        if key.contains([':', ';', '{', '}']) {
            return Err(RenderError::MalformedStyle {
                key: key.to_string(),
                reason: "property name must be a bare identifier".to_string(),
            });
        }
        if let StyleValue::Keyword(text) = value {
            if text.trim().is_empty() {
                return Err(RenderError::MalformedStyle {
                    key: key.to_string(),
                    reason: "empty value".to_string(),
                });
            }
            if text.contains([';', '{', '}']) {
                return Err(RenderError::MalformedStyle {
                    key: key.to_string(),
                    reason: "value must be a single scalar declaration".to_string(),
                });
            }
        }
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
