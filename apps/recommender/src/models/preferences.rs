use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Recognized preference keys. Anything else is stored and rendered into
/// the prompt verbatim, never rejected.
pub const KEY_CATEGORIES: &str = "categories";
pub const KEY_BRANDS: &str = "brands";
pub const KEY_PRICE_RANGE: &str = "priceRange";

/// User preferences as an insertion-ordered key/value mapping.
///
/// Prompt rendering iterates keys in the order they were supplied, so a
/// plain `BTreeMap`/`HashMap` is not enough. Updating an existing key keeps
/// its original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPreferences {
    entries: Vec<(String, Value)>,
}

impl UserPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        if let Some(existing) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            existing.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Preferred categories. Empty when the key is absent or not an array
    /// of strings.
    pub fn categories(&self) -> Vec<&str> {
        self.string_list(KEY_CATEGORIES)
    }

    /// Preferred brands. Same shape rules as `categories`.
    pub fn brands(&self) -> Vec<&str> {
        self.string_list(KEY_BRANDS)
    }

    /// The raw `priceRange` value, when present as a string
    /// (`"min-max"` or the literal `"all"`).
    pub fn price_range(&self) -> Option<&str> {
        self.get(KEY_PRICE_RANGE).and_then(Value::as_str)
    }

    fn string_list(&self, key: &str) -> Vec<&str> {
        match self.get(key) {
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }
}

/// Parses a `"min-max"` price range. Returns `None` for the literal
/// `"all"`, for anything that is not exactly two numeric parts, and for
/// non-numeric bounds; callers treat that as "no price constraint".
pub fn parse_price_range(raw: &str) -> Option<(f64, f64)> {
    if raw == "all" {
        return None;
    }
    let (min, max) = raw.split_once('-')?;
    let min = min.trim().parse::<f64>().ok()?;
    let max = max.trim().parse::<f64>().ok()?;
    Some((min, max))
}

// Custom serde keeps JSON document order; serde_json's default Map is
// sorted and would reorder keys on the way in.

impl Serialize for UserPreferences {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for UserPreferences {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PreferencesVisitor;

        impl<'de> Visitor<'de> for PreferencesVisitor {
            type Value = UserPreferences;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of preference keys to values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut prefs = UserPreferences::new();
                while let Some((key, value)) = access.next_entry::<String, Value>()? {
                    prefs.insert(key, value);
                }
                Ok(prefs)
            }
        }

        deserializer.deserialize_map(PreferencesVisitor)
    }
}
