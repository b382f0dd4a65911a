use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A catalog product. Owned by the external catalog collaborator and
/// immutable for the duration of a request.
///
/// Fields beyond the recommendation-relevant core are captured in
/// `attributes` so the full record round-trips into enriched entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique within the catalog supplied for one call.
    pub id: String,
    pub name: String,
    pub category: String,
    pub brand: String,
    pub price: f64,
    /// Treated as 0 when the catalog omits it.
    #[serde(default)]
    pub rating: f64,
    #[serde(flatten, default, skip_serializing_if = "Map::is_empty")]
    pub attributes: Map<String, Value>,
}

/// Looks a product up by exact identifier match. First match wins.
pub fn find_by_id<'a>(catalog: &'a [Product], id: &str) -> Option<&'a Product> {
    catalog.iter().find(|p| p.id == id)
}
