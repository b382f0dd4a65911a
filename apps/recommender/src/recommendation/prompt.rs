//! Prompt construction — renders preferences, browsing history, and the
//! relevance-ranked catalog subset into the fixed instructional template.

use serde_json::Value;
use tracing::debug;

use crate::errors::AppError;
use crate::models::{Product, UserPreferences};
use crate::recommendation::prompts::RECOMMENDATION_PROMPT_TEMPLATE;
use crate::recommendation::relevance::rank_by_relevance;

/// Catalog entries shown to the model. Keeps the prompt inside the output
/// budget regardless of catalog size.
pub const MAX_CANDIDATE_PRODUCTS: usize = 20;

/// Builds the recommendation prompt.
///
/// `browsed` is the browsing history already resolved to product records;
/// the candidate section is the top `MAX_CANDIDATE_PRODUCTS` of the
/// relevance-ranked catalog. An unusable prompt cannot proceed, so this is
/// the one pipeline step that propagates an error upward.
pub fn build_recommendation_prompt(
    prefs: &UserPreferences,
    browsed: &[&Product],
    catalog: &[Product],
) -> Result<String, AppError> {
    let preferences_text = render_preferences(prefs)?;
    let browsed_text = render_browsed(browsed);

    let ranked = rank_by_relevance(catalog, prefs);
    let available_text = render_candidates(&ranked);

    let prompt = RECOMMENDATION_PROMPT_TEMPLATE
        .replace("{preferences}", &preferences_text)
        .replace("{browsed_products}", &browsed_text)
        .replace("{available_products}", &available_text);

    debug!(
        "Built recommendation prompt: {} preference keys, {} browsed, {} candidates",
        prefs.len(),
        browsed.len(),
        ranked.len().min(MAX_CANDIDATE_PRODUCTS)
    );

    Ok(prompt)
}

/// Renders preferences as `- key: value` lines in insertion order.
fn render_preferences(prefs: &UserPreferences) -> Result<String, AppError> {
    let lines = prefs
        .iter()
        .map(|(key, value)| Ok(format!("- {key}: {}", render_value(value)?)))
        .collect::<Result<Vec<_>, AppError>>()?;
    Ok(lines.join("\n"))
}

fn render_browsed(browsed: &[&Product]) -> String {
    browsed
        .iter()
        .map(|p| {
            format!(
                "- {} (Category: {}, Price: ${}, Brand: {})",
                p.name, p.category, p.price, p.brand
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_candidates(ranked: &[&Product]) -> String {
    ranked
        .iter()
        .take(MAX_CANDIDATE_PRODUCTS)
        .map(|p| {
            format!(
                "- {} (ID: {}, Category: {}, Price: ${}, Brand: {}, Rating: {})",
                p.name, p.id, p.category, p.price, p.brand, p.rating
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders a preference value for the prompt: strings bare, string arrays
/// comma-joined, anything else as compact JSON.
fn render_value(value: &Value) -> Result<String, AppError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Array(items) if items.iter().all(Value::is_string) => Ok(items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", ")),
        other => serde_json::to_string(other)
            .map_err(|e| AppError::Prompt(format!("Failed to render preference value: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    fn make_product(id: &str, category: &str, brand: &str, price: f64, rating: f64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            category: category.to_string(),
            brand: brand.to_string(),
            price,
            rating,
            attributes: Map::new(),
        }
    }

    #[test]
    fn test_every_preference_key_is_rendered() {
        let mut prefs = UserPreferences::new();
        prefs.insert("categories", json!(["audio", "footwear"]));
        prefs.insert("priceRange", json!("50-100"));
        prefs.insert("favoriteColor", json!("green"));

        let prompt = build_recommendation_prompt(&prefs, &[], &[]).unwrap();
        assert!(prompt.contains("- categories: audio, footwear"));
        assert!(prompt.contains("- priceRange: 50-100"));
        assert!(prompt.contains("- favoriteColor: green"));
    }

    #[test]
    fn test_non_string_preference_values_render_as_json() {
        let mut prefs = UserPreferences::new();
        prefs.insert("maxResults", json!(5));
        prefs.insert("inStock", json!(true));
        prefs.insert("budget", json!({"max": 200}));

        let prompt = build_recommendation_prompt(&prefs, &[], &[]).unwrap();
        assert!(prompt.contains("- maxResults: 5"));
        assert!(prompt.contains("- inStock: true"));
        assert!(prompt.contains(r#"- budget: {"max":200}"#));
    }

    #[test]
    fn test_candidate_lines_capped_at_twenty() {
        let catalog: Vec<Product> = (0..30)
            .map(|i| make_product(&format!("p{i}"), "audio", "Acme", 10.0, 0.0))
            .collect();

        let prompt =
            build_recommendation_prompt(&UserPreferences::new(), &[], &catalog).unwrap();
        let candidate_lines = prompt.lines().filter(|l| l.contains("(ID: ")).count();
        assert_eq!(candidate_lines, 20);
    }

    #[test]
    fn test_candidates_are_relevance_ordered() {
        let catalog = vec![
            make_product("plain", "other", "x", 10.0, 0.0),
            make_product("match", "audio", "x", 10.0, 0.0),
        ];
        let mut prefs = UserPreferences::new();
        prefs.insert("categories", json!(["audio"]));

        let prompt = build_recommendation_prompt(&prefs, &[], &catalog).unwrap();
        let match_pos = prompt.find("(ID: match").unwrap();
        let plain_pos = prompt.find("(ID: plain").unwrap();
        assert!(match_pos < plain_pos, "matching product must be listed first");
    }

    #[test]
    fn test_browsed_section_renders_resolved_products() {
        let viewed = make_product("p1", "audio", "Acme", 49.5, 4.0);
        let prompt = build_recommendation_prompt(&UserPreferences::new(), &[&viewed], &[]).unwrap();
        assert!(prompt.contains("- Product p1 (Category: audio, Price: $49.5, Brand: Acme)"));
    }

    #[test]
    fn test_empty_inputs_still_build_a_prompt() {
        let prompt =
            build_recommendation_prompt(&UserPreferences::new(), &[], &[]).unwrap();
        assert!(prompt.contains("User Preferences:"));
        assert!(prompt.contains("Recently Viewed Products:"));
        assert!(prompt.contains("Available Products:"));
        assert!(prompt.contains("\"product_id\""));
    }

    #[test]
    fn test_template_placeholders_fully_substituted() {
        let prompt =
            build_recommendation_prompt(&UserPreferences::new(), &[], &[]).unwrap();
        assert!(!prompt.contains("{preferences}"));
        assert!(!prompt.contains("{browsed_products}"));
        assert!(!prompt.contains("{available_products}"));
    }
}
