//! Relevance pre-filter — ranks the catalog against user preferences.
//!
//! Pure, deterministic, no LLM call. The ranking is consumed only to pick
//! which catalog subset is shown to the model; it is never returned to
//! callers.

use crate::models::preferences::parse_price_range;
use crate::models::{Product, UserPreferences};

const CATEGORY_WEIGHT: f64 = 3.0;
const BRAND_WEIGHT: f64 = 2.0;
const PRICE_WEIGHT: f64 = 2.0;

/// Scores one product against the preferences. Additive:
/// +3 category match, +2 brand match, +2 price within `"min-max"` range
/// (inclusive), plus the product's rating unweighted.
///
/// A missing, `"all"`, or malformed `priceRange` contributes 0; malformed
/// input degrades the score, it never fails the request.
pub fn relevance_score(product: &Product, prefs: &UserPreferences) -> f64 {
    let mut score = 0.0;

    let categories = prefs.categories();
    if !categories.is_empty() && categories.contains(&product.category.as_str()) {
        score += CATEGORY_WEIGHT;
    }

    if prefs.brands().contains(&product.brand.as_str()) {
        score += BRAND_WEIGHT;
    }

    if let Some((min, max)) = prefs.price_range().and_then(parse_price_range) {
        if product.price >= min && product.price <= max {
            score += PRICE_WEIGHT;
        }
    }

    score + product.rating
}

/// Reorders the catalog by descending relevance. Stable: ties keep their
/// original catalog order. Output is always a permutation of the input.
pub fn rank_by_relevance<'a>(
    catalog: &'a [Product],
    prefs: &UserPreferences,
) -> Vec<&'a Product> {
    let mut scored: Vec<(&Product, f64)> = catalog
        .iter()
        .map(|product| (product, relevance_score(product, prefs)))
        .collect();

    // Stable sort; equal scores keep catalog order
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    scored.into_iter().map(|(product, _)| product).collect()
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

    fn make_prefs(categories: &[&str], brands: &[&str], price_range: Option<&str>) -> UserPreferences {
        let mut prefs = UserPreferences::new();
        if !categories.is_empty() {
            prefs.insert("categories", json!(categories));
        }
        if !brands.is_empty() {
            prefs.insert("brands", json!(brands));
        }
        if let Some(range) = price_range {
            prefs.insert("priceRange", json!(range));
        }
        prefs
    }

    #[test]
    fn test_full_match_scores_seven_plus_rating() {
        let product = make_product("p1", "audio", "Acme", 75.0, 4.5);
        let prefs = make_prefs(&["audio"], &["Acme"], Some("50-100"));
        assert_eq!(relevance_score(&product, &prefs), 7.0 + 4.5);
    }

    #[test]
    fn test_no_match_scores_rating_only() {
        let product = make_product("p1", "audio", "Acme", 75.0, 3.0);
        let prefs = make_prefs(&["footwear"], &["Other"], Some("200-300"));
        assert_eq!(relevance_score(&product, &prefs), 3.0);
    }

    #[test]
    fn test_empty_preferences_scores_rating_only() {
        let product = make_product("p1", "audio", "Acme", 75.0, 2.5);
        assert_eq!(relevance_score(&product, &UserPreferences::new()), 2.5);
    }

    #[test]
    fn test_price_range_bounds_are_inclusive() {
        let prefs = make_prefs(&[], &[], Some("50-100"));
        let at_min = make_product("p1", "audio", "Acme", 50.0, 0.0);
        let at_max = make_product("p2", "audio", "Acme", 100.0, 0.0);
        let outside = make_product("p3", "audio", "Acme", 100.01, 0.0);

        assert_eq!(relevance_score(&at_min, &prefs), 2.0);
        assert_eq!(relevance_score(&at_max, &prefs), 2.0);
        assert_eq!(relevance_score(&outside, &prefs), 0.0);
    }

    #[test]
    fn test_price_range_all_and_malformed_contribute_nothing() {
        let product = make_product("p1", "audio", "Acme", 75.0, 0.0);
        assert_eq!(relevance_score(&product, &make_prefs(&[], &[], Some("all"))), 0.0);
        assert_eq!(relevance_score(&product, &make_prefs(&[], &[], Some("cheap"))), 0.0);
    }

    #[test]
    fn test_rank_output_is_a_permutation() {
        let catalog = vec![
            make_product("p1", "audio", "Acme", 10.0, 1.0),
            make_product("p2", "footwear", "Brix", 20.0, 5.0),
            make_product("p3", "audio", "Acme", 30.0, 3.0),
        ];
        let prefs = make_prefs(&["audio"], &[], None);

        let ranked = rank_by_relevance(&catalog, &prefs);
        assert_eq!(ranked.len(), catalog.len());
        for product in &catalog {
            assert_eq!(
                ranked.iter().filter(|p| p.id == product.id).count(),
                1,
                "product {} must appear exactly once",
                product.id
            );
        }
    }

    #[test]
    fn test_rank_descending_with_stable_ties() {
        let catalog = vec![
            make_product("low", "other", "x", 10.0, 1.0),
            make_product("tie_a", "other", "x", 10.0, 2.0),
            make_product("tie_b", "other", "x", 10.0, 2.0),
            make_product("high", "audio", "x", 10.0, 2.0),
        ];
        let prefs = make_prefs(&["audio"], &[], None);

        let ids: Vec<&str> = rank_by_relevance(&catalog, &prefs)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["high", "tie_a", "tie_b", "low"]);
    }
}
