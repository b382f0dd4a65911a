// All LLM prompt constants for the recommendation pipeline.

/// System message sent before the main prompt to establish role framing.
pub const RECOMMENDATION_SYSTEM: &str =
    "You are an expert e-commerce product recommendation system. \
    Your task is to analyze user preferences and browsing history to \
    provide personalized product recommendations.";

/// Recommendation prompt template.
/// Replace: {preferences}, {browsed_products}, {available_products}
pub const RECOMMENDATION_PROMPT_TEMPLATE: &str = r#"Based on the following user preferences and browsing history, recommend 5 products from the catalog with explanations.

User Preferences:
{preferences}

Recently Viewed Products:
{browsed_products}

Available Products:
{available_products}

Please analyze the above information and recommend 5 products that best match the user's preferences and browsing patterns. Consider the following factors:
1. Direct matches with user preferences (category, price range, brand)
2. Similar products to those in browsing history
3. Complementary products based on browsing patterns
4. Popular products in preferred categories
5. Price range alignment with preferences

For each recommendation:
1. Provide a clear explanation of why the product is recommended
2. Reference specific user preferences or browsing patterns that influenced the recommendation
3. Consider product ratings and popularity
4. Ensure diversity in recommendations while maintaining relevance

Format your response as a JSON array with the following structure:
[
    {
        "product_id": "string",
        "explanation": "string",
        "score": number,
        "reasoning": {
            "preference_match": "string",
            "browsing_pattern": "string",
            "complementary_factor": "string"
        }
    }
]

Focus on providing diverse but relevant recommendations that match the user's interests."#;
