//! Prompt wording for every gateway operation.
//!
//! The campaign prompt asks for `Title:`, `Subtitle:` and `CTA:` lines;
//! [`CampaignCopy::parse`](crate::CampaignCopy::parse) depends on that shape.

/// Features used when the admin supplies none.
pub const DEFAULT_FEATURES: [&str; 3] = ["High Quality", "Modern Design", "Durable"];

pub fn campaign(topic: &str) -> String {
    format!(
        "Generate a high-end marketing campaign title, subtitle, and primary call-to-action \
         for a luxury brand. Theme: {topic}.\n\
         Return format:\n\
         Title: [Text]\n\
         Subtitle: [Text]\n\
         CTA: [Text]"
    )
}

pub fn product_description(name: &str, category: &str, features: &[String]) -> String {
    let features = if features.is_empty() {
        DEFAULT_FEATURES.join(", ")
    } else {
        features.join(", ")
    };
    format!(
        "Write a compelling, professional e-commerce product description for \"{name}\" \
         in the \"{category}\" category. Key features: {features}."
    )
}

pub fn product_image(subject: &str) -> String {
    format!(
        "A professional, studio-quality product photograph of {subject}, clean white \
         background, 4k, cinematic lighting."
    )
}

pub fn visual_search(inventory: &str) -> String {
    format!(
        "Analyze this image. Based on our inventory: [{inventory}], which product is most \
         similar? Explain why."
    )
}

pub fn shopping_assistant(query: &str, inventory: &str) -> String {
    format!(
        "You are a helpful shopping assistant for Lumina Luxe. Inventory: {inventory}. \
         User: {query}."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_campaign_requests_line_format() {
        let prompt = campaign("Midnight Gala");
        assert!(prompt.contains("Theme: Midnight Gala."));
        assert!(prompt.ends_with("Title: [Text]\nSubtitle: [Text]\nCTA: [Text]"));
    }

    #[test]
    fn test_description_defaults_features() {
        let prompt = product_description("Aura Lamp", "Home", &[]);
        assert_eq!(
            prompt,
            "Write a compelling, professional e-commerce product description for \"Aura Lamp\" \
             in the \"Home\" category. Key features: High Quality, Modern Design, Durable."
        );

        let prompt = product_description("Aura Lamp", "Home", &["Dimmable".to_string()]);
        assert!(prompt.ends_with("Key features: Dimmable."));
    }

    #[test]
    fn test_inventory_prompts() {
        assert_eq!(
            visual_search("Lamp (ID: 1)"),
            "Analyze this image. Based on our inventory: [Lamp (ID: 1)], which product is most \
             similar? Explain why."
        );
        assert_eq!(
            shopping_assistant("Gift ideas?", "Lamp ($10.00)"),
            "You are a helpful shopping assistant for Lumina Luxe. Inventory: Lamp ($10.00). \
             User: Gift ideas?."
        );
        assert!(product_image("a leather bag").contains("photograph of a leather bag, clean"));
    }
}
