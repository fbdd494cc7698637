//! Domain types for the Storyblok content-delivery API.
//!
//! These mirror the envelope the CDN returns: a `story` (or `stories`)
//! wrapper around a nested content object. Product content is authored
//! loosely, so decoding is tolerant: unknown fields are ignored, prices
//! accept numbers or numeric strings, and the `price`/`Price` casing
//! inconsistency between space variants is absorbed with an alias.

use serde::{Deserialize, Serialize};

use coral_core::Price;

/// An uploaded asset reference (product imagery).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Public URL of the uploaded file.
    pub filename: String,
}

/// One product block as authored in Storyblok.
///
/// A detail story carries these fields directly in its content object; a
/// listing story nests one block per product under `body`. The display
/// `name` doubles as the cart identifier, so two products sharing a name
/// collide in the cart.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Block type discriminator (`"product"` for product blocks).
    #[serde(default)]
    pub component: Option<String>,
    /// Display name; doubles as the cart key.
    #[serde(default)]
    pub name: String,
    /// Marketing copy.
    #[serde(default)]
    pub description: String,
    /// Unit price; absent or malformed values coerce to zero.
    #[serde(default, alias = "Price")]
    pub price: Price,
    /// Product image, if one was uploaded.
    #[serde(default)]
    pub image: Option<Asset>,
    /// Nested blocks (listing stories put one product block per entry here).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub body: Vec<ProductRecord>,
}

impl ProductRecord {
    /// Whether this block is a product block.
    #[must_use]
    pub fn is_product(&self) -> bool {
        self.component.as_deref() == Some("product")
    }

    /// The image URL, if an asset is attached.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image.as_ref().map(|a| a.filename.as_str())
    }

    /// Consume the record, keeping only nested product blocks.
    #[must_use]
    pub fn into_product_blocks(self) -> Vec<Self> {
        self.body.into_iter().filter(Self::is_product).collect()
    }
}

/// A Storyblok story: name, slug, and nested content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    /// Story name as shown in the space.
    pub name: String,
    /// URL slug the story was requested by.
    pub slug: String,
    /// The authored content object.
    #[serde(default)]
    pub content: ProductRecord,
}

/// Envelope for a single-story response.
#[derive(Debug, Clone, Deserialize)]
pub struct StoryEnvelope {
    pub story: Story,
}

/// Envelope for a story-list response.
#[derive(Debug, Clone, Deserialize)]
pub struct StoriesEnvelope {
    pub stories: Vec<Story>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_story_decodes_with_string_price() {
        let json = r#"{
            "story": {
                "name": "Beach Towel",
                "slug": "beach-towel",
                "content": {
                    "component": "product",
                    "name": "Beach Towel",
                    "description": "Oversized and quick-drying.",
                    "price": "12.50",
                    "image": { "filename": "https://a.storyblok.com/f/1/towel.jpg" }
                }
            }
        }"#;

        let envelope: StoryEnvelope = serde_json::from_str(json).unwrap();
        let record = envelope.story.content;
        assert!(record.is_product());
        assert_eq!(record.price, Price::new(12.5));
        assert_eq!(
            record.image_url(),
            Some("https://a.storyblok.com/f/1/towel.jpg")
        );
    }

    #[test]
    fn test_uppercase_price_alias() {
        let json = r#"{ "component": "product", "name": "Snorkel", "Price": 25 }"#;
        let record: ProductRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.price, Price::new(25.0));
    }

    #[test]
    fn test_absent_price_coerces_to_zero() {
        let json = r#"{ "component": "product", "name": "Sticker" }"#;
        let record: ProductRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.price, Price::ZERO);
    }

    #[test]
    fn test_listing_story_filters_product_blocks() {
        let json = r#"{
            "story": {
                "name": "Products",
                "slug": "product",
                "content": {
                    "component": "page",
                    "body": [
                        { "component": "product", "name": "Beach Towel", "price": 12.5 },
                        { "component": "hero", "name": "Summer Sale" },
                        { "component": "product", "name": "Snorkel", "price": "25" }
                    ]
                }
            }
        }"#;

        let envelope: StoryEnvelope = serde_json::from_str(json).unwrap();
        let products = envelope.story.content.into_product_blocks();

        let names: Vec<_> = products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Beach Towel", "Snorkel"]);
        assert_eq!(products[1].price, Price::new(25.0));
    }

    #[test]
    fn test_stories_envelope_decodes() {
        let json = r#"{
            "stories": [
                { "name": "Beach Towel", "slug": "products/beach-towel", "content": {} },
                { "name": "Snorkel", "slug": "products/snorkel", "content": {} }
            ]
        }"#;

        let envelope: StoriesEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.stories.len(), 2);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let json = r#"{ "component": "product", "name": "Towel", "_uid": "abc", "_editable": "" }"#;
        let record: ProductRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.name, "Towel");
    }
}
