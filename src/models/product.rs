use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

/// One block of the long-form product description. The discriminant is
/// explicit so clients never have to sniff whether a block is a bare
/// string or an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentBlock {
    Text { text: String },
    Image { image: String },
    Gallery { images: Vec<String> },
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub page_count: i32,
    pub age_range: Option<String>,
    pub content_blocks: Json<Vec<ContentBlock>>,
    pub enabled: bool,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProductImage {
    pub product_id: i32,
    pub image_uuid: Uuid,
    pub extension: String,
    pub is_primary: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    #[serde(flatten)]
    pub product: Product,
    pub image_urls: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub page_count: Option<i32>,
    pub age_range: Option<String>,
    pub content_blocks: Option<Vec<ContentBlock>>,
    pub enabled: Option<bool>,
    pub display_order: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::ContentBlock;

    #[test]
    fn content_blocks_deserialize_by_discriminant() {
        let raw = r#"[
            {"kind": "text", "text": "Printed on thick 120gsm paper."},
            {"kind": "image", "image": "aplus/spread-1.webp"},
            {"kind": "gallery", "images": ["aplus/p1.webp", "aplus/p2.webp"]}
        ]"#;

        let blocks: Vec<ContentBlock> = serde_json::from_str(raw).unwrap();

        assert_eq!(blocks.len(), 3);
        assert_eq!(
            blocks[0],
            ContentBlock::Text {
                text: "Printed on thick 120gsm paper.".to_string()
            }
        );
        assert!(matches!(blocks[2], ContentBlock::Gallery { ref images } if images.len() == 2));
    }

    #[test]
    fn untagged_block_is_rejected() {
        // the old duck-typed shape (a bare string) must not parse
        let raw = r#"["just a string"]"#;
        assert!(serde_json::from_str::<Vec<ContentBlock>>(raw).is_err());
    }

    #[test]
    fn content_blocks_round_trip() {
        let blocks = vec![
            ContentBlock::Gallery {
                images: vec!["a.webp".to_string(), "b.webp".to_string()],
            },
            ContentBlock::Text {
                text: "32 pages".to_string(),
            },
        ];

        let json = serde_json::to_string(&blocks).unwrap();
        assert!(json.contains(r#""kind":"gallery""#));

        let back: Vec<ContentBlock> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, blocks);
    }
}
