// file: src/notion/wire.rs
// description: serde types for the Notion block and page JSON shapes
// reference: https://developers.notion.com/reference/block

use crate::content::{Block, HeadingLevel};
use crate::notion::properties::{PageProperty, SelectOption};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One rich-text span. Requests carry `text.content`; responses carry the
/// rendered `plain_text` alongside.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RichText {
    #[serde(rename = "type", default = "text_kind")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextContent>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub plain_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextContent {
    pub content: String,
}

fn text_kind() -> String {
    "text".to_string()
}

impl RichText {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: text_kind(),
            text: Some(TextContent {
                content: content.into(),
            }),
            plain_text: String::new(),
        }
    }
}

/// Concatenates the plain text of a span list, the way every original
/// handler read block content.
pub fn plain_text(spans: &[RichText]) -> String {
    spans
        .iter()
        .map(|span| {
            if span.plain_text.is_empty() {
                span.text
                    .as_ref()
                    .map(|t| t.content.as_str())
                    .unwrap_or("")
            } else {
                span.plain_text.as_str()
            }
        })
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RichTextPayload {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
}

impl RichTextPayload {
    fn from_text(text: &str) -> Self {
        Self {
            rich_text: vec![RichText::text(text)],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodePayload {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Block payload keyed by the store's `type` discriminator. Types outside the
/// supported vocabulary land in `Unsupported`, which keeps every downstream
/// match exhaustive instead of silently defaulting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BlockPayload {
    #[serde(rename = "paragraph")]
    Paragraph { paragraph: RichTextPayload },
    #[serde(rename = "heading_1")]
    Heading1 { heading_1: RichTextPayload },
    #[serde(rename = "heading_2")]
    Heading2 { heading_2: RichTextPayload },
    #[serde(rename = "heading_3")]
    Heading3 { heading_3: RichTextPayload },
    #[serde(rename = "bulleted_list_item")]
    BulletedListItem { bulleted_list_item: RichTextPayload },
    #[serde(rename = "numbered_list_item")]
    NumberedListItem { numbered_list_item: RichTextPayload },
    #[serde(rename = "code")]
    Code { code: CodePayload },
    #[serde(rename = "quote")]
    Quote { quote: RichTextPayload },
    #[serde(other)]
    Unsupported,
}

impl BlockPayload {
    pub fn from_block(block: &Block) -> Self {
        match block {
            Block::Paragraph { text } => BlockPayload::Paragraph {
                paragraph: RichTextPayload::from_text(text),
            },
            Block::Heading {
                level: HeadingLevel::H1,
                text,
            } => BlockPayload::Heading1 {
                heading_1: RichTextPayload::from_text(text),
            },
            Block::Heading {
                level: HeadingLevel::H2,
                text,
            } => BlockPayload::Heading2 {
                heading_2: RichTextPayload::from_text(text),
            },
            Block::Heading {
                level: HeadingLevel::H3,
                text,
            } => BlockPayload::Heading3 {
                heading_3: RichTextPayload::from_text(text),
            },
            Block::BulletItem { text } => BlockPayload::BulletedListItem {
                bulleted_list_item: RichTextPayload::from_text(text),
            },
            Block::NumberedItem { text } => BlockPayload::NumberedListItem {
                numbered_list_item: RichTextPayload::from_text(text),
            },
            Block::CodeBlock { language, text } => BlockPayload::Code {
                code: CodePayload {
                    rich_text: vec![RichText::text(text)],
                    language: language.clone(),
                },
            },
            Block::Quote { text } => BlockPayload::Quote {
                quote: RichTextPayload::from_text(text),
            },
        }
    }

    /// Maps a wire payload into the domain vocabulary. `Unsupported` types
    /// contribute nothing.
    pub fn to_block(&self) -> Option<Block> {
        match self {
            BlockPayload::Paragraph { paragraph } => Some(Block::Paragraph {
                text: plain_text(&paragraph.rich_text),
            }),
            BlockPayload::Heading1 { heading_1 } => Some(Block::Heading {
                level: HeadingLevel::H1,
                text: plain_text(&heading_1.rich_text),
            }),
            BlockPayload::Heading2 { heading_2 } => Some(Block::Heading {
                level: HeadingLevel::H2,
                text: plain_text(&heading_2.rich_text),
            }),
            BlockPayload::Heading3 { heading_3 } => Some(Block::Heading {
                level: HeadingLevel::H3,
                text: plain_text(&heading_3.rich_text),
            }),
            BlockPayload::BulletedListItem { bulleted_list_item } => Some(Block::BulletItem {
                text: plain_text(&bulleted_list_item.rich_text),
            }),
            BlockPayload::NumberedListItem { numbered_list_item } => Some(Block::NumberedItem {
                text: plain_text(&numbered_list_item.rich_text),
            }),
            BlockPayload::Code { code } => Some(Block::CodeBlock {
                language: code.language.clone(),
                text: plain_text(&code.rich_text),
            }),
            BlockPayload::Quote { quote } => Some(Block::Quote {
                text: plain_text(&quote.rich_text),
            }),
            BlockPayload::Unsupported => None,
        }
    }
}

/// A block as returned by the children-list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockObject {
    pub id: String,
    #[serde(default)]
    pub has_children: bool,
    #[serde(flatten)]
    pub payload: BlockPayload,
}

/// A block being appended as a page child.
#[derive(Debug, Clone, Serialize)]
pub struct NewBlock {
    pub object: &'static str,
    #[serde(flatten)]
    pub payload: BlockPayload,
}

impl NewBlock {
    pub fn from_block(block: &Block) -> Self {
        Self {
            object: "block",
            payload: BlockPayload::from_block(block),
        }
    }
}

/// Cursor-paginated list envelope shared by block-list and database-query
/// responses.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginatedList<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    pub id: String,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub created_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_edited_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub properties: HashMap<String, PageProperty>,
}

/// Database schema as returned by the retrieve endpoint, reduced to the
/// property metadata the facade inspects.
#[derive(Debug, Clone, Deserialize)]
pub struct Database {
    pub id: String,
    #[serde(default)]
    pub properties: HashMap<String, DatabaseProperty>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseProperty {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub multi_select: Option<MultiSelectSchema>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MultiSelectSchema {
    #[serde(default)]
    pub options: Vec<SelectOption>,
}

/// Error body returned by the API on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_paragraph_round_trips_through_wire_shape() {
        let wire = json!({
            "object": "block",
            "id": "b1",
            "type": "paragraph",
            "paragraph": {
                "rich_text": [
                    { "type": "text", "plain_text": "Hello ", "text": { "content": "Hello " } },
                    { "type": "text", "plain_text": "world", "text": { "content": "world" } }
                ]
            }
        });

        let block: BlockObject = serde_json::from_value(wire).unwrap();
        assert_eq!(block.id, "b1");
        assert!(!block.has_children);
        assert_eq!(
            block.payload.to_block(),
            Some(Block::paragraph("Hello world"))
        );
    }

    #[test]
    fn test_unknown_block_type_is_unsupported() {
        let wire = json!({
            "id": "b2",
            "type": "child_database",
            "child_database": { "title": "ignored" }
        });

        let block: BlockObject = serde_json::from_value(wire).unwrap();
        assert!(matches!(block.payload, BlockPayload::Unsupported));
        assert_eq!(block.payload.to_block(), None);
    }

    #[test]
    fn test_new_block_serializes_append_shape() {
        let new_block = NewBlock::from_block(&Block::heading(HeadingLevel::H2, "Section"));
        let value = serde_json::to_value(&new_block).unwrap();

        assert_eq!(value["object"], "block");
        assert_eq!(value["type"], "heading_2");
        assert_eq!(
            value["heading_2"]["rich_text"][0]["text"]["content"],
            "Section"
        );
        // Response-only fields stay off the request wire.
        assert!(value["heading_2"]["rich_text"][0].get("plain_text").is_none());
    }

    #[test]
    fn test_code_block_language_survives_both_directions() {
        let block = Block::CodeBlock {
            language: Some("rust".to_string()),
            text: "let x = 1;".to_string(),
        };
        let payload = BlockPayload::from_block(&block);
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["code"]["language"], "rust");

        let parsed: BlockPayload = serde_json::from_value(value).unwrap();
        assert_eq!(parsed.to_block(), Some(block));
    }

    #[test]
    fn test_plain_text_falls_back_to_request_content() {
        let spans = vec![RichText::text("from request")];
        assert_eq!(plain_text(&spans), "from request");
    }

    #[test]
    fn test_paginated_list_defaults() {
        let value = json!({ "results": [] });
        let list: PaginatedList<BlockObject> = serde_json::from_value(value).unwrap();
        assert!(list.results.is_empty());
        assert!(!list.has_more);
        assert!(list.next_cursor.is_none());
    }

    #[test]
    fn test_page_deserializes_with_minimal_fields() {
        let value = json!({
            "id": "p1",
            "created_time": "2024-01-15T09:30:00.000Z"
        });
        let page: Page = serde_json::from_value(value).unwrap();
        assert_eq!(page.id, "p1");
        assert!(!page.archived);
        assert!(page.created_time.is_some());
        assert!(page.properties.is_empty());
    }
}
