// file: src/projects/records.rs
// description: request and viewer-facing record shapes for the project facade
// reference: internal data structures

use crate::notion::properties::SelectOption;
use crate::notion::wire::{BlockObject, BlockPayload};
use serde::{Deserialize, Serialize};

/// Fields accepted when creating a project record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewProject {
    pub name: String,
    pub slug: String,
    pub description: String,
    #[serde(rename = "type")]
    pub project_type: String,
    pub title_image: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub ordering: Option<i64>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// Partial update; only provided fields are patched. `tags: Some(vec![])`
/// clears the tag list, `tags: None` leaves it alone.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectPatch {
    pub page_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "type")]
    pub project_type: Option<String>,
    #[serde(default)]
    pub title_image: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub ordering: Option<i64>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Viewer-friendly projection of a project page, the shape the static
/// front-end renders cards from.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectSummary {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    #[serde(rename = "type")]
    pub project_type: String,
    pub title_image: String,
    /// Defaults to 999 so unordered projects land at the end of the feed.
    pub ordering: f64,
    pub tags: Vec<String>,
    pub status: String,
}

/// The landing page record plus its raw nested block tree; the front-end
/// renders the blocks itself, so no markdown conversion happens here.
#[derive(Debug, Clone, Serialize)]
pub struct IndexPage {
    pub page_id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub title_image: String,
    pub content: Vec<BlockNode>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlockNode {
    pub id: String,
    pub has_children: bool,
    #[serde(flatten)]
    pub payload: BlockPayload,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<BlockNode>,
}

impl BlockNode {
    pub fn new(block: BlockObject, children: Vec<BlockNode>) -> Self {
        Self {
            id: block.id,
            has_children: block.has_children,
            payload: block.payload,
            children,
        }
    }
}

/// Result of a create/update/archive call.
#[derive(Debug, Clone, Serialize)]
pub struct MutationReceipt {
    pub message: String,
    pub id: String,
}

/// Markdown rendition of a page's content.
#[derive(Debug, Clone, Serialize)]
pub struct PageContent {
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TagOptions {
    pub tag_options: Vec<SelectOption>,
    pub tag_choices_string: String,
    pub count: usize,
}
