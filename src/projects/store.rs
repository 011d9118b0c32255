// file: src/projects/store.rs
// description: CRUD facade translating project records to document-store calls
// reference: thin pass-through handlers, one method per admin operation

use crate::config::{Config, ContentConfig};
use crate::content::{blocks_to_markdown, markdown_to_blocks};
use crate::error::{PortfolioError, Result};
use crate::notion::client::{PropertySort, StatusFilter};
use crate::notion::properties::PropertyPayload;
use crate::notion::wire::{NewBlock, Page};
use crate::notion::NotionClient;
use crate::projects::records::{
    BlockNode, IndexPage, MutationReceipt, NewProject, PageContent, ProjectPatch, ProjectSummary,
    TagOptions,
};
use crate::utils::Validator;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use tracing::{info, warn};

const PROP_NAME: &str = "Name";
const PROP_SLUG: &str = "slug";
const PROP_DESCRIPTION: &str = "description";
const PROP_TYPE: &str = "type";
const PROP_TITLE_IMAGE: &str = "titleImage";
const PROP_ORDERING: &str = "ordering";
const PROP_TAG: &str = "tag";
const PROP_STATUS: &str = "Status";

pub struct ProjectStore {
    client: NotionClient,
    database_id: String,
    content: ContentConfig,
}

impl ProjectStore {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: NotionClient::new(&config.notion)?,
            database_id: config.notion.database_id.clone(),
            content: config.content.clone(),
        })
    }

    /// Creates a published project record and attaches its markdown content
    /// as child blocks.
    pub async fn create(&self, draft: &NewProject) -> Result<MutationReceipt> {
        validate_draft(draft)?;

        let properties = draft_properties(draft, &self.content.published_status);
        let page = self.client.create_page(&self.database_id, &properties).await?;

        if let Some(content) = &draft.content {
            let children: Vec<NewBlock> = markdown_to_blocks(content)
                .iter()
                .map(NewBlock::from_block)
                .collect();
            if !children.is_empty() {
                self.client.append_block_children(&page.id, &children).await?;
            }
        }

        info!("Project added: {}", draft.name);
        Ok(MutationReceipt {
            message: "Project added successfully".to_string(),
            id: page.id,
        })
    }

    /// Patches the provided fields; when content is present, the page body is
    /// replaced wholesale (delete existing blocks, append the new sequence).
    pub async fn update(&self, patch: &ProjectPatch) -> Result<MutationReceipt> {
        let page_id = Validator::normalize_page_id(&patch.page_id)?;

        // The patch always goes to the store, even with no property fields;
        // a missing or archived page must surface the store's error.
        let properties = patch_properties(patch);
        let page = self.client.update_page(&page_id, &properties).await?;

        if let Some(content) = &patch.content {
            // Empty content is an omission, not a request to blank the page.
            if !content.trim().is_empty() {
                self.replace_page_content(&page_id, content).await?;
            }
        }

        info!("Project updated: {}", page_id);
        Ok(MutationReceipt {
            message: "Project updated successfully".to_string(),
            id: page.id,
        })
    }

    async fn replace_page_content(&self, page_id: &str, content: &str) -> Result<()> {
        let existing = self.client.list_block_children(page_id).await?;
        for block in &existing {
            // Child-bearing or synced blocks can refuse deletion; the rest of
            // the replacement still proceeds.
            if let Err(err) = self.client.delete_block(&block.id).await {
                warn!("Could not delete block {}: {}", block.id, err);
            }
        }

        let children: Vec<NewBlock> = markdown_to_blocks(content)
            .iter()
            .map(NewBlock::from_block)
            .collect();
        if !children.is_empty() {
            self.client.append_block_children(page_id, &children).await?;
        }
        Ok(())
    }

    /// The store has no hard delete, so removal archives the page.
    pub async fn archive(&self, page_id: &str) -> Result<MutationReceipt> {
        let page_id = Validator::normalize_page_id(page_id)?;
        let page = self.client.archive_page(&page_id).await?;

        info!("Project archived: {}", page.id);
        Ok(MutationReceipt {
            message: "Project archived successfully".to_string(),
            id: page.id,
        })
    }

    /// Published projects, ordered for the public feed.
    pub async fn list(&self) -> Result<Vec<ProjectSummary>> {
        let filter = StatusFilter::equals(PROP_STATUS, &self.content.published_status);
        let sorts = [PropertySort::ascending(&self.content.ordering_property)];
        let pages = self
            .client
            .query_database(&self.database_id, Some(&filter), Some(sorts.as_slice()))
            .await?;

        Ok(pages.into_iter().map(summarize).collect())
    }

    /// Markdown rendition of a page body.
    pub async fn page_content(&self, page_id: &str) -> Result<PageContent> {
        let page_id = Validator::normalize_page_id(page_id)?;
        let blocks = self.client.list_block_children(&page_id).await?;

        let content = blocks_to_markdown(
            &blocks
                .iter()
                .filter_map(|block| block.payload.to_block())
                .collect::<Vec<_>>(),
        );

        Ok(PageContent { content })
    }

    /// The single landing page, with its nested block tree for the front-end
    /// renderer.
    pub async fn index_page(&self) -> Result<IndexPage> {
        let filter = StatusFilter::equals(PROP_STATUS, &self.content.index_status);
        let pages = self
            .client
            .query_database(&self.database_id, Some(&filter), None)
            .await?;

        let page = pages.into_iter().next().ok_or_else(|| {
            PortfolioError::NotFound(format!(
                "No Index page found. Please create a page with Status='{}' in your database.",
                self.content.index_status
            ))
        })?;

        let content = self.fetch_block_tree(&page.id).await?;

        Ok(IndexPage {
            name: property_text(&page, PROP_NAME).unwrap_or_else(|| "Portfolio".to_string()),
            slug: property_text(&page, PROP_SLUG).unwrap_or_default(),
            description: property_text(&page, PROP_DESCRIPTION).unwrap_or_default(),
            title_image: property_file_url(&page, PROP_TITLE_IMAGE).unwrap_or_default(),
            page_id: page.id,
            content,
        })
    }

    fn fetch_block_tree<'a>(
        &'a self,
        block_id: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<BlockNode>>> + Send + 'a>> {
        Box::pin(async move {
            let blocks = self.client.list_block_children(block_id).await?;
            let mut nodes = Vec::with_capacity(blocks.len());

            for block in blocks {
                let children = if block.has_children {
                    self.fetch_block_tree(&block.id).await?
                } else {
                    Vec::new()
                };
                nodes.push(BlockNode::new(block, children));
            }

            Ok(nodes)
        })
    }

    /// Tag choices offered by the database schema, for the admin editor.
    pub async fn tag_options(&self) -> Result<TagOptions> {
        let database = self.client.retrieve_database(&self.database_id).await?;

        let tag_property = database.properties.get(PROP_TAG).ok_or_else(|| {
            PortfolioError::NotFound(format!("No \"{}\" property found in database", PROP_TAG))
        })?;

        if tag_property.kind != "multi_select" {
            return Err(PortfolioError::Validation(format!(
                "\"{}\" property is of type \"{}\", expected \"multi_select\"",
                PROP_TAG, tag_property.kind
            )));
        }

        let options = tag_property
            .multi_select
            .as_ref()
            .map(|schema| schema.options.clone())
            .unwrap_or_default();

        let choices = options
            .iter()
            .map(|option| option.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        info!("Retrieved {} tag options from database", options.len());
        Ok(TagOptions {
            count: options.len(),
            tag_choices_string: choices,
            tag_options: options,
        })
    }
}

fn validate_draft(draft: &NewProject) -> Result<()> {
    let mut missing = Vec::new();
    if draft.name.trim().is_empty() {
        missing.push("name");
    }
    if draft.slug.trim().is_empty() {
        missing.push("slug");
    }
    if draft.description.trim().is_empty() {
        missing.push("description");
    }
    if draft.project_type.trim().is_empty() {
        missing.push("type");
    }
    if draft.title_image.trim().is_empty() {
        missing.push("titleImage");
    }

    if !missing.is_empty() {
        return Err(PortfolioError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    Validator::validate_slug(&draft.slug)?;
    Validator::validate_url(&draft.title_image)?;
    Ok(())
}

fn draft_properties(
    draft: &NewProject,
    published_status: &str,
) -> HashMap<String, PropertyPayload> {
    let mut properties = HashMap::new();
    properties.insert(PROP_NAME.to_string(), PropertyPayload::title(&draft.name));
    properties.insert(PROP_SLUG.to_string(), PropertyPayload::rich_text(&draft.slug));
    properties.insert(
        PROP_DESCRIPTION.to_string(),
        PropertyPayload::rich_text(&draft.description),
    );
    properties.insert(
        PROP_TYPE.to_string(),
        PropertyPayload::select(&draft.project_type),
    );
    properties.insert(
        PROP_TITLE_IMAGE.to_string(),
        PropertyPayload::external_file("Title Image", &draft.title_image),
    );
    // New records go straight to the published status.
    properties.insert(
        PROP_STATUS.to_string(),
        PropertyPayload::status(published_status),
    );

    if let Some(ordering) = draft.ordering {
        properties.insert(PROP_ORDERING.to_string(), PropertyPayload::number(ordering));
    }

    if let Some(tags) = &draft.tags {
        if !tags.is_empty() {
            properties.insert(
                PROP_TAG.to_string(),
                PropertyPayload::multi_select(tags.iter().cloned()),
            );
        }
    }

    properties
}

fn patch_properties(patch: &ProjectPatch) -> HashMap<String, PropertyPayload> {
    let mut properties = HashMap::new();

    if let Some(name) = &patch.name {
        properties.insert(PROP_NAME.to_string(), PropertyPayload::title(name));
    }
    if let Some(slug) = &patch.slug {
        properties.insert(PROP_SLUG.to_string(), PropertyPayload::rich_text(slug));
    }
    if let Some(description) = &patch.description {
        properties.insert(
            PROP_DESCRIPTION.to_string(),
            PropertyPayload::rich_text(description),
        );
    }
    if let Some(project_type) = &patch.project_type {
        properties.insert(PROP_TYPE.to_string(), PropertyPayload::select(project_type));
    }
    if let Some(title_image) = &patch.title_image {
        properties.insert(
            PROP_TITLE_IMAGE.to_string(),
            PropertyPayload::external_file("Title Image", title_image),
        );
    }
    if let Some(ordering) = patch.ordering {
        properties.insert(PROP_ORDERING.to_string(), PropertyPayload::number(ordering));
    }
    if let Some(tags) = &patch.tags {
        // An empty list is an explicit clear, not an omission.
        properties.insert(
            PROP_TAG.to_string(),
            PropertyPayload::multi_select(tags.iter().cloned()),
        );
    }
    if let Some(status) = &patch.status {
        properties.insert(PROP_STATUS.to_string(), PropertyPayload::status(status));
    }

    properties
}

fn summarize(page: Page) -> ProjectSummary {
    ProjectSummary {
        name: property_text(&page, PROP_NAME).unwrap_or_else(|| "Untitled".to_string()),
        slug: property_text(&page, PROP_SLUG).unwrap_or_else(|| page.id.clone()),
        description: property_text(&page, PROP_DESCRIPTION)
            .unwrap_or_else(|| "No description available".to_string()),
        project_type: property_select(&page, PROP_TYPE).unwrap_or_else(|| "Project".to_string()),
        title_image: property_file_url(&page, PROP_TITLE_IMAGE).unwrap_or_default(),
        ordering: page
            .properties
            .get(PROP_ORDERING)
            .and_then(|prop| prop.as_number())
            .unwrap_or(999.0),
        tags: page
            .properties
            .get(PROP_TAG)
            .map(|prop| prop.multi_select_names())
            .unwrap_or_default(),
        status: page
            .properties
            .get(PROP_STATUS)
            .and_then(|prop| prop.status_name().map(str::to_string))
            .unwrap_or_else(|| "unknown".to_string()),
        id: page.id,
    }
}

fn property_text(page: &Page, name: &str) -> Option<String> {
    page.properties.get(name).and_then(|prop| prop.as_plain_text())
}

fn property_select(page: &Page, name: &str) -> Option<String> {
    page.properties
        .get(name)
        .and_then(|prop| prop.select_name().map(str::to_string))
}

fn property_file_url(page: &Page, name: &str) -> Option<String> {
    page.properties
        .get(name)
        .and_then(|prop| prop.file_url().map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn draft() -> NewProject {
        NewProject {
            name: "Weather Station".to_string(),
            slug: "weather-station".to_string(),
            description: "An ESP32 weather logger".to_string(),
            project_type: "hardware".to_string(),
            title_image: "https://cdn.example.com/ws.png".to_string(),
            content: Some("# Build log\n\nnotes".to_string()),
            ordering: Some(3),
            tags: Some(vec!["rust".to_string(), "esp32".to_string()]),
        }
    }

    #[test]
    fn test_validate_draft_lists_all_missing_fields() {
        let empty = NewProject::default();
        let err = validate_draft(&empty).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: Missing required fields: name, slug, description, type, titleImage"
        );
    }

    #[test]
    fn test_validate_draft_accepts_complete_record() {
        assert!(validate_draft(&draft()).is_ok());
    }

    #[test]
    fn test_validate_draft_rejects_bad_slug() {
        let mut bad = draft();
        bad.slug = "Has Spaces".to_string();
        assert!(validate_draft(&bad).is_err());
    }

    #[test]
    fn test_draft_properties_pin_published_status() {
        let properties = draft_properties(&draft(), "done");
        let value = serde_json::to_value(&properties).unwrap();

        assert_eq!(value["Status"]["status"]["name"], "done");
        assert_eq!(value["Name"]["title"][0]["text"]["content"], "Weather Station");
        assert_eq!(value["ordering"]["number"], 3);
        assert_eq!(value["tag"]["multi_select"][1]["name"], "esp32");
    }

    #[test]
    fn test_draft_properties_skip_absent_optionals() {
        let mut minimal = draft();
        minimal.ordering = None;
        minimal.tags = None;

        let properties = draft_properties(&minimal, "done");
        assert!(!properties.contains_key(PROP_ORDERING));
        assert!(!properties.contains_key(PROP_TAG));
    }

    #[test]
    fn test_patch_properties_only_touch_provided_fields() {
        let patch = ProjectPatch {
            page_id: "p".to_string(),
            description: Some("updated".to_string()),
            ..Default::default()
        };
        let properties = patch_properties(&patch);

        assert_eq!(properties.len(), 1);
        assert!(properties.contains_key(PROP_DESCRIPTION));
    }

    #[test]
    fn test_patch_properties_empty_tags_clear_the_list() {
        let patch = ProjectPatch {
            page_id: "p".to_string(),
            tags: Some(Vec::new()),
            ..Default::default()
        };
        let value = serde_json::to_value(patch_properties(&patch)).unwrap();
        assert_eq!(value["tag"]["multi_select"], json!([]));
    }

    #[test]
    fn test_summarize_applies_viewer_fallbacks() {
        let page: Page = serde_json::from_value(json!({
            "id": "page-1",
            "properties": {}
        }))
        .unwrap();

        let summary = summarize(page);
        assert_eq!(summary.name, "Untitled");
        assert_eq!(summary.slug, "page-1");
        assert_eq!(summary.description, "No description available");
        assert_eq!(summary.project_type, "Project");
        assert_eq!(summary.title_image, "");
        // Unordered projects sort after every explicit ordering value.
        assert_eq!(summary.ordering, 999.0);
        assert_eq!(summary.status, "unknown");
        assert!(summary.tags.is_empty());
    }

    #[test]
    fn test_summarize_reads_populated_properties() {
        let page: Page = serde_json::from_value(json!({
            "id": "page-2",
            "properties": {
                "Name": { "type": "title", "title": [ { "plain_text": "Synth" } ] },
                "slug": { "type": "rich_text", "rich_text": [ { "plain_text": "synth" } ] },
                "type": { "type": "select", "select": { "name": "audio" } },
                "ordering": { "type": "number", "number": 7 },
                "tag": { "type": "multi_select", "multi_select": [ { "name": "dsp" } ] },
                "Status": { "type": "status", "status": { "name": "done" } },
                "titleImage": {
                    "type": "files",
                    "files": [ { "external": { "url": "https://cdn/synth.png" } } ]
                }
            }
        }))
        .unwrap();

        let summary = summarize(page);
        assert_eq!(summary.name, "Synth");
        assert_eq!(summary.slug, "synth");
        assert_eq!(summary.project_type, "audio");
        assert_eq!(summary.ordering, 7.0);
        assert_eq!(summary.tags, vec!["dsp"]);
        assert_eq!(summary.status, "done");
        assert_eq!(summary.title_image, "https://cdn/synth.png");
    }
}
