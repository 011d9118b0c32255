// file: src/notion/properties.rs
// description: typed page-property payloads and response-side extraction
// reference: https://developers.notion.com/reference/property-value-object

use crate::notion::wire::{plain_text, RichText};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectOption {
    pub name: String,
}

impl SelectOption {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external: Option<ExternalFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<HostedFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalFile {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostedFile {
    pub url: String,
}

/// Request-side property value, serialized as the bare payload key the
/// create/update endpoints expect.
#[derive(Debug, Clone, Serialize)]
pub enum PropertyPayload {
    #[serde(rename = "title")]
    Title(Vec<RichText>),
    #[serde(rename = "rich_text")]
    RichText(Vec<RichText>),
    #[serde(rename = "select")]
    Select(SelectOption),
    #[serde(rename = "multi_select")]
    MultiSelect(Vec<SelectOption>),
    #[serde(rename = "files")]
    Files(Vec<FileReference>),
    #[serde(rename = "number")]
    Number(i64),
    #[serde(rename = "status")]
    Status(SelectOption),
}

impl PropertyPayload {
    pub fn title(text: &str) -> Self {
        PropertyPayload::Title(vec![RichText::text(text)])
    }

    pub fn rich_text(text: &str) -> Self {
        PropertyPayload::RichText(vec![RichText::text(text)])
    }

    pub fn select(name: &str) -> Self {
        PropertyPayload::Select(SelectOption::new(name))
    }

    pub fn multi_select<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PropertyPayload::MultiSelect(names.into_iter().map(SelectOption::new).collect())
    }

    pub fn external_file(name: &str, url: &str) -> Self {
        PropertyPayload::Files(vec![FileReference {
            name: Some(name.to_string()),
            external: Some(ExternalFile {
                url: url.to_string(),
            }),
            file: None,
        }])
    }

    pub fn number(value: i64) -> Self {
        PropertyPayload::Number(value)
    }

    pub fn status(name: &str) -> Self {
        PropertyPayload::Status(SelectOption::new(name))
    }
}

/// Response-side property as it appears under `page.properties`. Only the
/// payload for the property's own type is populated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageProperty {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub title: Option<Vec<RichText>>,
    #[serde(default)]
    pub rich_text: Option<Vec<RichText>>,
    #[serde(default)]
    pub select: Option<SelectOption>,
    #[serde(default)]
    pub multi_select: Option<Vec<SelectOption>>,
    #[serde(default)]
    pub files: Option<Vec<FileReference>>,
    #[serde(default)]
    pub number: Option<f64>,
    #[serde(default)]
    pub status: Option<SelectOption>,
}

impl PageProperty {
    /// Plain text of the first title or rich_text span list present.
    pub fn as_plain_text(&self) -> Option<String> {
        let spans = self.title.as_ref().or(self.rich_text.as_ref())?;
        if spans.is_empty() {
            return None;
        }
        Some(plain_text(spans))
    }

    pub fn select_name(&self) -> Option<&str> {
        self.select.as_ref().map(|option| option.name.as_str())
    }

    pub fn status_name(&self) -> Option<&str> {
        self.status.as_ref().map(|option| option.name.as_str())
    }

    pub fn multi_select_names(&self) -> Vec<String> {
        self.multi_select
            .as_ref()
            .map(|options| options.iter().map(|option| option.name.clone()).collect())
            .unwrap_or_default()
    }

    /// First file URL, preferring the external link over store-hosted files.
    pub fn file_url(&self) -> Option<&str> {
        let first = self.files.as_ref()?.first()?;
        if let Some(external) = &first.external {
            return Some(external.url.as_str());
        }
        first.file.as_ref().map(|hosted| hosted.url.as_str())
    }

    pub fn as_number(&self) -> Option<f64> {
        self.number
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_title_payload_shape() {
        let value = serde_json::to_value(PropertyPayload::title("My Project")).unwrap();
        assert_eq!(value["title"][0]["text"]["content"], "My Project");
    }

    #[test]
    fn test_select_and_status_payload_shapes() {
        let select = serde_json::to_value(PropertyPayload::select("website")).unwrap();
        assert_eq!(select["select"]["name"], "website");

        let status = serde_json::to_value(PropertyPayload::status("done")).unwrap();
        assert_eq!(status["status"]["name"], "done");
    }

    #[test]
    fn test_external_file_payload_shape() {
        let value =
            serde_json::to_value(PropertyPayload::external_file("Title Image", "https://x/y.png"))
                .unwrap();
        assert_eq!(value["files"][0]["name"], "Title Image");
        assert_eq!(value["files"][0]["external"]["url"], "https://x/y.png");
        assert!(value["files"][0].get("file").is_none());
    }

    #[test]
    fn test_multi_select_payload_empty_clears() {
        let value =
            serde_json::to_value(PropertyPayload::multi_select(Vec::<String>::new())).unwrap();
        assert_eq!(value["multi_select"], json!([]));
    }

    #[test]
    fn test_extract_plain_text_from_title() {
        let prop: PageProperty = serde_json::from_value(json!({
            "type": "title",
            "title": [ { "type": "text", "plain_text": "Untitled No More" } ]
        }))
        .unwrap();
        assert_eq!(prop.as_plain_text().as_deref(), Some("Untitled No More"));
    }

    #[test]
    fn test_extract_missing_text_is_none() {
        let prop: PageProperty = serde_json::from_value(json!({
            "type": "rich_text",
            "rich_text": []
        }))
        .unwrap();
        assert_eq!(prop.as_plain_text(), None);
    }

    #[test]
    fn test_file_url_prefers_external() {
        let prop: PageProperty = serde_json::from_value(json!({
            "type": "files",
            "files": [
                {
                    "external": { "url": "https://cdn/x.png" },
                    "file": { "url": "https://hosted/y.png" }
                }
            ]
        }))
        .unwrap();
        assert_eq!(prop.file_url(), Some("https://cdn/x.png"));
    }

    #[test]
    fn test_file_url_falls_back_to_hosted() {
        let prop: PageProperty = serde_json::from_value(json!({
            "type": "files",
            "files": [ { "file": { "url": "https://hosted/y.png" } } ]
        }))
        .unwrap();
        assert_eq!(prop.file_url(), Some("https://hosted/y.png"));
    }

    #[test]
    fn test_multi_select_names() {
        let prop: PageProperty = serde_json::from_value(json!({
            "type": "multi_select",
            "multi_select": [ { "name": "rust" }, { "name": "wasm" } ]
        }))
        .unwrap();
        assert_eq!(prop.multi_select_names(), vec!["rust", "wasm"]);
    }
}
