// file: src/notion/client.rs
// description: reqwest wrapper over the Notion v1 REST API
// reference: https://developers.notion.com/reference/intro

use crate::config::NotionConfig;
use crate::error::{PortfolioError, Result};
use crate::notion::properties::PropertyPayload;
use crate::notion::wire::{
    ApiErrorBody, BlockObject, Database, NewBlock, Page, PaginatedList,
};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

const LIST_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone)]
pub struct NotionClient {
    client: Client,
    base_url: String,
    api_key: String,
    api_version: String,
}

#[derive(Debug, Serialize)]
struct CreatePageRequest<'a> {
    parent: DatabaseParent<'a>,
    properties: &'a HashMap<String, PropertyPayload>,
}

#[derive(Debug, Serialize)]
struct DatabaseParent<'a> {
    database_id: &'a str,
}

#[derive(Debug, Serialize)]
struct UpdatePageRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    properties: Option<&'a HashMap<String, PropertyPayload>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    archived: Option<bool>,
}

#[derive(Debug, Serialize)]
struct AppendChildrenRequest<'a> {
    children: &'a [NewBlock],
}

/// Status filter used for both the project feed ("done") and the landing
/// page ("Index") queries.
#[derive(Debug, Clone, Serialize)]
pub struct StatusFilter {
    pub property: String,
    pub status: StatusEquals,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusEquals {
    pub equals: String,
}

impl StatusFilter {
    pub fn equals(property: &str, value: &str) -> Self {
        Self {
            property: property.to_string(),
            status: StatusEquals {
                equals: value.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PropertySort {
    pub property: String,
    pub direction: String,
}

impl PropertySort {
    pub fn ascending(property: &str) -> Self {
        Self {
            property: property.to_string(),
            direction: "ascending".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct QueryDatabaseRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<&'a StatusFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sorts: Option<&'a [PropertySort]>,
    page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_cursor: Option<String>,
}

impl NotionClient {
    pub fn new(config: &NotionConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            api_version: config.api_version.clone(),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/{}", self.base_url, path))
            .bearer_auth(&self.api_key)
            .header("Notion-Version", &self.api_version)
            .header("Content-Type", "application/json")
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(Self::api_error(status, response).await);
        }

        Ok(response.json::<T>().await?)
    }

    async fn api_error(status: StatusCode, response: reqwest::Response) -> PortfolioError {
        let body: ApiErrorBody = response.json().await.unwrap_or(ApiErrorBody {
            code: "unknown".to_string(),
            message: "Unknown error".to_string(),
        });
        PortfolioError::Notion {
            status: status.as_u16(),
            code: body.code,
            message: body.message,
        }
    }

    /// Creates a page under the given database parent.
    pub async fn create_page(
        &self,
        database_id: &str,
        properties: &HashMap<String, PropertyPayload>,
    ) -> Result<Page> {
        debug!("Creating page with {} properties", properties.len());
        let request = CreatePageRequest {
            parent: DatabaseParent { database_id },
            properties,
        };
        self.execute(self.request(Method::POST, "pages").json(&request))
            .await
    }

    /// Patches page properties; absent fields are left untouched.
    pub async fn update_page(
        &self,
        page_id: &str,
        properties: &HashMap<String, PropertyPayload>,
    ) -> Result<Page> {
        debug!("Updating page {} ({} properties)", page_id, properties.len());
        let request = UpdatePageRequest {
            properties: Some(properties),
            archived: None,
        };
        self.execute(
            self.request(Method::PATCH, &format!("pages/{}", page_id))
                .json(&request),
        )
        .await
    }

    /// The store has no hard delete; archiving is the delete operation.
    pub async fn archive_page(&self, page_id: &str) -> Result<Page> {
        debug!("Archiving page {}", page_id);
        let request = UpdatePageRequest {
            properties: None,
            archived: Some(true),
        };
        self.execute(
            self.request(Method::PATCH, &format!("pages/{}", page_id))
                .json(&request),
        )
        .await
    }

    /// Lists every direct child block, following the pagination cursor.
    pub async fn list_block_children(&self, block_id: &str) -> Result<Vec<BlockObject>> {
        let mut results = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut path = format!("blocks/{}/children?page_size={}", block_id, LIST_PAGE_SIZE);
            if let Some(cursor) = &cursor {
                path.push_str(&format!("&start_cursor={}", cursor));
            }

            let page: PaginatedList<BlockObject> =
                self.execute(self.request(Method::GET, &path)).await?;

            results.extend(page.results);
            if !page.has_more {
                break;
            }
            cursor = page.next_cursor;
            if cursor.is_none() {
                break;
            }
        }

        debug!("Listed {} child blocks of {}", results.len(), block_id);
        Ok(results)
    }

    pub async fn append_block_children(
        &self,
        block_id: &str,
        children: &[NewBlock],
    ) -> Result<()> {
        debug!("Appending {} blocks to {}", children.len(), block_id);
        let request = AppendChildrenRequest { children };
        let _: serde_json::Value = self
            .execute(
                self.request(Method::PATCH, &format!("blocks/{}/children", block_id))
                    .json(&request),
            )
            .await?;
        Ok(())
    }

    pub async fn delete_block(&self, block_id: &str) -> Result<()> {
        let _: serde_json::Value = self
            .execute(self.request(Method::DELETE, &format!("blocks/{}", block_id)))
            .await?;
        Ok(())
    }

    /// Queries the database with an optional status filter and sort,
    /// following the pagination cursor.
    pub async fn query_database(
        &self,
        database_id: &str,
        filter: Option<&StatusFilter>,
        sorts: Option<&[PropertySort]>,
    ) -> Result<Vec<Page>> {
        let mut results = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let request = QueryDatabaseRequest {
                filter,
                sorts,
                page_size: LIST_PAGE_SIZE,
                start_cursor: cursor.clone(),
            };

            let page: PaginatedList<Page> = self
                .execute(
                    self.request(Method::POST, &format!("databases/{}/query", database_id))
                        .json(&request),
                )
                .await?;

            results.extend(page.results);
            if !page.has_more {
                break;
            }
            cursor = page.next_cursor;
            if cursor.is_none() {
                break;
            }
        }

        debug!("Query returned {} pages", results.len());
        Ok(results)
    }

    pub async fn retrieve_database(&self, database_id: &str) -> Result<Database> {
        self.execute(self.request(Method::GET, &format!("databases/{}", database_id)))
            .await
    }
}
