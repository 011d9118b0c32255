// file: src/utils/validation.rs
// description: input validation and page-id normalization helpers
// reference: input validation patterns

use crate::error::{PortfolioError, Result};
use lazy_static::lazy_static;
use regex::Regex;
use uuid::Uuid;

lazy_static! {
    static ref SLUG_PATTERN: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
}

pub struct Validator;

impl Validator {
    /// Accepts page ids in either hyphenated or bare 32-hex form and returns
    /// the hyphenated form the API paths use.
    pub fn normalize_page_id(page_id: &str) -> Result<String> {
        let trimmed = page_id.trim();
        if trimmed.is_empty() {
            return Err(PortfolioError::Validation(
                "Missing required field: pageId".to_string(),
            ));
        }

        Uuid::parse_str(trimmed)
            .map(|id| id.hyphenated().to_string())
            .map_err(|_| {
                PortfolioError::Validation(format!("Invalid page id: {}", trimmed))
            })
    }

    pub fn validate_slug(slug: &str) -> Result<()> {
        if SLUG_PATTERN.is_match(slug) {
            Ok(())
        } else {
            Err(PortfolioError::Validation(format!(
                "Invalid slug (expected lowercase letters, digits, hyphens): {}",
                slug
            )))
        }
    }

    pub fn validate_url(url: &str) -> Result<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(PortfolioError::Validation(format!(
                "Invalid URL format: {}",
                url
            )));
        }
        Ok(())
    }

    pub fn validate_content_not_empty(content: &str) -> Result<()> {
        if content.trim().is_empty() {
            return Err(PortfolioError::Validation("Content is empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_page_id_accepts_both_forms() {
        let hyphenated = "59833787-2cf9-4fdf-8782-e53db20768a5";
        let bare = "598337872cf94fdf8782e53db20768a5";

        assert_eq!(
            Validator::normalize_page_id(hyphenated).unwrap(),
            hyphenated
        );
        assert_eq!(Validator::normalize_page_id(bare).unwrap(), hyphenated);
    }

    #[test]
    fn test_normalize_page_id_rejects_garbage() {
        assert!(Validator::normalize_page_id("").is_err());
        assert!(Validator::normalize_page_id("   ").is_err());
        assert!(Validator::normalize_page_id("not-a-page-id").is_err());
    }

    #[test]
    fn test_validate_slug() {
        assert!(Validator::validate_slug("weather-station").is_ok());
        assert!(Validator::validate_slug("v2").is_ok());
        assert!(Validator::validate_slug("Has Spaces").is_err());
        assert!(Validator::validate_slug("-leading").is_err());
        assert!(Validator::validate_slug("trailing-").is_err());
        assert!(Validator::validate_slug("").is_err());
    }

    #[test]
    fn test_validate_url() {
        assert!(Validator::validate_url("https://example.com/a.png").is_ok());
        assert!(Validator::validate_url("http://example.com").is_ok());
        assert!(Validator::validate_url("example.com").is_err());
        assert!(Validator::validate_url("ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_content_not_empty() {
        assert!(Validator::validate_content_not_empty("body").is_ok());
        assert!(Validator::validate_content_not_empty("  \n ").is_err());
    }
}
