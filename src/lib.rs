// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod content;
pub mod error;
pub mod notion;
pub mod projects;
pub mod utils;

pub use config::{Config, ContentConfig, NotionConfig};
pub use content::{Block, HeadingLevel, blocks_to_markdown, markdown_to_blocks};
pub use error::{PortfolioError, Result};
pub use notion::{NotionClient, PropertySort, StatusFilter};
pub use projects::{
    BlockNode, IndexPage, MutationReceipt, NewProject, PageContent, ProjectPatch, ProjectStore,
    ProjectSummary, TagOptions,
};
pub use utils::Validator;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let _config = Config::default_config();
        let _blocks = markdown_to_blocks("# Hello");
    }
}
