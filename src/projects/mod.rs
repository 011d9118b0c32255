// file: src/projects/mod.rs
// description: project facade module exports
// reference: internal module structure

pub mod records;
pub mod store;

pub use records::{
    BlockNode, IndexPage, MutationReceipt, NewProject, PageContent, ProjectPatch, ProjectSummary,
    TagOptions,
};
pub use store::ProjectStore;
