// file: src/notion/mod.rs
// description: document-store API module exports
// reference: internal module structure

pub mod client;
pub mod properties;
pub mod wire;

pub use client::{NotionClient, PropertySort, StatusFilter};
pub use properties::{PageProperty, PropertyPayload, SelectOption};
pub use wire::{BlockObject, BlockPayload, Database, NewBlock, Page, PaginatedList, RichText};
