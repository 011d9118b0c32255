// file: src/content/mod.rs
// description: block vocabulary and markdown converters module exports
// reference: internal module structure

pub mod block;
pub mod deserializer;
pub mod serializer;

pub use block::{Block, HeadingLevel};
pub use deserializer::blocks_to_markdown;
pub use serializer::markdown_to_blocks;
