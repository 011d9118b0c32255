// file: src/content/block.rs
// description: closed content-block vocabulary shared by both converters
// reference: internal data structures

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    pub fn depth(&self) -> usize {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }
}

/// One unit of structured page content.
///
/// The serializer only ever produces `Heading` and `Paragraph`; the remaining
/// variants originate from the document store and exist so the deserializer
/// can match over a closed set instead of dispatching on type strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Block {
    Heading {
        level: HeadingLevel,
        text: String,
    },
    /// Text may contain embedded newlines when consecutive source lines were
    /// accumulated into one paragraph.
    Paragraph {
        text: String,
    },
    BulletItem {
        text: String,
    },
    NumberedItem {
        text: String,
    },
    CodeBlock {
        language: Option<String>,
        text: String,
    },
    Quote {
        text: String,
    },
}

impl Block {
    pub fn heading(level: HeadingLevel, text: impl Into<String>) -> Self {
        Block::Heading {
            level,
            text: text.into(),
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph { text: text.into() }
    }
}
