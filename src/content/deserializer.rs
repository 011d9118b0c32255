// file: src/content/deserializer.rs
// description: content-block sequence to markdown conversion
// reference: fixed per-variant emission, single forward pass

use crate::content::Block;

/// Renders an ordered block sequence as one markdown-flavored string.
///
/// Paragraphs and headings are separated by blank lines, list items by single
/// newlines. Empty paragraphs contribute nothing; empty headings still emit
/// their marker. The final result is trimmed of leading and trailing
/// whitespace.
pub fn blocks_to_markdown(blocks: &[Block]) -> String {
    let mut markdown = String::new();

    for block in blocks {
        match block {
            Block::Paragraph { text } => {
                if !text.is_empty() {
                    markdown.push_str(text);
                    markdown.push_str("\n\n");
                }
            }
            Block::Heading { level, text } => {
                markdown.push_str(&"#".repeat(level.depth()));
                markdown.push(' ');
                markdown.push_str(text);
                markdown.push_str("\n\n");
            }
            Block::BulletItem { text } => {
                markdown.push_str("- ");
                markdown.push_str(text);
                markdown.push('\n');
            }
            Block::NumberedItem { text } => {
                // Every item carries the literal "1." marker; markdown
                // renderers renumber the list themselves.
                markdown.push_str("1. ");
                markdown.push_str(text);
                markdown.push('\n');
            }
            Block::CodeBlock { language, text } => {
                markdown.push_str("```");
                if let Some(language) = language {
                    markdown.push_str(language);
                }
                markdown.push('\n');
                markdown.push_str(text);
                markdown.push_str("\n```\n\n");
            }
            Block::Quote { text } => {
                markdown.push_str("> ");
                markdown.push_str(text);
                markdown.push_str("\n\n");
            }
        }
    }

    markdown.trim().to_string()
}
