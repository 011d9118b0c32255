// file: src/content/serializer.rs
// description: markdown-subset to content-block conversion (line scanner)
// reference: single-pass classification, no backtracking

use crate::content::{Block, HeadingLevel};

/// Converts a markdown-subset string into an ordered block sequence suitable
/// for attaching as page children.
///
/// Classification happens per physical line, on the trimmed text, in priority
/// order `### `, `## `, `# `, blank, paragraph content. Consecutive non-blank
/// non-heading lines accumulate into a single paragraph joined with `\n`;
/// blank lines and headings flush the accumulator. Total over any input:
/// empty or all-blank input yields an empty sequence.
pub fn markdown_to_blocks(content: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();

    for line in content.split('\n') {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            flush_paragraph(&mut blocks, &mut paragraph);
            continue;
        }

        // Marker text after the literal prefix is kept verbatim, interior
        // spaces included.
        if let Some(rest) = trimmed.strip_prefix("### ") {
            flush_paragraph(&mut blocks, &mut paragraph);
            blocks.push(Block::heading(HeadingLevel::H3, rest));
        } else if let Some(rest) = trimmed.strip_prefix("## ") {
            flush_paragraph(&mut blocks, &mut paragraph);
            blocks.push(Block::heading(HeadingLevel::H2, rest));
        } else if let Some(rest) = trimmed.strip_prefix("# ") {
            flush_paragraph(&mut blocks, &mut paragraph);
            blocks.push(Block::heading(HeadingLevel::H1, rest));
        } else {
            paragraph.push(trimmed);
        }
    }

    flush_paragraph(&mut blocks, &mut paragraph);
    blocks
}

fn flush_paragraph(blocks: &mut Vec<Block>, paragraph: &mut Vec<&str>) {
    if !paragraph.is_empty() {
        blocks.push(Block::paragraph(paragraph.join("\n")));
        paragraph.clear();
    }
}
