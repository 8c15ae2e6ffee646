//! Markdown page assembly.
//!
//! A page is an ordered list of [`Block`]s (headings, source links, prose,
//! usage sections, bullet links) rendered into a single string in one pass.
//! Blocks never rewrite the text they carry; escaping is the caller's job
//! via [`escape_html`].

mod escape;

use std::fmt::{self, Write as _};

pub use escape::escape_html;

// ---------------------------------------------------------------------------
// Blocks
// ---------------------------------------------------------------------------

/// One rendered unit of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Text emitted exactly as given, no trailing newline added.
    Raw(String),
    /// A line of text followed by a newline.
    Line(String),
    /// An empty line.
    Blank,
    /// ATX heading: `#`×level, a space, the text.
    Heading { level: u8, text: String },
    /// `Source: [label](url)` followed by a blank line.
    SourceLink { label: String, url: String },
    /// `- [label](target)` list item.
    BulletLink { label: String, target: String },
    /// Anchor `<a id="..."></a>`, a `### Usage` heading and a fenced block.
    Usage { anchor: String, code: String },
}

impl Block {
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Self::Heading {
            level,
            text: text.into(),
        }
    }

    pub fn source_link(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self::SourceLink {
            label: label.into(),
            url: url.into(),
        }
    }

    pub fn bullet_link(label: impl Into<String>, target: impl Into<String>) -> Self {
        Self::BulletLink {
            label: label.into(),
            target: target.into(),
        }
    }

    pub fn usage(anchor: impl Into<String>, code: impl Into<String>) -> Self {
        Self::Usage {
            anchor: anchor.into(),
            code: code.into(),
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw(text) => f.write_str(text),
            Self::Line(text) => writeln!(f, "{text}"),
            Self::Blank => writeln!(f),
            Self::Heading { level, text } => {
                let hashes = "#".repeat(usize::from((*level).clamp(1, 6)));
                writeln!(f, "{hashes} {text}")
            }
            Self::SourceLink { label, url } => write!(f, "Source: [{label}]({url})\n\n"),
            Self::BulletLink { label, target } => writeln!(f, "- [{label}]({target})"),
            Self::Usage { anchor, code } => {
                writeln!(f, "<a id=\"{anchor}\"></a>")?;
                writeln!(f, "### Usage")?;
                writeln!(f, "```")?;
                writeln!(f, "{code}")?;
                writeln!(f, "```")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

/// An ordered sequence of blocks, concatenated once by [`Page::render`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    blocks: Vec<Block>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, block: Block) -> &mut Self {
        self.blocks.push(block);
        self
    }

    /// Render every block in order into one string.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for block in &self.blocks {
            // Writing into a String cannot fail.
            let _ = write!(out, "{block}");
        }
        out
    }
}

impl Extend<Block> for Page {
    fn extend<I: IntoIterator<Item = Block>>(&mut self, iter: I) {
        self.blocks.extend(iter);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn heading_levels() {
        assert_eq!(Block::heading(1, "Title").to_string(), "# Title\n");
        assert_eq!(Block::heading(2, "gps").to_string(), "## gps\n");
        assert_eq!(Block::heading(9, "deep").to_string(), "###### deep\n");
    }

    #[test]
    fn source_link_ends_with_blank_line() {
        let block = Block::source_link("drivers/gps", "https://example.com/src/drivers/gps");
        assert_eq!(
            block.to_string(),
            "Source: [drivers/gps](https://example.com/src/drivers/gps)\n\n"
        );
    }

    #[test]
    fn usage_block_layout() {
        let block = Block::usage("gps_usage", "gps start\ngps stop");
        assert_eq!(
            block.to_string(),
            "<a id=\"gps_usage\"></a>\n### Usage\n```\ngps start\ngps stop\n```\n"
        );
    }

    #[test]
    fn usage_text_is_not_escaped() {
        let block = Block::usage("x_usage", "x <cmd> & more");
        assert!(block.to_string().contains("x <cmd> & more"));
    }

    #[test]
    fn page_renders_blocks_in_order() {
        let mut page = Page::new();
        page.push(Block::heading(1, "Modules Reference: Driver"))
            .push(Block::Line("Subcategories:".into()))
            .push(Block::bullet_link("Imu", "modules_driver_imu.md"))
            .push(Block::Blank)
            .push(Block::Raw("tail".into()));

        assert_eq!(
            page.render(),
            "# Modules Reference: Driver\nSubcategories:\n- [Imu](modules_driver_imu.md)\n\ntail"
        );
    }

    #[test]
    fn empty_page_renders_empty() {
        assert!(Page::new().render().is_empty());
    }
}
