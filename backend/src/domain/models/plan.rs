//! Domain model for an exported month plan.

/// One element of a plan document, in reading order
#[derive(Debug, Clone, PartialEq)]
pub enum PlanBlock {
    /// Document title, rendered upper-cased with an underline
    Title(String),
    /// Section heading such as `KEY EVENTS & HOLIDAYS`
    Heading(String),
    /// Text wrapped to the page width, indented by `indent` columns
    Text { text: String, indent: usize },
    /// Blank line between sections
    Spacer,
}

/// Laid-out plan before pagination
#[derive(Debug, Clone, PartialEq)]
pub struct PlanDocument {
    pub blocks: Vec<PlanBlock>,
    /// Last line of the last page
    pub footer: String,
}

impl PlanDocument {
    pub fn new(footer: impl Into<String>) -> Self {
        Self {
            blocks: Vec::new(),
            footer: footer.into(),
        }
    }

    pub fn title(&mut self, text: impl Into<String>) {
        self.blocks.push(PlanBlock::Title(text.into()));
    }

    pub fn heading(&mut self, text: impl Into<String>) {
        self.blocks.push(PlanBlock::Heading(text.into()));
    }

    pub fn text(&mut self, text: impl Into<String>) {
        self.indented(text, 0);
    }

    pub fn indented(&mut self, text: impl Into<String>, indent: usize) {
        self.blocks.push(PlanBlock::Text {
            text: text.into(),
            indent,
        });
    }

    pub fn spacer(&mut self) {
        self.blocks.push(PlanBlock::Spacer);
    }

    /// Whether a heading with exactly this text exists
    pub fn has_heading(&self, heading: &str) -> bool {
        self.blocks
            .iter()
            .any(|block| matches!(block, PlanBlock::Heading(text) if text == heading))
    }
}

/// Errors raised while writing a plan to disk
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Failed to determine export directory")]
    NoExportDirectory,
    #[error("Failed to create export directory {path}: {source}")]
    CreateDirectory {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write plan to {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
