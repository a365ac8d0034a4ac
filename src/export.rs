//! Document export to Markdown, plain text or HTML.
use std::path::{Path, PathBuf};

use clap::ValueEnum;

use crate::{to_markdown, to_plain_text, ContentNode, ResolvedContent};

/// Title used for file names when a document has none.
const DEFAULT_EXPORT_TITLE: &str = "Document";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Markdown,
    Text,
    Html,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Text => "txt",
            ExportFormat::Html => "html",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "MARKDOWN",
            ExportFormat::Text => "TEXT",
            ExportFormat::Html => "HTML",
        }
    }
}

/// Renders a resolved document in the requested format.
pub fn render_export(document: &ResolvedContent, format: ExportFormat) -> String {
    match format {
        ExportFormat::Markdown => {
            to_markdown(&ContentNode::parse_fragment(&document.content), &document.title)
        }
        ExportFormat::Text => to_plain_text(&ContentNode::parse_fragment(&document.content)),
        ExportFormat::Html => document.content.clone(),
    }
}

/// `<dir>/<title>.<ext>`, with path separators in the title replaced.
pub fn export_file_name(dir: &Path, title: &str, format: ExportFormat) -> PathBuf {
    let title = match title.trim() {
        "" => DEFAULT_EXPORT_TITLE.to_string(),
        trimmed => trimmed.replace(['/', '\\'], "-"),
    };
    dir.join(format!("{}.{}", title, format.extension()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document() -> ResolvedContent {
        ResolvedContent {
            title: "Plans".to_string(),
            content: "<h2>Week</h2><ul><li>ship</li></ul>".to_string(),
        }
    }

    #[test]
    fn markdown_export_prepends_title() {
        assert_eq!(
            render_export(&document(), ExportFormat::Markdown),
            "# Plans\n\n## Week\n\n- ship\n\n"
        );
    }

    #[test]
    fn text_and_html_exports() {
        assert_eq!(render_export(&document(), ExportFormat::Text), "Week\nship");
        assert_eq!(
            render_export(&document(), ExportFormat::Html),
            document().content
        );
    }

    #[test]
    fn file_names() {
        let dir = Path::new("/tmp/out");
        assert_eq!(
            export_file_name(dir, "Plans", ExportFormat::Markdown),
            dir.join("Plans.md")
        );
        assert_eq!(
            export_file_name(dir, "  ", ExportFormat::Text),
            dir.join("Document.txt")
        );
        assert_eq!(
            export_file_name(dir, "a/b", ExportFormat::Html),
            dir.join("a-b.html")
        );
    }
}
