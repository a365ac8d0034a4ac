//! Content tree and its Markdown rendering.
//!
//! Stored document content is HTML markup owned by the editing surface. The
//! only place its structure is interpreted is here, when a document is
//! exported.
use scraper::{ElementRef, Html, Node};

/// One node of a rendered content tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentNode {
    Text(String),
    Element {
        /// Lower-case tag name
        tag: String,
        children: Vec<ContentNode>,
    },
}

impl ContentNode {
    pub fn text(text: impl Into<String>) -> Self {
        ContentNode::Text(text.into())
    }

    pub fn element(tag: impl Into<String>, children: Vec<ContentNode>) -> Self {
        ContentNode::Element {
            tag: tag.into().to_lowercase(),
            children,
        }
    }

    /// Parses stored markup into a tree rooted at a synthetic `body` element.
    ///
    /// Comments, doctypes and processing instructions are dropped; they never
    /// contribute to any export.
    pub fn parse_fragment(markup: &str) -> Self {
        let fragment = Html::parse_fragment(markup);
        ContentNode::element("body", convert_children(fragment.root_element()))
    }

    pub fn children(&self) -> &[ContentNode] {
        match self {
            ContentNode::Text(_) => &[],
            ContentNode::Element { children, .. } => children,
        }
    }
}

fn convert_children(element: ElementRef<'_>) -> Vec<ContentNode> {
    element
        .children()
        .filter_map(|child| match child.value() {
            Node::Text(text) => Some(ContentNode::Text(String::from(&**text))),
            Node::Element(_) => ElementRef::wrap(child).map(|el| ContentNode::Element {
                tag: el.value().name().to_lowercase(),
                children: convert_children(el),
            }),
            _ => None,
        })
        .collect()
}

/// Renders the children of `root` as Markdown, prefixed by `# {title}` when
/// the title is non-empty.
///
/// Output depends only on the tree and title.
pub fn to_markdown(root: &ContentNode, title: &str) -> String {
    let mut markdown = String::new();
    if !title.is_empty() {
        markdown.push_str(&format!("# {}\n\n", title));
    }

    for child in root.children() {
        markdown.push_str(&render(child));
    }
    markdown
}

fn render(node: &ContentNode) -> String {
    match node {
        ContentNode::Text(text) => text.clone(),
        ContentNode::Element { tag, children } => {
            let text: String = children.iter().map(render).collect();

            match tag.as_str() {
                "h1" => format!("# {}\n\n", text),
                "h2" => format!("## {}\n\n", text),
                "h3" => format!("### {}\n\n", text),
                "p" => format!("{}\n\n", text),
                "strong" | "b" => format!("**{}**", text),
                "em" | "i" => format!("*{}*", text),
                "u" => format!("<u>{}</u>", text),
                "ul" | "ol" => format!("{}\n", text),
                "li" => format!("- {}\n", text),
                "br" => "\n".to_string(),
                _ => text,
            }
        }
    }
}

/// Text of `root` as it reads on screen: whitespace runs collapse to one
/// space and block elements sit on their own lines.
pub fn to_plain_text(root: &ContentNode) -> String {
    let mut out = String::new();
    collect_text(root, &mut out);
    out.trim_end().to_string()
}

const BLOCK_TAGS: &[&str] = &[
    "p", "div", "h1", "h2", "h3", "h4", "h5", "h6", "li", "ul", "ol", "blockquote", "pre",
    "section", "article", "header", "footer", "table", "tr",
];

fn collect_text(node: &ContentNode, out: &mut String) {
    match node {
        ContentNode::Text(text) => {
            let mut collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
            if collapsed.is_empty() {
                collapsed.push(' ');
            } else {
                if text.starts_with(char::is_whitespace) {
                    collapsed.insert(0, ' ');
                }
                if text.ends_with(char::is_whitespace) {
                    collapsed.push(' ');
                }
            }
            if out.is_empty() || out.ends_with('\n') || out.ends_with(' ') {
                out.push_str(collapsed.trim_start());
            } else {
                out.push_str(&collapsed);
            }
        }
        ContentNode::Element { tag, .. } if tag == "br" => {
            let kept = out.trim_end_matches(' ').len();
            out.truncate(kept);
            out.push('\n');
        }
        ContentNode::Element { tag, children } => {
            let block = BLOCK_TAGS.contains(&tag.as_str());
            if block && !out.is_empty() {
                end_line(out);
            }
            for child in children {
                collect_text(child, out);
            }
            if block {
                end_line(out);
            }
        }
    }
}

/// Drops trailing spaces and makes sure `out` ends with a line break.
fn end_line(out: &mut String) {
    let kept = out.trim_end_matches(' ').len();
    out.truncate(kept);
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}
