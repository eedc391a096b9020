//! The "Twig blocks" documentation panel.
//!
//! Renders the `twigBlocks` injected into a component's docgen metadata as
//! a two column table of block names and highlighted block code.

use log::debug;
use serde::Serialize;
use serde_json::Value;
use twigdoc_core::Fragment;

use crate::highlight::{escape_html, highlight_html};

pub const ADDON_ID: &str = "sw-twig-blocks";
pub const PANEL_ID: &str = "sw-twig-blocks/panel";
pub const PANEL_TITLE: &str = "Twig blocks";

/// Property the panel reads docgen metadata from by default.
pub const DEFAULT_INJECT_AT: &str = "__docgenInfo";

const STYLE: &str = r#"
.sw-twig-args-table {
    font-size: 13px;
    line-height: 20px;
    padding: 0;
    border-collapse: collapse;
    width: 100%;
    margin: 2em 0;
    overflow: auto;
}

.sw-twig-args-table tr {
    border-top: 1px solid #eee;
    background-color: #fff;
    margin: 0px;
    padding: 0px;
}

.sw-twig-args-table tr th {
    font-weight: bold;
    border: 1px solid #ddd;
    border-radius: 3px 3px 0 0;
    text-align: left;
    margin: 0;
    padding: 0.5em 0.75em;
}

.sw-twig-args-table tr td {
    border: 1px solid #ddd;
    text-align: left;
    margin: 0;
    padding: 0.5em 1em;
}

.sw-twig-args-table tr th:first-child,
.sw-twig-args-table tr td:first-child {
    margin-top: 0;
}

.sw-twig-args-table tr:nth-child(2n) {
    background-color: #f8f8f8;
}
"#;

/// How the panel registers itself with the documentation host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelRegistration {
    pub addon_id: &'static str,
    pub panel_id: &'static str,
    pub title: &'static str,
}

impl Default for PanelRegistration {
    fn default() -> Self {
        Self {
            addon_id: ADDON_ID,
            panel_id: PANEL_ID,
            title: PANEL_TITLE,
        }
    }
}

/// A fresh row key: 16 random bytes, hex encoded.
pub fn random_key() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Renders the block table for a story.
#[derive(Debug, Clone)]
pub struct PanelRenderer {
    inject_at: String,
    next_key: fn() -> String,
}

impl Default for PanelRenderer {
    fn default() -> Self {
        Self {
            inject_at: DEFAULT_INJECT_AT.to_string(),
            next_key: random_key,
        }
    }
}

impl PanelRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read metadata from a property other than `__docgenInfo`.
    pub fn with_inject_at(mut self, inject_at: impl Into<String>) -> Self {
        self.inject_at = inject_at.into();
        self
    }

    /// Replace the row key generator.
    pub fn with_key_source(mut self, next_key: fn() -> String) -> Self {
        self.next_key = next_key;
        self
    }

    /// Render the panel for a story's data. No story data renders nothing.
    pub fn render(&self, story: Option<&Value>) -> String {
        let Some(story) = story else {
            return String::new();
        };
        let fragments = self.fragments(story);
        debug!("Rendering {} twig block(s)", fragments.len());
        self.render_fragments(&fragments)
    }

    /// `parameters.component.<inject_at>.twigBlocks` of a story.
    pub fn fragments(&self, story: &Value) -> Vec<Fragment> {
        story
            .pointer(&format!("/parameters/component/{}/twigBlocks", self.inject_at))
            .and_then(Value::as_array)
            .map(|blocks| blocks.iter().map(fragment_from_value).collect())
            .unwrap_or_default()
    }

    pub fn render_fragments(&self, fragments: &[Fragment]) -> String {
        let mut html = String::new();
        let mut builder = PanelBuilder {
            html: &mut html,
            indent: 0,
        };

        builder.line(r#"<div style="margin: 1rem">"#);
        builder.indent += 1;
        builder.line(&format!("<style>{STYLE}</style>"));
        builder.line(r#"<table class="sw-twig-args-table">"#);
        builder.indent += 1;
        builder.line("<thead>");
        builder.indent += 1;
        builder.line("<tr>");
        builder.indent += 1;
        builder.line("<th>Name</th>");
        builder.line("<th>Content</th>");
        builder.indent -= 1;
        builder.line("</tr>");
        builder.indent -= 1;
        builder.line("</thead>");
        builder.line("<tbody>");
        builder.indent += 1;
        for fragment in fragments {
            builder.row(fragment, &(self.next_key)());
        }
        builder.indent -= 1;
        builder.line("</tbody>");
        builder.indent -= 1;
        builder.line("</table>");
        builder.indent -= 1;
        builder.line("</div>");

        html
    }
}

/// Render the panel with the default settings.
pub fn render_panel(story: Option<&Value>) -> String {
    PanelRenderer::default().render(story)
}

/// Entries with a missing name or code still render, as empty strings.
fn fragment_from_value(value: &Value) -> Fragment {
    let field = |key: &str| value.get(key).and_then(Value::as_str).unwrap_or_default();
    Fragment::new(field("name"), field("code"))
}

struct PanelBuilder<'a> {
    html: &'a mut String,
    indent: usize,
}

impl<'a> PanelBuilder<'a> {
    fn line(&mut self, content: &str) {
        for _ in 0..self.indent {
            self.html.push_str("  ");
        }
        self.html.push_str(content);
        self.html.push('\n');
    }

    fn row(&mut self, fragment: &Fragment, key: &str) {
        self.line(&format!(r#"<tr data-key="{}">"#, escape_html(key)));
        self.indent += 1;
        self.line(&format!(
            "<td><strong>{}</strong></td>",
            escape_html(&fragment.name)
        ));
        let content = if fragment.is_empty() {
            r#"<em style="color: #6f6f6f">(empty block)</em>"#.to_string()
        } else {
            format!(
                r#"<pre><code class="language-html">{}</code></pre>"#,
                highlight_html(&fragment.code)
            )
        };
        self.line(&format!("<td>{content}</td>"));
        self.indent -= 1;
        self.line("</tr>");
    }
}
