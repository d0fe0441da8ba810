//! Markdown rendering with syntax highlighting

use anyhow::Result;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::config::HighlightConfig;
use crate::helpers::html_escape;

/// Separates the summary shown on the blog index from the rest of a post
pub const MORE_MARKER: &str = "<!-- more -->";

/// Markdown renderer; fenced code is highlighted when enabled
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme: Option<Theme>,
}

impl MarkdownRenderer {
    pub fn new(highlight: &HighlightConfig) -> Self {
        let theme = if highlight.enable {
            let mut themes = ThemeSet::load_defaults().themes;
            let theme = themes.remove(&highlight.theme);
            if theme.is_none() {
                tracing::warn!(
                    "Unknown highlight theme {:?}, code blocks will not be highlighted",
                    highlight.theme
                );
            }
            theme
        } else {
            None
        };

        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme,
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> Result<String> {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_HEADING_ATTRIBUTES;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        // Some(lang) while inside a code block; lang may be empty
        let mut code_lang: Option<String> = None;
        let mut code = String::new();

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    code_lang = Some(match kind {
                        CodeBlockKind::Fenced(lang) => {
                            lang.split_whitespace().next().unwrap_or("").to_string()
                        }
                        CodeBlockKind::Indented => String::new(),
                    });
                    code.clear();
                }
                Event::End(TagEnd::CodeBlock) => {
                    let lang = code_lang.take().unwrap_or_default();
                    events.push(Event::Html(CowStr::from(self.code_block(&code, &lang))));
                }
                Event::Text(text) if code_lang.is_some() => code.push_str(&text),
                other => events.push(other),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        Ok(html_output)
    }

    /// Code block markup using prism-style class names
    fn code_block(&self, code: &str, lang: &str) -> String {
        let lang = if lang.is_empty() { "text" } else { lang };
        let class = html_escape(lang);

        if let Some(theme) = &self.theme {
            let syntax = self
                .syntax_set
                .find_syntax_by_token(lang)
                .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());
            if let Ok(highlighted) =
                highlighted_html_for_string(code, &self.syntax_set, syntax, theme)
            {
                return format!(
                    r#"<div class="gatsby-highlight" data-language="{}">{}</div>"#,
                    class, highlighted
                );
            }
        }

        format!(
            r#"<div class="gatsby-highlight" data-language="{0}"><pre class="language-{0}"><code class="language-{0}">{1}</code></pre></div>"#,
            class,
            html_escape(code)
        )
    }

    /// Split a markdown body at the more marker into (summary, full body)
    pub fn split_more(body: &str) -> (Option<&str>, String) {
        match body.find(MORE_MARKER) {
            Some(pos) => {
                let summary = body[..pos].trim_end();
                let rest = body[pos + MORE_MARKER.len()..].trim_start();
                (Some(summary), format!("{}\n\n{}", summary, rest))
            }
            None => (None, body.to_string()),
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new(&HighlightConfig::default())
    }
}
