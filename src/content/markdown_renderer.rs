use std::io;
use std::io::ErrorKind;

use lazy_static::lazy_static;
use markdown::Options;
use regex::Regex;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::content::content_renderer::ContentRenderer;

lazy_static! {
    static ref SYNTAX_SET: SyntaxSet = SyntaxSet::load_defaults_newlines();
    static ref THEME_SET: ThemeSet = ThemeSet::load_defaults();
}

/// GFM markdown with fenced code blocks highlighted in a single theme.
pub struct HighlightRenderer {
    theme: Theme,
}

impl HighlightRenderer {
    pub fn new(theme_name: &str) -> io::Result<HighlightRenderer> {
        let theme = match THEME_SET.themes.get(theme_name) {
            Some(theme) => theme.clone(),
            None => {
                let mut known: Vec<&str> = THEME_SET.themes.keys().map(|k| k.as_str()).collect();
                known.sort();
                return Err(io::Error::new(
                    ErrorKind::InvalidInput,
                    format!("Unknown highlight theme {}. Available: {}", theme_name, known.join(", ")),
                ));
            }
        };

        Ok(HighlightRenderer { theme })
    }

    fn highlight_code_blocks(&self, html: &str) -> io::Result<String> {
        lazy_static! {
            static ref CODE_REGEX: Regex = Regex::new(
                r#"(?s)<pre><code class="language-(?P<lang>[^"]+)">(?P<code>.*?)</code></pre>"#
            ).unwrap();
        }

        let mut result = String::with_capacity(html.len());
        let mut last = 0;
        for caps in CODE_REGEX.captures_iter(html) {
            let (Some(whole), Some(lang), Some(code)) = (caps.get(0), caps.name("lang"), caps.name("code")) else {
                continue;
            };

            let syntax = SYNTAX_SET
                .find_syntax_by_token(lang.as_str())
                .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text());
            let code = unescape_html(code.as_str());
            let highlighted = highlighted_html_for_string(&code, &SYNTAX_SET, syntax, &self.theme)
                .map_err(|e| io::Error::new(ErrorKind::InvalidData, format!("Error highlighting {} block: {}", lang.as_str(), e)))?;

            result.push_str(&html[last..whole.start()]);
            result.push_str(&highlighted);
            last = whole.end();
        }
        result.push_str(&html[last..]);

        Ok(result)
    }
}

impl ContentRenderer for HighlightRenderer {
    fn render(&self, body: &str) -> io::Result<String> {
        let html = match markdown::to_html_with_options(body, &Options::gfm()) {
            Ok(x) => x,
            Err(e) => return Err(io::Error::new(ErrorKind::InvalidInput, e.reason.as_str())),
        };
        self.highlight_code_blocks(&html)
    }
}

/// Reverses the escaping applied by the markdown compiler inside code blocks.
fn unescape_html(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}
