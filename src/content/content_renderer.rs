use std::io;

/// Turns a markdown body (front matter already removed) into HTML.
pub trait ContentRenderer {
    fn render(&self, body: &str) -> io::Result<String>;
}
