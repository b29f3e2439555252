use ramhorns::Content;

pub mod list_renderer;
pub mod page_renderer;
pub mod post_renderer;

/// Data handed to a page template. The title also goes to the base layout.
pub trait PageView: Content {
    fn page_title(&self) -> &str;
}

#[derive(Content)]
struct Layout<'a> {
    site_title: &'a str,
    title: &'a str,
    body: &'a str,
}
