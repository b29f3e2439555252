use ramhorns::Content;

use crate::post::PostRecord;
use crate::text_utils::format_date_time;
use crate::view::PageView;

#[derive(Content)]
pub struct PostPage<'a> {
    title: &'a str,
    slug: &'a str,
    date: String,
    time: String,
    content: &'a str,
}

impl<'a> PostPage<'a> {
    pub fn new(post: &'a PostRecord) -> PostPage<'a> {
        let (date, time) = format_date_time(&post.date);
        PostPage {
            title: post.title.as_str(),
            slug: post.slug.as_str(),
            date,
            time,
            content: post.content.as_str(),
        }
    }
}

impl PageView for PostPage<'_> {
    fn page_title(&self) -> &str {
        self.title
    }
}

/// A fixed page such as "about". The title comes from configuration, not the file.
#[derive(Content)]
pub struct NamedPage<'a> {
    title: &'a str,
    content: &'a str,
}

impl<'a> NamedPage<'a> {
    pub fn new(title: &'a str, post: &'a PostRecord) -> NamedPage<'a> {
        NamedPage {
            title,
            content: post.content.as_str(),
        }
    }
}

impl PageView for NamedPage<'_> {
    fn page_title(&self) -> &str {
        self.title
    }
}
