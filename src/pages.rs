use crate::error::PageError;
use crate::site::Site;
use crate::view::list_renderer::ListPage;
use crate::view::post_renderer::{NamedPage, PostPage};

pub const POST_PREFIX: &str = "/post/";

pub fn home(site: &Site) -> Result<String, PageError> {
    let posts = site.posts()?;
    let page = ListPage::new(&site.settings.title, POST_PREFIX, &posts);
    Ok(site.render_page("home.html", &page)?)
}

pub fn thoughts(site: &Site) -> Result<String, PageError> {
    let posts = site.thoughts()?;
    let page = ListPage::new(&site.settings.thoughts_title, POST_PREFIX, &posts);
    Ok(site.render_page("home.html", &page)?)
}

pub fn about(site: &Site) -> Result<String, PageError> {
    named_page(site, "about", &site.settings.about_title)
}

pub fn contact(site: &Site) -> Result<String, PageError> {
    named_page(site, "contact", &site.settings.contact_title)
}

fn named_page(site: &Site, name: &str, title: &str) -> Result<String, PageError> {
    let content = site.nav_page(name)?;
    let page = NamedPage::new(title, &content);
    Ok(site.render_page("page.html", &page)?)
}

pub fn post(site: &Site, slug: &str) -> Result<String, PageError> {
    let post = site.find_post(slug)?;
    let page = PostPage::new(&post);
    Ok(site.render_page("post.html", &page)?)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::test_data::{fixed_mtime, test_site, write_markdown, write_templates};

    #[test]
    fn test_home_lists_primary_posts() {
        let dir = TempDir::new().unwrap();
        write_templates(dir.path());
        write_markdown(&dir.path().join("posts"), "hello-world.md", "---\ntitle: Hello\ndate: 2024-05-01\n---\nhi", fixed_mtime());
        write_markdown(&dir.path().join("thoughts"), "aside.md", "not on home", fixed_mtime());

        let html = home(&test_site(dir.path())).unwrap();
        assert_eq!(html, "<title>My Blog - My Blog</title><main><h1>My Blog</h1>\
<a href=\"/post/hello-world\">Hello</a>[2024-05-01]</main>");
    }

    #[test]
    fn test_home_survives_non_utf8_post() {
        let dir = TempDir::new().unwrap();
        write_templates(dir.path());
        write_markdown(&dir.path().join("posts"), "good.md", "---\ndate: 2024-05-02\n---\nok", fixed_mtime());
        let latin1 = write_markdown(&dir.path().join("posts"), "latin1.md", "", fixed_mtime());
        fs::write(&latin1, b"---\ndate: 2024-05-01\n---\nd\xe9j\xe0 vu").unwrap();

        let html = home(&test_site(dir.path())).unwrap();
        assert!(html.contains("<a href=\"/post/good\">Good</a>[2024-05-02]"));
        assert!(html.contains("<a href=\"/post/latin1\">Latin1</a>[2024-05-01]"));
    }

    #[test]
    fn test_thoughts_lists_secondary_posts() {
        let dir = TempDir::new().unwrap();
        write_templates(dir.path());
        write_markdown(&dir.path().join("thoughts"), "aside.md", "---\ndate: 2024-05-02\n---\nx", fixed_mtime());

        let html = thoughts(&test_site(dir.path())).unwrap();
        assert!(html.contains("<h1>Thoughts</h1><a href=\"/post/aside\">Aside</a>[2024-05-02]"));
    }

    #[test]
    fn test_named_pages() {
        let dir = TempDir::new().unwrap();
        write_templates(dir.path());
        write_markdown(&dir.path().join("nav"), "about.md", "---\ntitle: ignored\n---\nwho", fixed_mtime());
        write_markdown(&dir.path().join("nav"), "contact.md", "mail", fixed_mtime());

        let site = test_site(dir.path());
        assert_eq!(about(&site).unwrap(), "<title>About Me - My Blog</title><main><h1>About Me</h1><echo>who</echo></main>");
        assert!(contact(&site).unwrap().contains("<h1>Contact Me</h1><echo>mail</echo>"));
    }

    #[test]
    fn test_missing_nav_page_is_internal_error() {
        let dir = TempDir::new().unwrap();
        write_templates(dir.path());
        let err = about(&test_site(dir.path())).unwrap_err();
        assert_eq!(err.status(), 500);
    }

    #[test]
    fn test_post_page() {
        let dir = TempDir::new().unwrap();
        write_templates(dir.path());
        write_markdown(&dir.path().join("posts"), "first.md", "---\ndate: 2024-05-01 10:11:12\n---\nbody", fixed_mtime());

        let html = post(&test_site(dir.path()), "first").unwrap();
        assert_eq!(html, "<title>First - My Blog</title><main><h1>First</h1>\
<time>2024-05-01 10:11:12</time><echo>body</echo></main>");
    }

    #[test]
    fn test_post_not_found_vs_template_failure() {
        let dir = TempDir::new().unwrap();
        write_templates(dir.path());
        write_markdown(&dir.path().join("posts"), "first.md", "body", fixed_mtime());
        let site = test_site(dir.path());

        assert_eq!(post(&site, "second").unwrap_err().status(), 404);

        fs::remove_file(dir.path().join("templates").join("post.html")).unwrap();
        assert_eq!(post(&site, "first").unwrap_err().status(), 500);
    }
}
