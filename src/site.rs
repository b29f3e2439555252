use std::io;
use std::path::{Component, Path, PathBuf};

use anyhow::Result;

use crate::config::{self, Config};
use crate::content::content_renderer::ContentRenderer;
use crate::content::markdown_renderer::HighlightRenderer;
use crate::error::PageError;
use crate::post::{load_post, PostRecord, MARKDOWN_EXTENSION};
use crate::post_list::{list_slugs, load_dir_posts, PostCollection};
use crate::view::page_renderer::{PageRenderer, BASE_TEMPLATE};
use crate::view::PageView;

/// Everything a page handler needs: where content lives and how to render it.
///
/// Nothing is cached. Each call goes back to the file system.
pub struct Site {
    pub settings: config::Site,
    pub paths: config::Paths,
    markdown: Box<dyn ContentRenderer + Send + Sync>,
    pages: PageRenderer,
}

impl Site {
    pub fn new(config: &Config, markdown: Box<dyn ContentRenderer + Send + Sync>) -> Site {
        let pages = PageRenderer::new(config.paths.template_dir.clone(), config.site.title.clone());
        Site {
            settings: config.site.clone(),
            paths: config.paths.clone(),
            markdown,
            pages,
        }
    }

    pub fn from_config(config: &Config) -> io::Result<Site> {
        let markdown = HighlightRenderer::new(&config.render.highlight_theme)?;
        Ok(Site::new(config, Box::new(markdown)))
    }

    /// Primary collection
    pub fn posts(&self) -> Result<PostCollection> {
        load_dir_posts(&self.paths.posts_dir, self.markdown.as_ref())
    }

    /// Secondary collection
    pub fn thoughts(&self) -> Result<PostCollection> {
        load_dir_posts(&self.paths.thoughts_dir, self.markdown.as_ref())
    }

    /// Looks the slug up in the posts directory, then in the thoughts directory.
    pub fn find_post(&self, slug: &str) -> Result<PostRecord, PageError> {
        if !is_valid_slug(slug) {
            return Err(PageError::NotFound(slug.to_string()));
        }

        for dir in [&self.paths.posts_dir, &self.paths.thoughts_dir] {
            let file_path = post_file(dir, slug);
            if file_path.is_file() {
                return Ok(load_post(&file_path, self.markdown.as_ref())?);
            }
        }

        Err(PageError::NotFound(slug.to_string()))
    }

    /// A markdown file from the nav directory, e.g. `about`.
    pub fn nav_page(&self, name: &str) -> io::Result<PostRecord> {
        load_post(&post_file(&self.paths.nav_dir, name), self.markdown.as_ref())
    }

    /// Distinct slugs from both content directories, posts first.
    pub fn all_slugs(&self) -> Result<Vec<String>> {
        let mut slugs = list_slugs(&self.paths.posts_dir)?;
        for slug in list_slugs(&self.paths.thoughts_dir)? {
            if !slugs.contains(&slug) {
                slugs.push(slug);
            }
        }
        Ok(slugs)
    }

    pub fn render_page<V: PageView>(&self, page_template: &str, view: &V) -> io::Result<String> {
        self.pages.render([BASE_TEMPLATE, page_template], view)
    }
}

fn post_file(dir: &Path, slug: &str) -> PathBuf {
    dir.join(format!("{}.{}", slug, MARKDOWN_EXTENSION))
}

/// A slug must name a single file, so `.`, `..` and separators are out. Dots inside
/// a name are fine.
fn is_valid_slug(slug: &str) -> bool {
    if slug.contains(['/', '\\']) {
        return false;
    }
    let mut components = Path::new(slug).components();
    matches!((components.next(), components.next()), (Some(Component::Normal(_)), None))
}
