use std::io;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::slice::Iter;

use anyhow::{Context, Result};
use glob::{glob, Pattern};
use spdlog::debug;

use crate::content::content_renderer::ContentRenderer;
use crate::post::{load_post, slug_from_path, PostRecord, MARKDOWN_EXTENSION};

/// Posts ordered by date, most recent first.
#[derive(Debug, Clone, Default)]
pub struct PostCollection {
    posts: Vec<PostRecord>,
}

impl PostCollection {
    /// Sorts `posts` by date, descending. Posts sharing a date keep their input order.
    pub fn from_records(mut posts: Vec<PostRecord>) -> PostCollection {
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        PostCollection { posts }
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, PostRecord> {
        self.posts.iter()
    }

    pub fn into_inner(self) -> Vec<PostRecord> {
        self.posts
    }
}

impl<'a> IntoIterator for &'a PostCollection {
    type Item = &'a PostRecord;
    type IntoIter = Iter<'a, PostRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.posts.iter()
    }
}

/// `<dir>/*.md`, with the directory part escaped.
pub fn markdown_pattern(dir: &Path) -> io::Result<String> {
    let Some(dir) = dir.to_str() else {
        return Err(io::Error::new(
            ErrorKind::InvalidInput,
            format!("Content directory is not valid UTF-8: {}", dir.display()),
        ));
    };
    let dir = dir.trim_end_matches('/');
    Ok(format!("{}/*.{}", Pattern::escape(dir), MARKDOWN_EXTENSION))
}

/// Expands a glob pattern to the matching files, in the order glob returns them.
pub fn list_post_files(pattern: &str) -> Result<Vec<PathBuf>> {
    let entries = glob(pattern).with_context(|| format!("Invalid glob pattern {}", pattern))?;

    let mut files = vec![];
    for entry in entries {
        let path = entry.with_context(|| format!("Error reading entry matching {}", pattern))?;
        if path.is_file() {
            files.push(path);
        }
    }
    Ok(files)
}

/// Loads every post matching `pattern`. The first failing file aborts the whole load.
pub fn load_posts(pattern: &str, renderer: &dyn ContentRenderer) -> Result<PostCollection> {
    let files = list_post_files(pattern)?;

    let mut posts = Vec::with_capacity(files.len());
    for file in files.iter() {
        let post = load_post(file, renderer)
            .with_context(|| format!("Error loading post {}", file.display()))?;
        posts.push(post);
    }

    debug!("Loaded {} posts matching {}", posts.len(), pattern);
    Ok(PostCollection::from_records(posts))
}

pub fn load_dir_posts(dir: &Path, renderer: &dyn ContentRenderer) -> Result<PostCollection> {
    let pattern = markdown_pattern(dir)?;
    load_posts(&pattern, renderer)
}

/// Slugs of every markdown file in `dir`, without rendering anything.
pub fn list_slugs(dir: &Path) -> Result<Vec<String>> {
    let pattern = markdown_pattern(dir)?;
    let mut slugs = vec![];
    for file in list_post_files(&pattern)? {
        slugs.push(slug_from_path(&file)?);
    }
    Ok(slugs)
}
