use std::fmt;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io;
use std::io::ErrorKind;
use std::path::Path;

use chrono::NaiveDateTime;
use spdlog::debug;

use crate::content::content_renderer::ContentRenderer;
use crate::content::front_matter;
use crate::text_utils::{humanize_file_name, system_time_to_local};

pub const MARKDOWN_EXTENSION: &str = "md";

/// A single rendered markdown document.
#[derive(Debug, Clone, PartialEq)]
pub struct PostRecord {
    pub title: String,
    pub date: NaiveDateTime,
    pub slug: String,
    /// Rendered HTML. Templates must emit it unescaped.
    pub content: String,
}

impl Display for PostRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "slug={}, date={}, title={}", self.slug, self.date, self.title)
    }
}

/// File name without the markdown extension.
pub fn slug_from_path(file_path: &Path) -> io::Result<String> {
    let file_stem = file_path.file_stem().and_then(|s| s.to_str());
    match file_stem {
        Some(stem) if !stem.is_empty() => Ok(stem.to_string()),
        _ => Err(io::Error::new(
            ErrorKind::InvalidInput,
            format!("Cannot derive a slug from {}", file_path.display()),
        )),
    }
}

/// Loads a markdown file into a [`PostRecord`].
///
/// Title and date come from the front matter when present. Otherwise the title is
/// derived from the file name and the date is the file modification time. Read, stat
/// and rendering failures are returned as errors; front matter problems are not.
/// Bytes that are not UTF-8 are replaced, never rejected.
pub fn load_post(file_path: &Path, renderer: &dyn ContentRenderer) -> io::Result<PostRecord> {
    let bytes = fs::read(file_path)?;
    let raw = String::from_utf8_lossy(&bytes);
    let (front_matter, body) = front_matter::extract(&raw);

    let slug = slug_from_path(file_path)?;

    let title = match front_matter.title {
        Some(title) if !title.trim().is_empty() => title,
        _ => {
            let file_name = file_path.file_name().and_then(|s| s.to_str()).unwrap_or(&slug);
            humanize_file_name(file_name)
        }
    };

    let date = match front_matter.date {
        Some(date) => date,
        None => {
            let modified = fs::metadata(file_path)?.modified()?;
            system_time_to_local(modified)
        }
    };

    let content = renderer.render(body).map_err(|e| {
        io::Error::new(e.kind(), format!("Error rendering {}: {}", file_path.display(), e))
    })?;

    let post = PostRecord { title, date, slug, content };
    debug!("Loaded post {}", post);
    Ok(post)
}
