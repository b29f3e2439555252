use std::fs;
use std::io;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use ramhorns::Template;

use crate::view::{Layout, PageView};

pub const BASE_TEMPLATE: &str = "base.html";

/// Renders views through a page template wrapped in the base layout.
///
/// Templates are read from disk on every call, so edits show up without a restart.
pub struct PageRenderer {
    template_dir: PathBuf,
    site_title: String,
}

pub fn read_template(tpl_dir: &Path, file_name: &str) -> io::Result<String> {
    let full_path = tpl_dir.join(file_name);
    fs::read_to_string(&full_path).map_err(|e| {
        io::Error::new(e.kind(), format!("Error loading template {}: {}", full_path.display(), e))
    })
}

impl PageRenderer {
    pub fn new(template_dir: PathBuf, site_title: String) -> PageRenderer {
        PageRenderer { template_dir, site_title }
    }

    /// `templates` is `[base, page]`. The page is rendered first and its output becomes
    /// the `body` of the base layout.
    pub fn render<V: PageView>(&self, templates: [&str; 2], view: &V) -> io::Result<String> {
        let [base, page] = templates;

        let page_tpl = self.load(page)?;
        let body = page_tpl.render(view);

        let base_tpl = self.load(base)?;
        Ok(base_tpl.render(&Layout {
            site_title: &self.site_title,
            title: view.page_title(),
            body: &body,
        }))
    }

    fn load(&self, name: &str) -> io::Result<Template<'static>> {
        let source = read_template(&self.template_dir, name)?;
        match Template::new(source) {
            Ok(x) => Ok(x),
            Err(e) => Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing template {}: {}", name, e))),
        }
    }
}
