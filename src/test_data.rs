#[cfg(test)]
use std::fs::{self, File};
#[cfg(test)]
use std::io;
#[cfg(test)]
use std::path::{Path, PathBuf};
#[cfg(test)]
use std::time::{Duration, SystemTime};

#[cfg(test)]
use crate::config::Config;
#[cfg(test)]
use crate::content::content_renderer::ContentRenderer;
#[cfg(test)]
use crate::site::Site;

/// Echoes the body back so tests can see exactly what was rendered.
#[cfg(test)]
pub struct EchoRenderer;

#[cfg(test)]
impl ContentRenderer for EchoRenderer {
    fn render(&self, body: &str) -> io::Result<String> {
        Ok(format!("<echo>{}</echo>", body))
    }
}

/// Writes a file and pins its modification time.
#[cfg(test)]
pub fn write_markdown(dir: &Path, file_name: &str, content: &str, modified: SystemTime) -> PathBuf {
    let path = dir.join(file_name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    File::options().write(true).open(&path).unwrap().set_modified(modified).unwrap();
    path
}

#[cfg(test)]
pub fn fixed_mtime() -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(1_600_000_000)
}

#[cfg(test)]
pub const POST_YAML: &str = "---
title: Hello, World
date: 2024-03-14 09:30:00
---
First paragraph.

```rust
fn main() {
    println!(\"hello\");
}
```
";

#[cfg(test)]
pub const POST_TOML: &str = "+++
title = \"Notes on ownership\"
date = 2023-11-02
+++
Borrow, don't own.
";

#[cfg(test)]
pub const POST_NO_FRONT_MATTER: &str = "# Just markdown

Nothing else to see here, *really*.
";

#[cfg(test)]
pub const POST_MALFORMED_YAML: &str = "---
title: [unclosed
date: 2024-01-01
---
The body survives.
";

#[cfg(test)]
pub const BASE_TEMPLATE: &str = "<title>{{title}} - {{site_title}}</title><main>{{{body}}}</main>";

#[cfg(test)]
pub const HOME_TEMPLATE: &str = "<h1>{{title}}</h1>{{#posts}}<a href=\"{{link}}\">{{title}}</a>[{{date}}]{{/posts}}{{^posts}}empty{{/posts}}";

#[cfg(test)]
pub const POST_TEMPLATE: &str = "<h1>{{title}}</h1><time>{{date}} {{time}}</time>{{{content}}}";

#[cfg(test)]
pub const PAGE_TEMPLATE: &str = "<h1>{{title}}</h1>{{{content}}}";

/// Config rooted at `root`, with every directory underneath it.
#[cfg(test)]
pub fn test_config(root: &Path) -> Config {
    let mut config = Config::default();
    config.paths.posts_dir = root.join("posts");
    config.paths.thoughts_dir = root.join("thoughts");
    config.paths.nav_dir = root.join("nav");
    config.paths.template_dir = root.join("templates");
    config.paths.static_dir = root.join("static");
    config.paths.output_dir = root.join("public");
    config
}

#[cfg(test)]
pub fn test_site(root: &Path) -> Site {
    Site::new(&test_config(root), Box::new(EchoRenderer))
}

#[cfg(test)]
pub fn write_templates(root: &Path) {
    let dir = root.join("templates");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("base.html"), BASE_TEMPLATE).unwrap();
    fs::write(dir.join("home.html"), HOME_TEMPLATE).unwrap();
    fs::write(dir.join("post.html"), POST_TEMPLATE).unwrap();
    fs::write(dir.join("page.html"), PAGE_TEMPLATE).unwrap();
}
