use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

pub const CFG_FILE_NAME: &str = "folio.toml";

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Site {
    pub title: String,
    pub about_title: String,
    pub contact_title: String,
    pub thoughts_title: String,
}

impl Default for Site {
    fn default() -> Self {
        Site {
            title: "My Blog".to_string(),
            about_title: "About Me".to_string(),
            contact_title: "Contact Me".to_string(),
            thoughts_title: "Thoughts".to_string(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Paths {
    pub template_dir: PathBuf,
    /// Primary content directory
    pub posts_dir: PathBuf,
    /// Secondary content directory
    pub thoughts_dir: PathBuf,
    /// Holds about.md and contact.md
    pub nav_dir: PathBuf,
    pub static_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Paths {
            template_dir: PathBuf::from("templates"),
            posts_dir: PathBuf::from("posts"),
            thoughts_dir: PathBuf::from("thoughts"),
            nav_dir: PathBuf::from("nav"),
            static_dir: PathBuf::from("static"),
            output_dir: PathBuf::from("public"),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Render {
    pub highlight_theme: String,
}

impl Default for Render {
    fn default() -> Self {
        Render {
            highlight_theme: "base16-ocean.dark".to_string(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Server {
    pub address: String,
    pub port: u16,
}

impl Default for Server {
    fn default() -> Self {
        Server {
            address: "0.0.0.0".to_string(),
            port: 8090,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct Log {
    pub level: LogLevel,
    #[serde(default)]
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Copy, Clone, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub site: Site,
    pub paths: Paths,
    pub render: Render,
    pub server: Server,
    pub log: Option<Log>,
}

fn parse_path(path: PathBuf) -> PathBuf {
    let Some(str_path) = path.to_str() else {
        return path;
    };
    if !str_path.starts_with("${exe_dir}") {
        return path;
    }

    let exe_dir = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    match exe_dir.as_ref().and_then(|dir| dir.to_str()) {
        Some(exe_dir) => PathBuf::from(str_path.replace("${exe_dir}", exe_dir)),
        None => path,
    }
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    let paths = cfg.paths;
    cfg.paths = Paths {
        template_dir: parse_path(paths.template_dir),
        posts_dir: parse_path(paths.posts_dir),
        thoughts_dir: parse_path(paths.thoughts_dir),
        nav_dir: parse_path(paths.nav_dir),
        static_dir: parse_path(paths.static_dir),
        output_dir: parse_path(paths.output_dir),
    };

    if let Some(ref mut log) = cfg.log {
        log.location = log.location.take().map(parse_path);
    }

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}

/// Looks for the config file next to the executable, then in the current directory,
/// then in the user config directory.
fn find_config_path() -> Option<PathBuf> {
    let mut candidates = vec![];
    if let Some(exe_dir) = env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf)) {
        candidates.push(exe_dir.join(CFG_FILE_NAME));
    }
    if let Ok(cur_dir) = env::current_dir() {
        candidates.push(cur_dir.join(CFG_FILE_NAME));
    }
    if let Some(cfg_dir) = dirs::config_dir() {
        candidates.push(cfg_dir.join("folio").join(CFG_FILE_NAME));
    }

    candidates.into_iter().find(|path| path.exists())
}

/// An explicit path must load. Without one, a missing file means defaults.
pub fn open_config(cfg_path: Option<PathBuf>) -> io::Result<Config> {
    let config_path = match cfg_path.or_else(find_config_path) {
        Some(path) => path,
        None => {
            println!("No {} found. Using default configuration", CFG_FILE_NAME);
            return Ok(Config::default());
        }
    };

    println!("Reading config from {}", config_path.display());
    let mut config = read_config(&config_path)?;

    if let Some(ref mut log) = config.log {
        if log.location.is_none() {
            log.location = dirs::cache_dir().map(|dir| dir.join("folio").join("log").join("folio.log"));
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = parse_config("").unwrap();
        assert_eq!(cfg.site.title, "My Blog");
        assert_eq!(cfg.paths.posts_dir, PathBuf::from("posts"));
        assert_eq!(cfg.paths.thoughts_dir, PathBuf::from("thoughts"));
        assert_eq!(cfg.paths.output_dir, PathBuf::from("public"));
        assert_eq!(cfg.server.port, 8090);
        assert_eq!(cfg.render.highlight_theme, "base16-ocean.dark");
        assert!(cfg.log.is_none());
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r##"
[site]
title = "Field Notes"

[paths]
posts_dir = "content/posts"

[server]
port = 9000

[log]
level = "Debug"
log_to_console = true
"##;
        let cfg = parse_config(toml_str).unwrap();
        assert_eq!(cfg.site.title, "Field Notes");
        assert_eq!(cfg.site.about_title, "About Me");
        assert_eq!(cfg.paths.posts_dir, PathBuf::from("content/posts"));
        assert_eq!(cfg.paths.template_dir, PathBuf::from("templates"));
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.server.address, "0.0.0.0");
        let log = cfg.log.unwrap();
        assert_eq!(log.level, LogLevel::Debug);
        assert!(log.log_to_console);
    }

    #[test]
    fn test_exe_dir_expansion() {
        let cfg = parse_config("[paths]\ntemplate_dir = \"${exe_dir}/templates\"\n").unwrap();
        let exe_dir = env::current_exe().unwrap().parent().unwrap().to_path_buf();
        assert_eq!(cfg.paths.template_dir, exe_dir.join("templates"));
    }

    #[test]
    fn test_invalid_config() {
        let err = parse_config("[server]\nport = \"eighty\"\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = open_config(Some(dir.path().join("absent.toml"))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_read_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CFG_FILE_NAME);
        fs::write(&path, "[render]\nhighlight_theme = \"InspiredGitHub\"\n").unwrap();
        let cfg = open_config(Some(path)).unwrap();
        assert_eq!(cfg.render.highlight_theme, "InspiredGitHub");
    }
}
