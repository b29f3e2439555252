use std::path::PathBuf;

use anyhow::Result;

use crate::error::PageError;
use crate::page_sink::PageSink;
use crate::pages;
use crate::site::Site;

pub type PageHandler = fn(&Site) -> Result<String, PageError>;
pub type SlugHandler = fn(&Site, &str) -> Result<String, PageError>;

pub enum Route {
    /// A page living at one fixed path, written to `file` by the generator.
    Page {
        path: &'static str,
        file: &'static str,
        handler: PageHandler,
    },
    /// One page per slug under `prefix`, written to `<prefix>/<slug>/index.html`.
    Slug {
        prefix: &'static str,
        handler: SlugHandler,
    },
}

/// A page the generator has to produce.
#[derive(Debug, Clone, PartialEq)]
pub struct PageTarget {
    pub url: String,
    pub file: PathBuf,
}

/// The single source of truth for which pages exist, shared by the server and the generator.
pub struct RouteTable {
    routes: Vec<Route>,
}

impl Default for RouteTable {
    fn default() -> Self {
        RouteTable::new(vec![
            Route::Page { path: "/", file: "index.html", handler: pages::home },
            Route::Page { path: "/about", file: "about.html", handler: pages::about },
            Route::Page { path: "/contact", file: "contact.html", handler: pages::contact },
            Route::Page { path: "/thoughts", file: "thoughts.html", handler: pages::thoughts },
            Route::Slug { prefix: pages::POST_PREFIX, handler: pages::post },
        ])
    }
}

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> RouteTable {
        RouteTable { routes }
    }

    /// Produces the page for `path`.
    pub fn handle(&self, site: &Site, path: &str) -> Result<String, PageError> {
        let trimmed = match path.trim_end_matches('/') {
            "" => "/",
            x => x,
        };

        for route in self.routes.iter() {
            match route {
                Route::Page { path: route_path, handler, .. } if *route_path == trimmed => return handler(site),
                Route::Slug { prefix, handler } => {
                    if let Some(slug) = trimmed.strip_prefix(*prefix) {
                        if !slug.is_empty() {
                            return handler(site, slug);
                        }
                    }
                }
                _ => {}
            }
        }

        Err(PageError::NotFound(path.to_string()))
    }

    /// Writes the page for `path`, or the matching error response, into `sink`.
    ///
    /// The error is still returned so the caller can decide whether to carry on.
    pub fn dispatch(&self, site: &Site, path: &str, sink: &mut dyn PageSink) -> Result<(), PageError> {
        match self.handle(site, path) {
            Ok(html) => {
                sink.write_header(200);
                sink.write_body(html.as_bytes());
                Ok(())
            }
            Err(err) => {
                sink.write_header(err.status());
                sink.write_body(err.public_message().as_bytes());
                Err(err)
            }
        }
    }

    /// Every page of the site, with slugs taken from both content directories.
    pub fn pages(&self, site: &Site) -> Result<Vec<PageTarget>> {
        let mut targets = vec![];
        for route in self.routes.iter() {
            match route {
                Route::Page { path, file, .. } => targets.push(PageTarget {
                    url: path.to_string(),
                    file: PathBuf::from(file),
                }),
                Route::Slug { prefix, .. } => {
                    let dir = prefix.trim_matches('/');
                    for slug in site.all_slugs()? {
                        targets.push(PageTarget {
                            url: format!("{}{}", prefix, slug),
                            file: PathBuf::from(dir).join(&slug).join("index.html"),
                        });
                    }
                }
            }
        }
        Ok(targets)
    }
}
