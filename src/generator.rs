use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use spdlog::info;

use crate::page_sink::BufferSink;
use crate::routes::RouteTable;
use crate::site::Site;

pub const STATIC_URL_DIR: &str = "static";

/// Renders every page of the route table into `output_dir`.
///
/// Pages are produced one at a time and the first failure stops the run. Files
/// already written stay on disk.
pub fn generate_site(site: &Site, routes: &RouteTable, output_dir: &Path) -> Result<usize> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Error creating output directory {}", output_dir.display()))?;

    let targets = routes.pages(site)?;
    for target in targets.iter() {
        let mut sink = BufferSink::new();
        routes.dispatch(site, &target.url, &mut sink)
            .map_err(|e| anyhow!("Error generating {}: {:#}", target.url, e))?;

        let output_path = output_dir.join(&target.file);
        write_file(&output_path, sink.bytes())?;
        info!("Generated {} -> {}", target.url, output_path.display());
    }

    let copied = copy_static_files(&site.paths.static_dir, &output_dir.join(STATIC_URL_DIR))?;
    if copied > 0 {
        info!("Copied {} static files", copied);
    }

    Ok(targets.len())
}

fn write_file(output_path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Error creating directory {}", parent.display()))?;
    }
    fs::write(output_path, bytes)
        .with_context(|| format!("Error writing {}", output_path.display()))
}

/// Recursively copies `src_dir` into `dst_dir`. A missing `src_dir` copies nothing.
fn copy_static_files(src_dir: &Path, dst_dir: &Path) -> Result<usize> {
    if !src_dir.is_dir() {
        return Ok(0);
    }

    let mut copied = 0;
    let mut entries: Vec<_> = fs::read_dir(src_dir)
        .with_context(|| format!("Error reading {}", src_dir.display()))?
        .collect::<Result<_, _>>()?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let src_path = entry.path();
        let dst_path = dst_dir.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copied += copy_static_files(&src_path, &dst_path)?;
        } else {
            fs::create_dir_all(dst_dir)?;
            fs::copy(&src_path, &dst_path)
                .with_context(|| format!("Error copying {}", src_path.display()))?;
            copied += 1;
        }
    }
    Ok(copied)
}
