//! Move flat content files into one directory per post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::Site;

/// Turn every `<source_dir>/<name>.md` into `<source_dir>/<name>/index.md`.
///
/// Only files directly in the source directory are moved, so images can
/// live next to their post afterwards. The flat file is removed: left in
/// place it would publish to the same route as its nested copy. Returns the
/// new paths.
pub fn run(site: &Site) -> Result<Vec<PathBuf>> {
    let mut moved = Vec::new();
    if !site.source_dir.exists() {
        return Ok(moved);
    }

    let mut entries: Vec<_> = fs::read_dir(&site.source_dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .collect();
    entries.sort();

    for path in entries {
        let is_markdown = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("md") | Some("markdown")
        );
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if !is_markdown || stem == "index" || stem.starts_with(['_', '.']) {
            continue;
        }

        let target_dir = site.source_dir.join(stem);
        let target = target_dir.join("index.md");
        if target.exists() {
            tracing::warn!("Skipping {:?}: {:?} already exists", path, target);
            continue;
        }

        fs::create_dir_all(&target_dir)?;
        fs::rename(&path, &target)?;
        tracing::info!("Moved {:?} -> {:?}", path, target);
        moved.push(target);
    }

    Ok(moved)
}
