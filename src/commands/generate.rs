//! Generate static files

use anyhow::Result;
use notify::Watcher;
use std::sync::mpsc::{channel, RecvTimeoutError};
use std::time::{Duration, Instant};

use crate::generator::{GenerateSummary, Generator};
use crate::Site;

/// Load content and write the whole site
pub fn run(site: &Site) -> Result<()> {
    build(site).map(|_| ())
}

/// Like [`run`], returning what was written
pub fn build(site: &Site) -> Result<GenerateSummary> {
    let start = Instant::now();

    let records = site.load_records()?;
    tracing::info!("Loaded {} records", records.len());

    let summary = Generator::new(site)?.generate(&records)?;

    tracing::info!("Generated in {:.2}s", start.elapsed().as_secs_f64());
    Ok(summary)
}

/// Watch for file changes and regenerate; blocks until the watcher stops
pub fn watch(site: &Site) -> Result<()> {
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    for dir in [&site.source_dir, &site.static_dir] {
        if dir.exists() {
            watcher.watch(dir, notify::RecursiveMode::Recursive)?;
        }
    }
    let config_path = site.base_dir.join("_config.yml");
    if config_path.exists() {
        watcher.watch(&config_path, notify::RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    let mut last_rebuild = Instant::now();

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(_event) => {
                if last_rebuild.elapsed() > Duration::from_millis(500) {
                    tracing::info!("File changed, regenerating...");
                    if let Err(e) = rebuild(site) {
                        tracing::error!("Generation failed: {:#}", e);
                    }
                    last_rebuild = Instant::now();
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    Ok(())
}

/// Regenerate after a change, re-reading `_config.yml`
pub fn rebuild(site: &Site) -> Result<()> {
    let fresh = Site::new(&site.base_dir)?;
    run(&fresh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_build_reads_config_and_content() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("_config.yml"),
            "title: Test Site\npublic_dir: out\nhighlight:\n  enable: false\n",
        )
        .unwrap();
        fs::create_dir_all(dir.path().join("content")).unwrap();
        fs::write(
            dir.path().join("content/hello.md"),
            "---\nlayout: post\ntitle: Hello\ndate: 2020-05-05\n---\nHi.\n",
        )
        .unwrap();

        let site = Site::new(dir.path()).unwrap();
        let summary = build(&site).unwrap();
        assert_eq!(summary.pages, 3);

        let home = fs::read_to_string(dir.path().join("out/index.html")).unwrap();
        assert!(home.contains("<title>Test Site</title>"));
        assert!(home.contains("Hello"));
        assert!(dir.path().join("out/hello/index.html").exists());
    }

    #[test]
    fn test_build_without_content() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();
        let summary = build(&site).unwrap();
        assert_eq!(summary.pages, 2);
        assert!(site.public_dir.join("blog/index.html").exists());
    }
}
