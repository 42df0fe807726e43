//! Catalog directory watching

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::{debug, warn};
use notify::{Config, RecommendedWatcher, RecursiveMode, Watcher};

/// True for `<lang>.json` files a directory catalog reads
fn is_catalog_file(path: &Path) -> bool {
    path.extension() == Some(OsStr::new("json"))
}

/// Set up a file watcher that flags `needs_reload` when a catalog file changes.
///
/// Returns `None` (and logs) if the platform watcher cannot be created; the
/// catalog still works, it just won't hot-reload.
pub fn setup_catalog_watcher(
    catalog_dir: PathBuf,
    needs_reload: Arc<Mutex<bool>>,
) -> Option<RecommendedWatcher> {
    let config = Config::default().with_poll_interval(Duration::from_millis(500));

    let watcher_result = RecommendedWatcher::new(
        move |res: Result<notify::Event, notify::Error>| {
            let Ok(event) = res else {
                return;
            };
            if event.kind.is_access() {
                return;
            }
            if event.paths.iter().any(|p| is_catalog_file(p)) {
                debug!("catalog change detected: {:?}", event.paths);
                if let Ok(mut flag) = needs_reload.lock() {
                    *flag = true;
                }
            }
        },
        config,
    );

    match watcher_result {
        Ok(mut watcher) => {
            // Watch the directory since editors often replace files
            if let Err(e) = watcher.watch(&catalog_dir, RecursiveMode::NonRecursive) {
                let dir = catalog_dir.display();
                warn!("Cannot watch catalog dir {}: {}", dir, e);
                return None;
            }
            Some(watcher)
        }
        Err(e) => {
            warn!("File watcher unavailable: {}", e);
            None
        }
    }
}

/// Read and clear a reload flag
pub fn take_flag(flag: &Mutex<bool>) -> bool {
    match flag.lock() {
        Ok(mut f) => std::mem::replace(&mut *f, false),
        Err(_) => false,
    }
}
