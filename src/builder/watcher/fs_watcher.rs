use std::path::PathBuf;
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};

use log::{debug, error, info, warn};
use notify::{Event, EventKind, RecursiveMode, Result as NotifyResult, Watcher};

use crate::builder::artifacts::build_site;
use crate::config::Config;
use crate::content::open_store;
use crate::utils::error::{BoxResult, SiteMetaError};

const DEBOUNCE_DURATION: Duration = Duration::from_millis(500);

/// Paths whose changes should trigger a rebuild
fn watched_paths(config: &Config) -> Vec<PathBuf> {
    let store = open_store(&config.content, &config.source);
    store.watch_path().into_iter().collect()
}

/// Watch the content source for changes and rebuild when necessary.
///
/// Blocks until the event channel closes.
pub fn watch_site(config: &Config) -> BoxResult<()> {
    let paths = watched_paths(config);
    if paths.is_empty() {
        return Err(SiteMetaError::Content("content store has nothing to watch".to_string()).into());
    }

    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res: NotifyResult<Event>| {
        match res {
            Ok(event) => {
                // Only trigger rebuild on file modifications
                match event.kind {
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => {
                        tx.send(event).unwrap_or_else(|e| {
                            error!("Error sending file event: {}", e);
                        });
                    }
                    _ => {}
                }
            }
            Err(e) => error!("Watch error: {}", e),
        }
    })?;

    for path in &paths {
        info!("Watching {}", path.display());
        watcher.watch(path, RecursiveMode::Recursive)?;
    }

    info!("Watching for changes. Press Ctrl+C to stop.");

    let mut last_build = Instant::now();
    loop {
        match rx.recv_timeout(Duration::from_secs(1)) {
            Ok(event) => {
                debug!("File event: {:?}", event);

                let elapsed = last_build.elapsed();
                if elapsed < DEBOUNCE_DURATION {
                    std::thread::sleep(DEBOUNCE_DURATION - elapsed);
                }
                // Editors emit bursts of events per save
                while rx.try_recv().is_ok() {}

                info!("Content change detected, rebuilding...");
                match build_site(config) {
                    Ok(summary) => info!("Rebuilt {} pages", summary.pages),
                    Err(e) => warn!("Rebuild failed, previous output kept: {}", e),
                }

                last_build = Instant::now();
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
            Err(e) => {
                error!("Error receiving file events: {}", e);
                break;
            }
        }
    }

    Ok(())
}
