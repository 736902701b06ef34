//! The file collaborator (§6, C11): loading/saving documents and watching the on-disk file for
//! external changes, normalizing line endings at the boundary so the text tree only ever sees
//! LF. The kernel consumes [`FileWatcher`] only through `path()`, `stop()`, `changed_flag()`, and
//! `changed_channel()` — it never touches the filesystem itself, and never blocks on the watcher.

use crate::error::{EditorError, Result};
use crate::line_ending::LineEnding;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

fn checksum(bytes: &[u8]) -> u64 {
    let mut hasher = DefaultHasher::new();
    bytes.hash(&mut hasher);
    hasher.finish()
}

fn file_stat(path: &str) -> std::io::Result<(SystemTime, u64)> {
    let meta = std::fs::metadata(path)?;
    Ok((meta.modified().unwrap_or(SystemTime::UNIX_EPOCH), meta.len()))
}

/// A background watcher for external changes to a single path.
///
/// Polls `mtime`/`size`/checksum on a fixed interval from a detached background thread; the
/// kernel only ever reads `changed_flag()` (non-blocking) or drains `changed_channel()`
/// (non-blocking receive) between input events.
pub struct FileWatcher {
    path: String,
    changed: Arc<AtomicBool>,
    stop_flag: Arc<AtomicBool>,
    rx: Receiver<()>,
}

impl FileWatcher {
    /// Starts watching `path` for changes relative to the given baseline stat, polling every
    /// `poll_interval`.
    pub fn start(
        path: impl Into<String>,
        poll_interval: Duration,
        baseline_mtime: SystemTime,
        baseline_size: u64,
        baseline_checksum: u64,
    ) -> Self {
        let path = path.into();
        let changed = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::new(AtomicBool::new(false));
        let (tx, rx) = mpsc::channel();

        let thread_path = path.clone();
        let thread_changed = changed.clone();
        let thread_stop = stop_flag.clone();
        std::thread::spawn(move || {
            loop {
                std::thread::sleep(poll_interval);
                if thread_stop.load(Ordering::Relaxed) {
                    return;
                }
                let Ok((mtime, size)) = file_stat(&thread_path) else {
                    // Deleted or inaccessible: treat as changed.
                    thread_changed.store(true, Ordering::Relaxed);
                    let _ = tx.send(());
                    return;
                };
                let stat_differs = mtime != baseline_mtime || size != baseline_size;
                let content_differs = stat_differs
                    && std::fs::read(&thread_path)
                        .map(|bytes| checksum(&bytes) != baseline_checksum)
                        .unwrap_or(true);
                if content_differs {
                    thread_changed.store(true, Ordering::Relaxed);
                    let _ = tx.send(());
                    return;
                }
            }
        });

        Self {
            path,
            changed,
            stop_flag,
            rx,
        }
    }

    /// Builds a watcher primed with an already-known baseline, skipping the initial stat call.
    /// Used right after `save`, where the just-written stats are already in hand.
    pub fn new_watcher(
        poll_interval: Duration,
        path: impl Into<String>,
        mtime: SystemTime,
        size: u64,
        checksum: u64,
    ) -> Self {
        Self::start(path, poll_interval, mtime, size, checksum)
    }

    /// The watched path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Signals the background thread to stop at its next poll tick. Non-blocking.
    pub fn stop(&self) {
        self.stop_flag.store(true, Ordering::Relaxed);
    }

    /// Non-blocking check for whether a change has been observed.
    pub fn changed_flag(&self) -> bool {
        self.changed.load(Ordering::Relaxed)
    }

    /// The receive half of the change-notification channel. Non-blocking (`try_recv`) use is the
    /// kernel's only consumption pattern.
    pub fn changed_channel(&self) -> &Receiver<()> {
        &self.rx
    }
}

impl Drop for FileWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}

/// The result of a successful [`load`].
pub struct LoadedDocument {
    /// LF-normalized document text.
    pub text: String,
    /// The preferred line ending to use when saving this document again.
    pub line_ending: LineEnding,
    /// A watcher already tracking this path for external changes.
    pub watcher: FileWatcher,
}

/// Loads `path`, normalizing CRLF to LF and starting a watcher.
///
/// Returns [`EditorError::LoadNotFound`] if the file does not exist (the orchestrator turns this
/// into a new, empty buffer bound to the path) and [`EditorError::LoadError`] for any other I/O
/// failure.
pub fn load(path: &str, poll_interval: Duration) -> Result<LoadedDocument> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            EditorError::LoadNotFound(path.to_string())
        } else {
            EditorError::LoadError {
                path: path.to_string(),
                source: e,
            }
        }
    })?;

    let line_ending = LineEnding::detect_in_text(&raw);
    let text = LineEnding::normalize_to_lf(&raw);

    let (mtime, size) = file_stat(path).map_err(|e| EditorError::LoadError {
        path: path.to_string(),
        source: e,
    })?;
    let watcher = FileWatcher::start(path, poll_interval, mtime, size, checksum(raw.as_bytes()));

    Ok(LoadedDocument {
        text,
        line_ending,
        watcher,
    })
}

/// Saves `text` (LF-normalized) to `path`, re-applying `line_ending`, and returns a fresh watcher
/// primed with the just-written stats.
pub fn save(
    path: &str,
    text: &str,
    line_ending: LineEnding,
    poll_interval: Duration,
) -> Result<FileWatcher> {
    let on_disk = line_ending.apply_to_text(text);
    std::fs::write(path, on_disk.as_bytes()).map_err(|e| EditorError::SaveError {
        path: path.to_string(),
        source: e,
    })?;

    let (mtime, size) = file_stat(path).map_err(|e| EditorError::SaveError {
        path: path.to_string(),
        source: e,
    })?;
    Ok(FileWatcher::new_watcher(
        poll_interval,
        path,
        mtime,
        size,
        checksum(on_disk.as_bytes()),
    ))
}

/// A swappable file I/O + watcher backend. [`load`]/[`save`]/[`relative_path_cwd`] are the actual
/// implementation; this trait exists so a host can inject a fake backend in its own tests without
/// touching the real filesystem. The orchestrator itself talks to [`SimpleFileCollaborator`].
pub trait FileCollaborator {
    /// See [`load`].
    fn load(&self, path: &str, poll_interval: Duration) -> Result<LoadedDocument>;
    /// See [`save`].
    fn save(
        &self,
        path: &str,
        text: &str,
        line_ending: LineEnding,
        poll_interval: Duration,
    ) -> Result<FileWatcher>;
    /// See [`FileWatcher::new_watcher`].
    fn new_watcher(
        &self,
        poll_interval: Duration,
        path: &str,
        mtime: SystemTime,
        size: u64,
        checksum: u64,
    ) -> FileWatcher;
    /// See [`relative_path_cwd`].
    fn relative_path_cwd(&self, path: &str) -> String;
}

/// The default [`FileCollaborator`], backed directly by `std::fs` and a polling watcher thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleFileCollaborator;

impl FileCollaborator for SimpleFileCollaborator {
    fn load(&self, path: &str, poll_interval: Duration) -> Result<LoadedDocument> {
        load(path, poll_interval)
    }

    fn save(
        &self,
        path: &str,
        text: &str,
        line_ending: LineEnding,
        poll_interval: Duration,
    ) -> Result<FileWatcher> {
        save(path, text, line_ending, poll_interval)
    }

    fn new_watcher(
        &self,
        poll_interval: Duration,
        path: &str,
        mtime: SystemTime,
        size: u64,
        checksum: u64,
    ) -> FileWatcher {
        FileWatcher::new_watcher(poll_interval, path, mtime, size, checksum)
    }

    fn relative_path_cwd(&self, path: &str) -> String {
        relative_path_cwd(path)
    }
}

/// Renders `path` relative to the current working directory, falling back to `path` unchanged if
/// it is not under the cwd.
pub fn relative_path_cwd(path: &str) -> String {
    let Ok(cwd) = std::env::current_dir() else {
        return path.to_string();
    };
    match Path::new(path).strip_prefix(&cwd) {
        Ok(rel) => rel.to_string_lossy().into_owned(),
        Err(_) => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn simple_file_collaborator_round_trips_through_the_trait() {
        let dir = std::env::temp_dir().join(format!("editkernel-test3-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("doc.txt");
        let path_str = path.to_str().unwrap();

        let collaborator = SimpleFileCollaborator;
        let watcher = collaborator
            .save(path_str, "hi", LineEnding::Lf, Duration::from_secs(3600))
            .unwrap();
        watcher.stop();

        let loaded = collaborator
            .load(path_str, Duration::from_secs(3600))
            .unwrap();
        assert_eq!(loaded.text, "hi");
        loaded.watcher.stop();

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_missing_file_reports_not_found() {
        let err = load("/nonexistent/path/does-not-exist.txt", Duration::from_millis(10))
            .unwrap_err();
        assert!(matches!(err, EditorError::LoadNotFound(_)));
    }

    #[test]
    fn save_then_load_roundtrips_crlf() {
        let dir = std::env::temp_dir().join(format!("editkernel-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("doc.txt");
        let path_str = path.to_str().unwrap();

        let watcher = save(
            path_str,
            "a\nb\nc",
            LineEnding::Crlf,
            Duration::from_secs(3600),
        )
        .unwrap();
        watcher.stop();

        let mut f = std::fs::File::open(&path).unwrap();
        let mut contents = String::new();
        std::io::Read::read_to_string(&mut f, &mut contents).unwrap();
        assert_eq!(contents, "a\r\nb\r\nc");

        let loaded = load(path_str, Duration::from_secs(3600)).unwrap();
        assert_eq!(loaded.text, "a\nb\nc");
        assert_eq!(loaded.line_ending, LineEnding::Crlf);
        loaded.watcher.stop();

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn watcher_detects_external_change() {
        let dir = std::env::temp_dir().join(format!("editkernel-test2-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("doc.txt");
        std::fs::write(&path, "hello").unwrap();

        let watcher = load(path.to_str().unwrap(), Duration::from_millis(20)).unwrap().watcher;
        assert!(!watcher.changed_flag());

        std::thread::sleep(Duration::from_millis(30));
        let mut f = std::fs::OpenOptions::new().append(true).open(&path).unwrap();
        writeln!(f, " world").unwrap();

        std::thread::sleep(Duration::from_millis(200));
        assert!(watcher.changed_flag());
        assert!(watcher.changed_channel().try_recv().is_ok());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
