//! Link-level filesystem abstraction.
//!
//! All alias inspection, creation and removal in modelink goes through the
//! `LinkFs` trait. The consolidation engine treats the filesystem as its
//! persistent store of alias state, so this seam is what keeps the
//! reconciliation algorithm unit-testable: tests run against the in-memory
//! `MemoryLinkFs` instead of requiring real symbolic links, while production
//! code uses `RealLinkFs` backed by `std::fs`.
//!
//! The trait is intentionally small. Discovery (directory walking, metadata
//! reads) happens directly on the host filesystem; only the mutating alias
//! operations and target resolution are abstracted.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Maximum number of symlink hops `MemoryLinkFs::resolve` will follow before
/// declaring a cycle.
const MAX_LINK_HOPS: usize = 16;

/// Operations on symbolic alias links.
pub trait LinkFs {
    /// True if anything occupies the path, including a dangling symlink.
    ///
    /// This deliberately does not follow links: a broken alias still counts
    /// as occupying its name.
    fn entry_exists(&self, path: &Path) -> bool;

    /// True if the path itself is a symbolic link (dangling or not).
    fn is_symlink(&self, path: &Path) -> bool;

    /// Fully resolve a path through any chain of symbolic links to the real
    /// underlying path. Fails if the path does not exist or the chain is
    /// broken.
    fn resolve(&self, path: &Path) -> io::Result<PathBuf>;

    /// Remove a symbolic link (the link itself, never its target).
    fn remove_link(&self, path: &Path) -> io::Result<()>;

    /// Create a symbolic link at `link` pointing at `target`.
    fn create_symlink(&self, target: &Path, link: &Path) -> io::Result<()>;
}

/// `LinkFs` implementation backed by the host filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealLinkFs;

impl RealLinkFs {
    pub fn new() -> Self {
        Self
    }
}

impl LinkFs for RealLinkFs {
    fn entry_exists(&self, path: &Path) -> bool {
        path.symlink_metadata().is_ok()
    }

    fn is_symlink(&self, path: &Path) -> bool {
        path.symlink_metadata()
            .map(|meta| meta.file_type().is_symlink())
            .unwrap_or(false)
    }

    fn resolve(&self, path: &Path) -> io::Result<PathBuf> {
        std::fs::canonicalize(path)
    }

    fn remove_link(&self, path: &Path) -> io::Result<()> {
        #[cfg(unix)]
        {
            std::fs::remove_file(path)
        }
        #[cfg(windows)]
        {
            // Directory symlinks must be removed as directories on Windows.
            std::fs::remove_file(path).or_else(|_| std::fs::remove_dir(path))
        }
    }

    fn create_symlink(&self, target: &Path, link: &Path) -> io::Result<()> {
        #[cfg(unix)]
        {
            std::os::unix::fs::symlink(target, link)
        }
        #[cfg(windows)]
        {
            if target.is_dir() {
                std::os::windows::fs::symlink_dir(target, link)
            } else {
                std::os::windows::fs::symlink_file(target, link)
            }
        }
    }
}

/// A single entry in the in-memory filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Entry {
    File,
    Dir,
    Symlink(PathBuf),
}

/// In-memory `LinkFs` for tests and examples.
///
/// Paths are plain keys with no normalization; callers use absolute-looking
/// paths consistently. Interior mutability keeps the trait object usable
/// through a shared reference, matching `RealLinkFs`.
#[derive(Debug, Default)]
pub struct MemoryLinkFs {
    entries: Mutex<HashMap<PathBuf, Entry>>,
}

impl MemoryLinkFs {
    /// Create a new empty in-memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a regular file at the given path.
    pub fn add_file<P: AsRef<Path>>(&self, path: P) {
        self.entries
            .lock()
            .unwrap()
            .insert(path.as_ref().to_path_buf(), Entry::File);
    }

    /// Register a directory at the given path.
    pub fn add_dir<P: AsRef<Path>>(&self, path: P) {
        self.entries
            .lock()
            .unwrap()
            .insert(path.as_ref().to_path_buf(), Entry::Dir);
    }

    /// Raw (unresolved) target of a symlink entry, if the path is one.
    pub fn link_target<P: AsRef<Path>>(&self, path: P) -> Option<PathBuf> {
        match self.entries.lock().unwrap().get(path.as_ref()) {
            Some(Entry::Symlink(target)) => Some(target.clone()),
            _ => None,
        }
    }

    /// Number of entries in the filesystem.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// True if the filesystem holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }
}

impl LinkFs for MemoryLinkFs {
    fn entry_exists(&self, path: &Path) -> bool {
        self.entries.lock().unwrap().contains_key(path)
    }

    fn is_symlink(&self, path: &Path) -> bool {
        matches!(
            self.entries.lock().unwrap().get(path),
            Some(Entry::Symlink(_))
        )
    }

    fn resolve(&self, path: &Path) -> io::Result<PathBuf> {
        let entries = self.entries.lock().unwrap();
        let mut current = path.to_path_buf();
        for _ in 0..MAX_LINK_HOPS {
            match entries.get(&current) {
                Some(Entry::Symlink(target)) => current = target.clone(),
                Some(_) => return Ok(current),
                None => {
                    return Err(io::Error::new(
                        io::ErrorKind::NotFound,
                        format!("no such entry: {}", current.display()),
                    ))
                }
            }
        }
        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("too many levels of symbolic links: {}", path.display()),
        ))
    }

    fn remove_link(&self, path: &Path) -> io::Result<()> {
        let mut entries = self.entries.lock().unwrap();
        match entries.get(path) {
            Some(Entry::Dir) => Err(io::Error::new(
                io::ErrorKind::Other,
                format!("is a directory: {}", path.display()),
            )),
            Some(_) => {
                entries.remove(path);
                Ok(())
            }
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such entry: {}", path.display()),
            )),
        }
    }

    fn create_symlink(&self, target: &Path, link: &Path) -> io::Result<()> {
        let mut entries = self.entries.lock().unwrap();
        if entries.contains_key(link) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("entry already exists: {}", link.display()),
            ));
        }
        entries.insert(link.to_path_buf(), Entry::Symlink(target.to_path_buf()));
        Ok(())
    }
}
