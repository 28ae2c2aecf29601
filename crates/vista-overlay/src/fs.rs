//! Filesystem contract for directory browsing

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// One child of a directory as reported by a [`FileSystem`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

impl DirEntry {
    pub fn new(name: impl Into<String>, is_dir: bool) -> Self {
        Self {
            name: name.into(),
            is_dir,
        }
    }
}

/// What the directory browser needs from a filesystem
pub trait FileSystem {
    /// List the children of a directory, in no particular order.
    ///
    /// Fails when the directory cannot be opened or enumerated. Children
    /// whose name or type cannot be determined are left out.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>>;

    /// The process working directory
    fn current_dir(&self) -> io::Result<PathBuf>;
}

/// The real filesystem via `std::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();

        for entry in fs::read_dir(path)? {
            let Ok(entry) = entry else { continue };
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            let Ok(file_type) = entry.file_type() else {
                continue;
            };

            // Symlinks count as directories when their target is one
            let is_dir = if file_type.is_symlink() {
                fs::metadata(entry.path()).is_ok_and(|m| m.is_dir())
            } else {
                file_type.is_dir()
            };

            entries.push(DirEntry { name, is_dir });
        }

        Ok(entries)
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        std::env::current_dir()
    }
}

/// An in-memory directory tree for tests and headless hosts
#[derive(Debug, Clone)]
pub struct MemoryFileSystem {
    /// Every known path mapped to whether it is a directory
    nodes: BTreeMap<PathBuf, bool>,
    unreadable: HashSet<PathBuf>,
    cwd: PathBuf,
}

impl Default for MemoryFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryFileSystem {
    /// A filesystem holding only `/`, which is also the working directory
    pub fn new() -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert(PathBuf::from("/"), true);
        Self {
            nodes,
            unreadable: HashSet::new(),
            cwd: PathBuf::from("/"),
        }
    }

    /// Add a directory, creating missing ancestors
    pub fn with_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.insert(path.as_ref(), true);
        self
    }

    /// Add a file, creating missing ancestor directories
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.insert(path.as_ref(), false);
        self
    }

    /// Make listing this directory fail with `PermissionDenied`
    pub fn with_unreadable(mut self, path: impl AsRef<Path>) -> Self {
        self.unreadable.insert(path.as_ref().to_path_buf());
        self
    }

    pub fn with_cwd(mut self, path: impl AsRef<Path>) -> Self {
        self.cwd = path.as_ref().to_path_buf();
        self
    }

    /// Delete a path and everything below it
    pub fn remove(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        self.nodes.retain(|p, _| !p.starts_with(path));
    }

    fn insert(&mut self, path: &Path, is_dir: bool) {
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            self.nodes.entry(ancestor.to_path_buf()).or_insert(true);
        }
        self.nodes.insert(path.to_path_buf(), is_dir);
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        match self.nodes.get(path).copied() {
            None => {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("{} does not exist", path.display()),
                ))
            }
            Some(false) => {
                return Err(io::Error::other(format!(
                    "{} is not a directory",
                    path.display()
                )))
            }
            Some(true) => {}
        }

        if self.unreadable.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("permission denied: {}", path.display()),
            ));
        }

        let entries = self
            .nodes
            .iter()
            .filter(|(p, _)| p.parent() == Some(path))
            .filter_map(|(p, is_dir)| {
                let name = p.file_name()?.to_str()?;
                Some(DirEntry::new(name, *is_dir))
            })
            .collect();

        Ok(entries)
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        Ok(self.cwd.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("vista_fs_test_{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_std_read_dir_reports_kinds() {
        let dir = temp_dir();
        fs::create_dir(dir.join("models")).unwrap();
        fs::write(dir.join("cube.obj"), b"v 0 0 0").unwrap();

        let mut entries = StdFileSystem.read_dir(&dir).unwrap();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(
            entries,
            vec![DirEntry::new("cube.obj", false), DirEntry::new("models", true)]
        );

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_std_read_dir_missing_fails() {
        let dir = temp_dir();
        let err = StdFileSystem.read_dir(&dir.join("missing")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_std_read_dir_on_file_fails() {
        let dir = temp_dir();
        fs::write(dir.join("plain.txt"), b"x").unwrap();
        assert!(StdFileSystem.read_dir(&dir.join("plain.txt")).is_err());
        fs::remove_dir_all(&dir).ok();
    }

    #[cfg(unix)]
    #[test]
    fn test_std_symlink_to_dir_is_dir() {
        let dir = temp_dir();
        fs::create_dir(dir.join("real")).unwrap();
        std::os::unix::fs::symlink(dir.join("real"), dir.join("link")).unwrap();
        std::os::unix::fs::symlink(dir.join("nowhere"), dir.join("dangling")).unwrap();

        let entries = StdFileSystem.read_dir(&dir).unwrap();
        let link = entries.iter().find(|e| e.name == "link").unwrap();
        assert!(link.is_dir);
        let dangling = entries.iter().find(|e| e.name == "dangling").unwrap();
        assert!(!dangling.is_dir);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_memory_tree() {
        let fs = MemoryFileSystem::new()
            .with_dir("/home/u/docs")
            .with_file("/home/u/notes.txt")
            .with_unreadable("/root");

        let mut entries = fs.read_dir(Path::new("/home/u")).unwrap();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(
            entries,
            vec![DirEntry::new("docs", true), DirEntry::new("notes.txt", false)]
        );

        let root = fs.read_dir(Path::new("/")).unwrap();
        assert_eq!(root, vec![DirEntry::new("home", true)]);

        assert_eq!(
            fs.read_dir(Path::new("/nope")).unwrap_err().kind(),
            io::ErrorKind::NotFound
        );
        assert!(fs.read_dir(Path::new("/home/u/notes.txt")).is_err());
    }

    #[test]
    fn test_memory_unreadable_and_remove() {
        let mut fs = MemoryFileSystem::new()
            .with_dir("/locked")
            .with_unreadable("/locked")
            .with_dir("/a/b");

        assert_eq!(
            fs.read_dir(Path::new("/locked")).unwrap_err().kind(),
            io::ErrorKind::PermissionDenied
        );

        fs.remove("/a");
        assert!(fs.read_dir(Path::new("/a/b")).is_err());
        assert_eq!(fs.read_dir(Path::new("/")).unwrap(), vec![DirEntry::new("locked", true)]);
    }
}
