use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const DEFAULT_PROC_ROOT: &str = "/proc";

/// Read access to per-task status resources, keyed by relative paths such as
/// `100/status` or `100/task`.
pub trait StatusSource {
    /// Lines of the resource, in order, without terminators.
    fn read_lines(&self, key: &Path) -> io::Result<Vec<String>>;

    /// Entry names of a container resource. Errors when the key is missing or
    /// is not a container.
    fn list_children(&self, key: &Path) -> io::Result<Vec<String>>;
}

pub fn status_key(pid: u32) -> PathBuf {
    PathBuf::from(pid.to_string()).join("status")
}

pub fn task_key(pid: u32) -> PathBuf {
    PathBuf::from(pid.to_string()).join("task")
}

pub fn thread_status_key(pid: u32, tid: &str) -> PathBuf {
    task_key(pid).join(tid).join("status")
}

/// The host process filesystem, or a tree laid out like it.
#[derive(Clone, Debug)]
pub struct ProcFs {
    root: PathBuf,
}

impl Default for ProcFs {
    fn default() -> Self {
        Self::new(DEFAULT_PROC_ROOT)
    }
}

impl ProcFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ProcFs { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl StatusSource for ProcFs {
    fn read_lines(&self, key: &Path) -> io::Result<Vec<String>> {
        // Task names may hold arbitrary bytes, so decode lossily.
        let bytes = fs::read(self.root.join(key))?;
        Ok(bytes
            .split(|&b| b == b'\n')
            .filter(|line| !line.is_empty())
            .map(|line| String::from_utf8_lossy(line).into_owned())
            .collect())
    }

    fn list_children(&self, key: &Path) -> io::Result<Vec<String>> {
        let entries = readable_entries(fs::read_dir(self.root.join(key))?, key);
        Ok(entries
            .iter()
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect())
    }
}

/// Keep the entries that could be read; one bad entry must not hide its
/// siblings.
fn readable_entries<I, T>(entries: I, key: &Path) -> Vec<T>
where
    I: IntoIterator<Item = io::Result<T>>,
{
    entries
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!(key = %key.display(), error = %err, "skipping unreadable entry");
                None
            }
        })
        .collect()
}

/// In-memory stand-in for [`ProcFs`].
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    files: HashMap<PathBuf, String>,
    dirs: HashMap<PathBuf, Vec<String>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, key: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.files.insert(key.into(), contents.into());
        self
    }

    pub fn with_dir<I, S>(mut self, key: impl Into<PathBuf>, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dirs
            .insert(key.into(), children.into_iter().map(Into::into).collect());
        self
    }

    /// Drop a file while keeping any listing that names it.
    pub fn remove_file(&mut self, key: impl AsRef<Path>) -> Option<String> {
        self.files.remove(key.as_ref())
    }
}

fn not_found(key: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("{} not found", key.display()),
    )
}

impl StatusSource for MemorySource {
    fn read_lines(&self, key: &Path) -> io::Result<Vec<String>> {
        if self.dirs.contains_key(key) {
            return Err(io::Error::new(
                io::ErrorKind::IsADirectory,
                format!("{} is a directory", key.display()),
            ));
        }
        let contents = self.files.get(key).ok_or_else(|| not_found(key))?;
        Ok(contents.lines().map(str::to_string).collect())
    }

    fn list_children(&self, key: &Path) -> io::Result<Vec<String>> {
        if self.files.contains_key(key) {
            return Err(io::Error::new(
                io::ErrorKind::NotADirectory,
                format!("{} is not a directory", key.display()),
            ));
        }
        self.dirs.get(key).cloned().ok_or_else(|| not_found(key))
    }
}
