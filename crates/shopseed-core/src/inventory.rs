//! Asset inventory: which image files exist under each category directory.
//!
//! The filesystem is reached only through [`AssetSource`], so the scanner and
//! everything downstream of it can run against [`MemoryAssetSource`] in tests.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use walkdir::WalkDir;

static IMAGE_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(jpe?g|png|webp|gif)$").expect("valid regex"));

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("failed to read asset directory {path}: {source}")]
    Walk {
        path: String,
        #[source]
        source: walkdir::Error,
    },

    #[error("asset directory {path} is unreadable: {reason}")]
    Unreadable { path: String, reason: String },
}

/// Read-only view of an asset directory tree.
pub trait AssetSource {
    fn exists(&self, path: &Path) -> bool;

    /// Names of the immediate subdirectories of `path`.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError`] if `path` cannot be listed.
    fn list_directories(&self, path: &Path) -> Result<Vec<String>, InventoryError>;

    /// Names of the regular files directly inside `path`.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError`] if `path` cannot be listed.
    fn list_files(&self, path: &Path) -> Result<Vec<String>, InventoryError>;
}

/// [`AssetSource`] backed by the real filesystem. Symlinks are followed.
/// Entries whose names are not valid UTF-8 are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsAssetSource;

impl FsAssetSource {
    fn children(path: &Path, want_dirs: bool) -> Result<Vec<String>, InventoryError> {
        let mut names = Vec::new();
        for entry in WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            let entry = entry.map_err(|source| InventoryError::Walk {
                path: path.display().to_string(),
                source,
            })?;
            let file_type = entry.file_type();
            let wanted = if want_dirs {
                file_type.is_dir()
            } else {
                file_type.is_file()
            };
            if !wanted {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }
}

impl AssetSource for FsAssetSource {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn list_directories(&self, path: &Path) -> Result<Vec<String>, InventoryError> {
        Self::children(path, true)
    }

    fn list_files(&self, path: &Path) -> Result<Vec<String>, InventoryError> {
        Self::children(path, false)
    }
}

/// In-memory asset tree rooted at a single path, one level of directories deep.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssetSource {
    root: PathBuf,
    dirs: BTreeMap<String, Vec<String>>,
    root_files: Vec<String>,
    unreadable: Vec<String>,
}

impl MemoryAssetSource {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Add a category directory containing `files`, in the given order.
    #[must_use]
    pub fn with_dir<I, S>(mut self, name: &str, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dirs
            .insert(name.to_string(), files.into_iter().map(Into::into).collect());
        self
    }

    /// Add a plain file directly under the root.
    #[must_use]
    pub fn with_root_file(mut self, name: &str) -> Self {
        self.root_files.push(name.to_string());
        self
    }

    /// Add a directory whose listing fails.
    #[must_use]
    pub fn with_unreadable_dir(mut self, name: &str) -> Self {
        self.dirs.insert(name.to_string(), Vec::new());
        self.unreadable.push(name.to_string());
        self
    }

    fn dir_name<'a>(&self, path: &'a Path) -> Option<&'a str> {
        let rel = path.strip_prefix(&self.root).ok()?;
        let mut parts = rel.components();
        let first = parts.next()?.as_os_str().to_str()?;
        parts.next().is_none().then_some(first)
    }
}

impl AssetSource for MemoryAssetSource {
    fn exists(&self, path: &Path) -> bool {
        path == self.root
            || self
                .dir_name(path)
                .is_some_and(|name| self.dirs.contains_key(name) || self.root_files.iter().any(|f| f == name))
    }

    fn list_directories(&self, path: &Path) -> Result<Vec<String>, InventoryError> {
        if path == self.root {
            Ok(self.dirs.keys().cloned().collect())
        } else {
            Ok(Vec::new())
        }
    }

    fn list_files(&self, path: &Path) -> Result<Vec<String>, InventoryError> {
        if path == self.root {
            return Ok(self.root_files.clone());
        }
        let Some(name) = self.dir_name(path) else {
            return Ok(Vec::new());
        };
        if self.unreadable.iter().any(|u| u == name) {
            return Err(InventoryError::Unreadable {
                path: path.display().to_string(),
                reason: "permission denied".to_string(),
            });
        }
        Ok(self.dirs.get(name).cloned().unwrap_or_default())
    }
}

/// Category directory name → sorted image file names.
///
/// Directories iterate in lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    dirs: BTreeMap<String, Vec<String>>,
}

impl Inventory {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    #[must_use]
    pub fn contains(&self, dir: &str) -> bool {
        self.dirs.contains_key(dir)
    }

    /// Image files in `dir`; empty if the directory is absent.
    #[must_use]
    pub fn files(&self, dir: &str) -> &[String] {
        self.dirs.get(dir).map_or(&[], Vec::as_slice)
    }

    pub fn directories(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.dirs.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// First of `candidates` present in the inventory.
    #[must_use]
    pub fn resolve<'a>(&self, candidates: &[&'a str]) -> Option<&'a str> {
        candidates.iter().copied().find(|c| self.dirs.contains_key(*c))
    }

    #[must_use]
    pub fn file_count(&self) -> usize {
        self.dirs.values().map(Vec::len).sum()
    }
}

impl FromIterator<(String, Vec<String>)> for Inventory {
    fn from_iter<T: IntoIterator<Item = (String, Vec<String>)>>(iter: T) -> Self {
        Self {
            dirs: iter
                .into_iter()
                .map(|(dir, mut files)| {
                    files.sort();
                    (dir, files)
                })
                .collect(),
        }
    }
}

/// Whether `file_name` has a raster image extension (case-insensitive).
#[must_use]
pub fn is_image_file(file_name: &str) -> bool {
    IMAGE_FILE.is_match(file_name)
}

/// Scan the immediate subdirectories of `root` for image files.
///
/// A missing `root` is not an error: it yields an empty inventory.
///
/// # Errors
///
/// Returns [`InventoryError`] if `root` or one of its subdirectories exists
/// but cannot be listed.
pub fn scan_inventory(
    source: &impl AssetSource,
    root: &Path,
) -> Result<Inventory, InventoryError> {
    if !source.exists(root) {
        return Ok(Inventory::default());
    }

    let mut dirs = BTreeMap::new();
    for dir in source.list_directories(root)? {
        let mut files: Vec<String> = source
            .list_files(&root.join(&dir))?
            .into_iter()
            .filter(|f| is_image_file(f))
            .collect();
        files.sort();
        dirs.insert(dir, files);
    }

    Ok(Inventory { dirs })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_source() -> MemoryAssetSource {
        MemoryAssetSource::new("/assets")
            .with_dir("watches", ["b.png", "a.JPG", "notes.txt", "c.webp"])
            .with_dir("mice", ["m1.gif"])
            .with_dir("empty", Vec::<String>::new())
            .with_root_file("README.md")
    }

    #[test]
    fn is_image_file_matches_known_extensions_case_insensitively() {
        for name in ["a.jpg", "a.JPEG", "a.Png", "a.webp", "a.GIF"] {
            assert!(is_image_file(name), "{name} should be an image");
        }
        for name in ["a.txt", "a.bmp", "jpg", "a.jpg.bak"] {
            assert!(!is_image_file(name), "{name} should not be an image");
        }
    }

    #[test]
    fn missing_root_yields_empty_inventory() {
        let source = sample_source();
        let inventory = scan_inventory(&source, Path::new("/elsewhere")).unwrap();
        assert!(inventory.is_empty());
        assert_eq!(inventory.file_count(), 0);
    }

    #[test]
    fn scan_filters_and_sorts_files() {
        let inventory = scan_inventory(&sample_source(), Path::new("/assets")).unwrap();
        assert_eq!(inventory.files("watches"), ["a.JPG", "b.png", "c.webp"]);
        assert_eq!(inventory.files("mice"), ["m1.gif"]);
        assert!(inventory.contains("empty"));
        assert!(inventory.files("empty").is_empty());
        assert!(!inventory.contains("README.md"));
        assert_eq!(inventory.file_count(), 4);
    }

    #[test]
    fn directories_iterate_in_sorted_order() {
        let inventory = scan_inventory(&sample_source(), Path::new("/assets")).unwrap();
        let names: Vec<&str> = inventory.directories().map(|(d, _)| d).collect();
        assert_eq!(names, vec!["empty", "mice", "watches"]);
    }

    #[test]
    fn resolve_returns_first_present_candidate() {
        let inventory = scan_inventory(&sample_source(), Path::new("/assets")).unwrap();
        assert_eq!(inventory.resolve(&["mouse", "mice"]), Some("mice"));
        assert_eq!(inventory.resolve(&["tv", "TV"]), None);
    }

    #[test]
    fn unreadable_directory_is_an_error() {
        let source = MemoryAssetSource::new("/assets").with_unreadable_dir("locked");
        let err = scan_inventory(&source, Path::new("/assets")).unwrap_err();
        assert!(matches!(err, InventoryError::Unreadable { .. }));
    }

    #[test]
    fn fs_source_scans_one_level_of_real_directories() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let root = tmp.path();
        std::fs::create_dir_all(root.join("watches/nested")).unwrap();
        std::fs::write(root.join("watches/z.png"), b"").unwrap();
        std::fs::write(root.join("watches/a.jpeg"), b"").unwrap();
        std::fs::write(root.join("watches/nested/deep.png"), b"").unwrap();
        std::fs::write(root.join("stray.png"), b"").unwrap();

        let inventory = scan_inventory(&FsAssetSource, root).unwrap();
        let names: Vec<&str> = inventory.directories().map(|(d, _)| d).collect();
        assert_eq!(names, vec!["watches"]);
        assert_eq!(inventory.files("watches"), ["a.jpeg", "z.png"]);
    }

    #[test]
    fn fs_source_missing_root_is_empty() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let inventory = scan_inventory(&FsAssetSource, &tmp.path().join("missing")).unwrap();
        assert!(inventory.is_empty());
    }
}
