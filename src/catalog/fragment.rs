//! Fragment loading

use crate::error::CatalogError;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

const FRAGMENT_SUFFIX: &str = ".json";

/// One JSON input document, keyed by its file name without the `.json` suffix
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub key: String,
    pub path: PathBuf,
    pub document: Value,
}

impl Fragment {
    /// Read and parse a fragment file
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let key = fragment_key(path).ok_or_else(|| CatalogError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "fragment file name must end in .json",
            ),
        })?;

        let bytes = fs::read(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let document = serde_json::from_slice(&bytes).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            key,
            path: path.to_path_buf(),
            document,
        })
    }
}

/// Key of a fragment file: its file name minus `.json`.
///
/// Returns `None` for hidden files, files without the suffix and names that are not UTF-8.
pub fn fragment_key(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    if name.starts_with('.') {
        return None;
    }
    name.strip_suffix(FRAGMENT_SUFFIX)
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
}

/// All fragments of one directory, ordered by key
#[derive(Debug, Clone)]
pub struct FragmentSet {
    dir: PathBuf,
    fragments: Vec<Fragment>,
}

impl FragmentSet {
    /// Load every `*.json` file directly inside `dir`. Subdirectories are not descended.
    pub fn load(dir: &Path) -> Result<Self, CatalogError> {
        let mut fragments = Vec::new();

        let walker = WalkDir::new(dir).follow_links(true).min_depth(1).max_depth(1);
        for entry in walker {
            let entry = entry.map_err(|e| CatalogError::Io {
                path: e.path().map(Path::to_path_buf).unwrap_or_else(|| dir.to_path_buf()),
                source: e.into(),
            })?;

            if !entry.file_type().is_file() {
                continue;
            }
            if entry.file_name().to_str().is_none() {
                warn!(path = ?entry.path(), "Skipping file with a non UTF-8 name");
                continue;
            }
            if fragment_key(entry.path()).is_none() {
                continue;
            }

            let fragment = Fragment::load(entry.path())?;
            debug!(fragment = %fragment.key, path = ?fragment.path, "Loaded fragment");
            fragments.push(fragment);
        }

        Ok(Self::from_fragments(dir.to_path_buf(), fragments))
    }

    /// Build a set from already loaded fragments; ordering is applied here.
    ///
    /// Keys compare by UTF-16 code units, the order JavaScript's default sort gives.
    pub fn from_fragments(dir: PathBuf, mut fragments: Vec<Fragment>) -> Self {
        fragments.sort_by(|a, b| a.key.encode_utf16().cmp(b.key.encode_utf16()));
        Self { dir, fragments }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Fragment keys in merge order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fragments.iter().map(|f| f.key.as_str())
    }

    pub fn into_parts(self) -> (PathBuf, Vec<Fragment>) {
        (self.dir, self.fragments)
    }
}
