//! Finding the images to show.

use std::fs;
use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use tracing::{debug, info};

use crate::error::Error;

/// How the image list is built from a directory.
#[derive(Debug, Clone)]
pub struct SourceOptions {
    /// Allowed extensions, lowercase and without the dot.
    pub extensions: Vec<String>,
    pub sort: bool,
    pub shuffle: bool,
}

/// Ordered list of image paths the slideshow cycles through.
#[derive(Debug, Default)]
pub struct ImageSource {
    paths: Vec<PathBuf>,
}

impl ImageSource {
    /// Scan `dir` and order the result according to `opts`.
    pub fn open(dir: &Path, opts: &SourceOptions) -> Result<Self, Error> {
        let mut paths = scan(dir, &opts.extensions)?;
        if opts.sort {
            paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        }
        if opts.shuffle {
            paths.shuffle(&mut rand::rng());
        }
        info!(
            dir = %dir.display(),
            count = paths.len(),
            sort = opts.sort,
            shuffle = opts.shuffle,
            "scanned images"
        );
        Ok(Self { paths })
    }

    #[cfg(test)]
    pub fn from_paths(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Path> {
        self.paths.get(index).map(PathBuf::as_path)
    }

    /// Drop an image that could not be loaded.
    pub fn remove(&mut self, index: usize) -> Option<PathBuf> {
        if index < self.paths.len() {
            Some(self.paths.remove(index))
        } else {
            None
        }
    }
}

/// Return `true` if `path` has one of the allowed extensions.
pub fn is_supported_image(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| {
            let ext = ext.to_ascii_lowercase();
            extensions.iter().any(|e| *e == ext)
        })
}

/// List supported image files directly inside `dir`, in directory order.
///
/// An existing directory without images is not an error.
pub fn scan(dir: &Path, extensions: &[String]) -> Result<Vec<PathBuf>, Error> {
    if !dir.is_dir() {
        return Err(Error::BadDir(dir.to_path_buf()));
    }

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_supported_image(&path, extensions) {
            paths.push(path);
        } else {
            debug!(path = %path.display(), "skipping non-image entry");
        }
    }
    Ok(paths)
}
