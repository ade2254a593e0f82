//! Catalog source reading `*.md` files from a directory on disk.

use super::{identifier_from_file_name, CatalogDocument, CatalogSource};
use crate::error::ParseError;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Reads every `.md` file directly inside `root` (non-recursive).
#[derive(Debug, Clone)]
pub struct DirectoryCatalog {
    root: PathBuf,
}

impl DirectoryCatalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl CatalogSource for DirectoryCatalog {
    fn documents(&self) -> Result<Vec<CatalogDocument>, ParseError> {
        if !self.root.is_dir() {
            return Err(ParseError::FileNotFound(self.root.clone()));
        }

        let mut documents = Vec::new();
        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();
        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| self.root.clone());
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, "directory walk failed"));
                ParseError::SourceRead { path, source }
            })?;

            let path = entry.path();
            if !entry.file_type().is_file() || path.extension() != Some(std::ffi::OsStr::new("md")) {
                continue;
            }

            let identifier = match path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(identifier_from_file_name)
            {
                Some(id) => id,
                None => {
                    tracing::warn!("Skipping agent file with non UTF-8 name: {:?}", path);
                    continue;
                }
            };

            let raw = std::fs::read_to_string(path).map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => ParseError::FileNotFound(path.to_path_buf()),
                _ => ParseError::SourceRead {
                    path: path.to_path_buf(),
                    source: e,
                },
            })?;

            documents.push(CatalogDocument::new(identifier, path.display().to_string(), raw));
        }

        tracing::debug!(
            "Read {} agent documents from {}",
            documents.len(),
            self.root.display()
        );
        Ok(documents)
    }

    fn describe(&self) -> String {
        format!("directory catalog at {}", self.root.display())
    }
}
