// Corpus access: enumerating TEI documents on disk and reading their XML.

pub mod tei;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;
use walkdir::WalkDir;

/// List the corpus documents directly inside `dir`.
///
/// Only regular files are returned (symlinks are followed, broken ones are
/// skipped), sorted by file name so that repeated runs see the same order. Files whose name starts
/// with `exclude_prefix` are skipped; the corpus ships its TEI header as one
/// such file. An empty prefix excludes nothing.
pub fn list_documents(dir: &Path, exclude_prefix: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!("Corpus directory not found: {}", dir.display());
    }

    let mut paths = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if is_broken_link(&err) => {
                warn!(path = ?err.path(), "Broken symlink in corpus directory, skipping");
                continue;
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Failed to read corpus directory {}", dir.display()))
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if !exclude_prefix.is_empty() && name.starts_with(exclude_prefix) {
            continue;
        }
        paths.push(entry.into_path());
    }

    Ok(paths)
}

fn is_broken_link(err: &walkdir::Error) -> bool {
    let not_found = err
        .io_error()
        .is_some_and(|e| e.kind() == ErrorKind::NotFound);
    not_found
        && err
            .path()
            .and_then(|p| p.symlink_metadata().ok())
            .is_some_and(|m| m.file_type().is_symlink())
}

/// Read a document into memory. The caller parses it with [`tei::parse`].
pub fn read_document(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_documents_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b-18650101.xml", "a-18640101.xml", "Corpus-Kranjska.xml"] {
            std::fs::write(dir.path().join(name), "<TEI/>").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested")).unwrap();

        let docs = list_documents(dir.path(), "Corpus-Kranjska").unwrap();
        let names: Vec<_> = docs
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a-18640101.xml", "b-18650101.xml"]);
    }

    #[test]
    fn test_empty_prefix_keeps_everything() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Corpus-Kranjska.xml"), "<TEI/>").unwrap();
        assert_eq!(list_documents(dir.path(), "").unwrap().len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_broken_symlink_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a-18640101.xml"), "<TEI/>").unwrap();
        std::os::unix::fs::symlink(
            dir.path().join("gone.xml"),
            dir.path().join("b-18650101.xml"),
        )
        .unwrap();

        let docs = list_documents(dir.path(), "Corpus-Kranjska").unwrap();
        assert_eq!(docs, vec![dir.path().join("a-18640101.xml")]);
    }

    #[test]
    fn test_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_documents(&dir.path().join("absent"), "x").is_err());
    }
}
