//! Reading and persisting component sources.

use std::fs;
use std::path::{Path, PathBuf};

use jwalk::WalkDir;

use crate::optimize::OptimizeError;

/// File extension of component sources.
pub const SOURCE_EXTENSION: &str = "tsx";

/// Destination for rewritten sources.
pub trait SourceStore {
    fn write(&self, identifier: &str, content: &str) -> Result<(), OptimizeError>;
}

/// Writes each source back to the file named by its identifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStore;

impl SourceStore for FsStore {
    fn write(&self, identifier: &str, content: &str) -> Result<(), OptimizeError> {
        fs::write(identifier, content).map_err(|e| OptimizeError::persistence(identifier, e))
    }
}

fn is_source(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION)
}

/// Component sources at `path`: the file itself, or every source file
/// below a directory, sorted.
pub fn collect_sources(path: &Path) -> Vec<PathBuf> {
    if path.is_file() {
        return if is_source(path) { vec![path.to_path_buf()] } else { Vec::new() };
    }

    let mut files: Vec<_> = WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path())
        .filter(|p| is_source(p))
        .collect();
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_collect_sources_sorted_and_filtered() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("fill")).unwrap();
        fs::write(dir.path().join("fill/Zap.tsx"), "").unwrap();
        fs::write(dir.path().join("Home.tsx"), "").unwrap();
        fs::write(dir.path().join("index.ts"), "").unwrap();
        fs::write(dir.path().join("notes.md"), "").unwrap();

        let files = collect_sources(dir.path());
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(names, vec![PathBuf::from("Home.tsx"), PathBuf::from("fill/Zap.tsx")]);
    }

    #[test]
    fn test_collect_single_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("Home.tsx");
        fs::write(&file, "").unwrap();
        assert_eq!(collect_sources(&file), vec![file]);

        let other = dir.path().join("index.ts");
        fs::write(&other, "").unwrap();
        assert!(collect_sources(&other).is_empty());
    }

    #[test]
    fn test_fs_store_failure_is_persistence() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("missing/Home.tsx");
        let err = FsStore
            .write(target.to_str().unwrap(), "x")
            .unwrap_err();
        assert!(matches!(err, OptimizeError::PersistenceFailure { .. }));
    }
}
