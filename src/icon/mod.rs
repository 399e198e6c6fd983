//! Icon files on disk: component files and the `index.ts` barrel.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::batch::SOURCE_EXTENSION;
use crate::optimize::OptimizeError;

/// Barrel file listing the icons of one directory.
pub const INDEX_FILE: &str = "index.ts";

/// Import line required by every export line.
pub const DYNAMIC_IMPORT: &str = "import dynamic from 'next/dynamic';\n";

static RE_PASCAL_CASE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z][a-zA-Z0-9]*$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("Name is required")]
    Empty,
    #[error("Name must be in PascalCase")]
    NotPascalCase,
}

/// Component names must be PascalCase identifiers.
pub fn validate_icon_name(name: &str) -> Result<(), NameError> {
    if name.is_empty() {
        return Err(NameError::Empty);
    }
    if !RE_PASCAL_CASE.is_match(name) {
        return Err(NameError::NotPascalCase);
    }
    Ok(())
}

/// Uppercase the first character: `fill` → `Fill`, `3d` → `3d`.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `export const HomeFill = dynamic(() => import('./Home'));`
pub fn export_line(name: &str, icon_type: &str) -> String {
    format!(
        "export const {name}{} = dynamic(() => import('./{name}'));\n",
        capitalize(icon_type)
    )
}

/// Create `dir` and its parents if missing.
pub fn upsert_dir(dir: &Path) -> Result<(), OptimizeError> {
    fs::create_dir_all(dir).map_err(|e| OptimizeError::persistence(dir, e))
}

/// Write `<dir>/<name>.tsx`, replacing any existing file.
pub fn write_component(dir: &Path, name: &str, source: &str) -> Result<PathBuf, OptimizeError> {
    let path = dir.join(format!("{name}.{SOURCE_EXTENSION}"));
    fs::write(&path, source).map_err(|e| OptimizeError::persistence(&path, e))?;
    Ok(path)
}

/// Append the dynamic import and the icon's export to `<dir>/index.ts`.
///
/// Lines already present are not repeated. Returns whether the file changed.
pub fn export_module(dir: &Path, name: &str, icon_type: &str) -> Result<bool, OptimizeError> {
    let index = dir.join(INDEX_FILE);
    let mut content = match fs::read_to_string(&index) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(OptimizeError::persistence(&index, e)),
    };
    let original_len = content.len();

    if !content.contains(DYNAMIC_IMPORT) {
        content.push_str(DYNAMIC_IMPORT);
    }
    let export = export_line(name, icon_type);
    if !content.contains(&export) {
        content.push_str(&export);
    }

    if content.len() == original_len {
        return Ok(false);
    }
    fs::write(&index, content).map_err(|e| OptimizeError::persistence(&index, e))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_icon_name() {
        assert!(validate_icon_name("Home").is_ok());
        assert!(validate_icon_name("ArrowLeft2").is_ok());
        assert_eq!(validate_icon_name(""), Err(NameError::Empty));
        assert_eq!(validate_icon_name("home"), Err(NameError::NotPascalCase));
        assert_eq!(validate_icon_name("Arrow-Left"), Err(NameError::NotPascalCase));
        assert_eq!(NameError::Empty.to_string(), "Name is required");
    }

    #[test]
    fn test_export_line() {
        assert_eq!(
            export_line("Home", "fill"),
            "export const HomeFill = dynamic(() => import('./Home'));\n"
        );
        assert_eq!(
            export_line("Cube", "3D"),
            "export const Cube3D = dynamic(() => import('./Cube'));\n"
        );
    }

    #[test]
    fn test_write_component() {
        let dir = TempDir::new().unwrap();
        let icons = dir.path().join("icons/fill");
        upsert_dir(&icons).unwrap();
        // idempotent
        upsert_dir(&icons).unwrap();

        let path = write_component(&icons, "Home", "const Icon = 1;\n").unwrap();
        assert_eq!(path, icons.join("Home.tsx"));
        assert_eq!(fs::read_to_string(path).unwrap(), "const Icon = 1;\n");
    }

    #[test]
    fn test_export_module_creates_and_is_idempotent() {
        let dir = TempDir::new().unwrap();
        assert!(export_module(dir.path(), "Home", "Fill").unwrap());
        assert!(!export_module(dir.path(), "Home", "Fill").unwrap());
        assert!(export_module(dir.path(), "Star", "Fill").unwrap());

        let index = fs::read_to_string(dir.path().join(INDEX_FILE)).unwrap();
        assert_eq!(
            index,
            concat!(
                "import dynamic from 'next/dynamic';\n",
                "export const HomeFill = dynamic(() => import('./Home'));\n",
                "export const StarFill = dynamic(() => import('./Star'));\n",
            )
        );
    }

    #[test]
    fn test_export_module_keeps_existing_content() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(INDEX_FILE), "// icons\n").unwrap();
        export_module(dir.path(), "Home", "outline").unwrap();
        let index = fs::read_to_string(dir.path().join(INDEX_FILE)).unwrap();
        assert!(index.starts_with("// icons\nimport dynamic"));
        assert!(index.contains("HomeOutline"));
    }

    #[test]
    fn test_write_component_failure() {
        let dir = TempDir::new().unwrap();
        let err = write_component(&dir.path().join("missing"), "Home", "").unwrap_err();
        assert!(matches!(err, OptimizeError::PersistenceFailure { .. }));
    }
}
