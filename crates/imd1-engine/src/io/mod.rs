use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Resolves `path` against `base` unless it is already absolute.
pub fn resolve(path: &str, base: Option<&Path>) -> PathBuf {
    let path = Path::new(path);
    match base {
        Some(base) if path.is_relative() => base.join(path),
        _ => path.to_path_buf(),
    }
}

/// Read a source or bibliography file.
pub fn read_file(path: &Path) -> Result<String, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(IoError::Io)
}

/// Write rendered output, creating parent directories as needed.
pub fn write_file(path: &Path, content: &str) -> Result<(), IoError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }
    fs::write(path, content).map_err(IoError::Io)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{create_test_dir, create_test_file};

    #[test]
    fn test_read_file_success() {
        let dir = create_test_dir();
        let path = create_test_file(&dir, "doc.imd", "# Title\n\nText");
        assert_eq!(read_file(&path).unwrap(), "# Title\n\nText");
    }

    #[test]
    fn test_read_file_not_found() {
        let dir = create_test_dir();
        let result = read_file(&dir.path().join("missing.imd"));
        assert!(matches!(result, Err(IoError::NotFound(_))));
    }

    #[test]
    fn test_write_file_creates_directories() {
        let dir = create_test_dir();
        let path = dir.path().join("out/nested/doc.html");
        write_file(&path, "<p>hi</p>").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<p>hi</p>");
    }

    #[test]
    fn test_resolve_relative_and_absolute() {
        let base = Path::new("/data/bib");
        assert_eq!(resolve("refs.json", Some(base)), base.join("refs.json"));
        assert_eq!(resolve("/abs/refs.json", Some(base)), PathBuf::from("/abs/refs.json"));
        assert_eq!(resolve("refs.json", None), PathBuf::from("refs.json"));
    }
}
