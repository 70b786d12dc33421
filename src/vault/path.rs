// src/vault/path.rs
//!
//! Vault path helpers
//!
//! Vault paths are forward-slash separated, relative to the vault root and
//! never carry leading/trailing separators. The root itself is spelled `/`.
//!

use super::error::VaultError;

/// Path of the vault root folder
pub const ROOT: &str = "/";

/// Normalize a vault path.
///
/// Backslashes count as separators, separator runs collapse, `.` segments
/// vanish and `..` pops its parent. Popping above the root is rejected.
pub fn normalize_path(path: &str) -> Result<String, VaultError> {
    let cleaned = path.replace(['\u{00A0}', '\u{202F}'], " ");

    let mut segments: Vec<&str> = Vec::new();
    for segment in cleaned.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.pop().is_none() {
                    return Err(VaultError::InvalidPath {
                        path: path.to_string(),
                        reason: "path escapes the vault root".to_string(),
                    });
                }
            }
            other => segments.push(other),
        }
    }

    if segments.is_empty() {
        Ok(ROOT.to_string())
    } else {
        Ok(segments.join("/"))
    }
}

/// Join a folder path and an entry name, then normalize
pub fn join(folder: &str, name: &str) -> Result<String, VaultError> {
    normalize_path(&format!("{}/{}", folder, name))
}

/// Last segment of a normalized path (the root has no name)
pub fn file_name(path: &str) -> &str {
    if path == ROOT {
        return "";
    }
    path.rsplit('/').next().unwrap_or(path)
}

/// Parent folder of a normalized path
pub fn parent(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[..idx],
        None => ROOT,
    }
}

/// Reject names that would not land as a single entry inside the target folder
pub fn validate_entry_name(name: &str) -> Result<(), VaultError> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed == "." || trimmed == ".." {
        return Err(VaultError::InvalidName {
            name: name.to_string(),
        });
    }
    if name.contains(['/', '\\']) {
        return Err(VaultError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_separators() {
        assert_eq!(normalize_path("notes//inbox///a.md").unwrap(), "notes/inbox/a.md");
        assert_eq!(normalize_path("/notes/inbox/").unwrap(), "notes/inbox");
        assert_eq!(normalize_path("notes\\inbox\\a.md").unwrap(), "notes/inbox/a.md");
    }

    #[test]
    fn test_normalize_root() {
        assert_eq!(normalize_path("/").unwrap(), ROOT);
        assert_eq!(normalize_path("").unwrap(), ROOT);
        assert_eq!(normalize_path("//").unwrap(), ROOT);
        assert_eq!(normalize_path("./").unwrap(), ROOT);
    }

    #[test]
    fn test_normalize_dot_segments() {
        assert_eq!(normalize_path("a/./b").unwrap(), "a/b");
        assert_eq!(normalize_path("a/x/../b").unwrap(), "a/b");
    }

    #[test]
    fn test_normalize_rejects_escape() {
        assert!(matches!(
            normalize_path("../secret"),
            Err(VaultError::InvalidPath { .. })
        ));
        assert!(normalize_path("a/../../b").is_err());
    }

    #[test]
    fn test_normalize_non_breaking_spaces() {
        assert_eq!(normalize_path("my\u{00A0}notes/a.md").unwrap(), "my notes/a.md");
    }

    #[test]
    fn test_join_root_folder() {
        // Root folder path "/" must not leak into the joined path
        assert_eq!(join(ROOT, "photo.png").unwrap(), "photo.png");
        assert_eq!(join("notes/inbox", "photo.png").unwrap(), "notes/inbox/photo.png");
    }

    #[test]
    fn test_file_name_and_parent() {
        assert_eq!(file_name("notes/inbox/a.md"), "a.md");
        assert_eq!(file_name("a.md"), "a.md");
        assert_eq!(file_name(ROOT), "");
        assert_eq!(parent("notes/inbox/a.md"), "notes/inbox");
        assert_eq!(parent("a.md"), ROOT);
    }

    #[test]
    fn test_validate_entry_name() {
        assert!(validate_entry_name("report.pdf").is_ok());
        assert!(validate_entry_name(".gitignore").is_ok());
        assert!(validate_entry_name("").is_err());
        assert!(validate_entry_name("..").is_err());
        assert!(validate_entry_name("a/b.txt").is_err());
        assert!(validate_entry_name("a\\b.txt").is_err());
    }
}
