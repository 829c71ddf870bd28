//! Metadata keys. A directory key is empty (the root) or ends with `/`; a file
//! key is its directory key followed by the file name.

use crate::error::{DfsError, DfsResult};

pub fn normalize_dir(dir_path: &str) -> String {
    let trimmed = dir_path.trim();
    if trimmed.is_empty() || trimmed.ends_with('/') {
        trimmed.to_owned()
    } else {
        format!("{trimmed}/")
    }
}

pub fn validate_file_name(file_name: &str) -> DfsResult<()> {
    if file_name.is_empty() || file_name.contains('/') {
        return Err(DfsError::InvalidArgument(format!(
            "file name {file_name:?} must be non empty and contain no '/'"
        )));
    }
    Ok(())
}

pub fn file_key(dir_path: &str, file_name: &str) -> String {
    format!("{}{}", normalize_dir(dir_path), file_name)
}

/// Inverse of [`file_key`].
pub fn split_file_key(key: &str) -> (&str, &str) {
    match key.rfind('/') {
        Some(idx) => key.split_at(idx + 1),
        None => ("", key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directories_gain_a_trailing_separator() {
        assert_eq!(normalize_dir("docs"), "docs/");
        assert_eq!(normalize_dir("docs/"), "docs/");
        assert_eq!(normalize_dir(""), "");
    }

    #[test]
    fn file_keys_split_back_into_directory_and_name() {
        let key = file_key("Test1", "foo");
        assert_eq!(key, "Test1/foo");
        assert_eq!(split_file_key(&key), ("Test1/", "foo"));
        assert_eq!(split_file_key("a/b/c.txt"), ("a/b/", "c.txt"));
        assert_eq!(split_file_key("root.txt"), ("", "root.txt"));
    }

    #[test]
    fn file_names_with_separators_are_rejected() {
        assert!(validate_file_name("a.txt").is_ok());
        assert!(validate_file_name("").is_err());
        assert!(validate_file_name("a/b").is_err());
    }
}
