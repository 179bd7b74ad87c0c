use super::ReportError;
use lazy_static::lazy_static;
use regex::Regex;
use std::{io::Write, path::Path};
use tempfile::NamedTempFile;

lazy_static! {
    static ref UNSAFE_FILENAME_CHARS: Regex =
        Regex::new(r"[^A-Za-z0-9_-]").expect("filename pattern must compile");
}

/// Filename stem for a record: the part of its URL after the last `=`
/// (the `v` query parameter for watch URLs), made safe for the filesystem.
pub fn derive_id(video_url: &str) -> String {
    let tail = video_url.rsplit('=').next().unwrap_or_default().trim();
    let stem = UNSAFE_FILENAME_CHARS.replace_all(tail, "_");
    if stem.is_empty() {
        "unknown".to_string()
    } else {
        stem.into_owned()
    }
}

pub fn write_atomically(folder: &Path, path: &Path, contents: &[u8]) -> Result<(), ReportError> {
    let mut file = NamedTempFile::new_in(folder)?;
    file.write_all(contents)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|source| ReportError::Persist {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_id_from_watch_url() {
        assert_eq!(
            derive_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            "dQw4w9WgXcQ"
        );
        assert_eq!(derive_id("https://www.youtube.com/watch?v=A"), "A");
    }

    #[test]
    fn test_derive_id_is_filesystem_safe() {
        assert_eq!(derive_id("N/A"), "N_A");
        assert_eq!(derive_id("https://youtu.be/abc"), "https___youtu_be_abc");
        assert_eq!(derive_id("../../etc"), "______etc");
        assert_eq!(derive_id("watch?v="), "unknown");
        assert_eq!(derive_id(""), "unknown");
    }

    #[test]
    fn test_write_atomically_replaces_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        write_atomically(dir.path(), &path, b"first").unwrap();
        write_atomically(dir.path(), &path, b"second").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"second");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
