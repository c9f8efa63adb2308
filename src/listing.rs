use std::cmp::Ordering;
use std::io;
use std::path::Path;

use crate::model::DirEntry;

/// Extension allow-list filter plus resource-fork exclusion.
///
/// The comparison is a plain case-insensitive suffix match: `"sav"` accepts
/// `Save.SAV` but rejects `Save.sav1`. Names shorter than the candidate
/// extension never match. An empty allow-list accepts everything.
pub fn name_matches(name: &str, extensions: &[String]) -> bool {
    if name.is_empty() || name.starts_with("._") {
        return false;
    }
    if extensions.is_empty() {
        return true;
    }
    let name = name.as_bytes();
    extensions.iter().any(|ext| {
        let ext = ext.as_bytes();
        name.len() >= ext.len() && name[name.len() - ext.len()..].eq_ignore_ascii_case(ext)
    })
}

fn entry_order(lhs: &DirEntry, rhs: &DirEntry) -> Ordering {
    match (lhs.is_directory, rhs.is_directory) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => lhs
            .name
            .to_lowercase()
            .cmp(&rhs.name.to_lowercase())
            .then(Ordering::Equal),
    }
}

/// Enumerates the immediate children of `dir`, filtered and ordered.
///
/// Directories are never extension-filtered; files must pass
/// [`name_matches`]. A synthesized `..` row leads the listing when
/// `include_parent` is set, since the host directory walk never yields one.
/// The caller turns an `Err` into an empty listing plus an inline message;
/// enumeration failure is never fatal to the session.
pub fn read_listing(
    dir: &Path,
    extensions: &[String],
    include_parent: bool,
) -> io::Result<Vec<DirEntry>> {
    let mut entries: Vec<DirEntry> = Vec::new();

    for child in dir.read_dir()? {
        let child = child?;
        let name = match child.file_name().into_string() {
            Ok(name) => name,
            Err(_) => continue,
        };
        if name.is_empty() || name == "." || name.starts_with("._") {
            continue;
        }
        let is_directory = child.file_type()?.is_dir();
        if is_directory || name_matches(&name, extensions) {
            entries.push(DirEntry { name, is_directory });
        }
    }

    if include_parent {
        entries.push(DirEntry {
            name: "..".to_string(),
            is_directory: true,
        });
    }

    entries.sort_by(entry_order);
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn exts(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn extension_filter_is_a_case_insensitive_suffix_match() {
        assert!(name_matches("Save.SAV", &exts(&["sav"])));
        assert!(!name_matches("Save.sav1", &exts(&["sav"])));
        assert!(name_matches("Save.sav1", &exts(&["sav", "sav1"])));
        assert!(!name_matches("._Save.sav", &exts(&["sav"])));
        assert!(name_matches("anything.bin", &exts(&[])));
        assert!(!name_matches("", &exts(&[])));
        assert!(!name_matches("av", &exts(&["sav"])), "short names never match");
    }

    #[test]
    fn directories_sort_before_files_case_insensitively() {
        let mut entries = vec![
            DirEntry { name: "b".into(), is_directory: false },
            DirEntry { name: "A".into(), is_directory: true },
            DirEntry { name: "a".into(), is_directory: true },
            DirEntry { name: "B".into(), is_directory: false },
        ];
        entries.sort_by(entry_order);
        let order: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(order, ["A", "a", "b", "B"]);
    }

    #[test]
    fn listing_filters_files_but_not_directories() -> io::Result<()> {
        let root = TempDir::new()?;
        fs::create_dir(root.path().join("nested"))?;
        fs::write(root.path().join("game.sav"), b"x")?;
        fs::write(root.path().join("notes.txt"), b"x")?;
        fs::write(root.path().join("._game.sav"), b"x")?;

        let entries = read_listing(root.path(), &exts(&["sav"]), true)?;
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["..", "nested", "game.sav"]);
        assert!(entries[0].is_directory);
        Ok(())
    }

    #[test]
    fn listing_is_stable_under_re_enumeration() -> io::Result<()> {
        let root = TempDir::new()?;
        for name in ["zeta.sav", "Alpha.sav", "alpha2.sav"] {
            fs::write(root.path().join(name), b"x")?;
        }
        let first = read_listing(root.path(), &exts(&["sav"]), false)?;
        let second = read_listing(root.path(), &exts(&["sav"]), false)?;
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn unreadable_directory_surfaces_as_error() {
        let result = read_listing(Path::new("/nonexistent/savenav-test"), &[], false);
        assert!(result.is_err());
    }
}
