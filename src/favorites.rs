use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::model::{Favorite, MenuEntry};

/// Line-oriented favorites file: one path per line, LF-terminated, no
/// escaping. The file is only ever appended to or replaced as a whole;
/// the full-rewrite on removal is deliberately not atomic (matching the
/// long-standing on-device contract), so a power loss mid-write can
/// truncate the file but never corrupts the in-memory list.
pub struct FavoritesStore {
    path: PathBuf,
}

impl FavoritesStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every favorite, marking each valid iff the path exists right
    /// now. A missing file is an empty list, not an error.
    pub fn load(&self) -> Vec<Favorite> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(_) => return Vec::new(),
        };
        content
            .lines()
            .filter(|line| !line.is_empty())
            .map(|line| {
                let path = PathBuf::from(line);
                let valid = path.exists();
                Favorite { path, valid }
            })
            .collect()
    }

    /// Appends one favorite line. Used after a file loads successfully from
    /// the browser so it becomes a future favorite.
    pub fn append(&self, favorite: &Path) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", favorite.display())
    }

    /// Rewrites the file with every non-reserved entry except the one at
    /// `index`, then removes that entry from `entries`. Reserved rows are
    /// never written and never removed.
    pub fn remove_and_rewrite(
        &self,
        entries: &mut Vec<MenuEntry>,
        index: usize,
    ) -> io::Result<()> {
        if index >= entries.len() || entries[index].is_reserved() {
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = String::new();
        for (i, entry) in entries.iter().enumerate() {
            if i == index {
                continue;
            }
            if let MenuEntry::Favorite(favorite) = entry {
                out.push_str(&favorite.path.display().to_string());
                out.push('\n');
            }
        }
        fs::write(&self.path, out)?;

        entries.remove(index);
        Ok(())
    }
}
