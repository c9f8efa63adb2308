use std::fs;
use std::path::{Path, PathBuf};

use crate::favorites::FavoritesStore;
use crate::model::PageGeometry;
use crate::slot::CartridgeSlot;
use crate::transfer::SaveTransfer;

/// Application data directory under a volume root.
pub const DATA_DIR: &str = ".savenav";
pub const FAVORITES_FILE: &str = "favorites.lst";
pub const CARD_SAVE_FILE: &str = "card.sav";

/// The two fixed volumes the picker can browse. A volume is mounted iff its
/// configured root is a readable directory; roots are normalized once so
/// "at a volume root" checks are plain path equality.
#[derive(Clone, Debug, Default)]
pub struct Volumes {
    flash: Option<PathBuf>,
    removable: Option<PathBuf>,
}

impl Volumes {
    pub fn new(flash: Option<PathBuf>, removable: Option<PathBuf>) -> Self {
        let mount = |root: Option<PathBuf>| {
            root.filter(|p| p.is_dir())
                .and_then(|p| fs::canonicalize(p).ok())
        };
        Self {
            flash: mount(flash),
            removable: mount(removable),
        }
    }

    pub fn flash(&self) -> Option<&Path> {
        self.flash.as_deref()
    }

    pub fn removable(&self) -> Option<&Path> {
        self.removable.as_deref()
    }

    pub fn any_mounted(&self) -> bool {
        self.flash.is_some() || self.removable.is_some()
    }

    /// Where application data (favorites, dumped saves) lives: the
    /// removable volume when mounted, the flashcard volume otherwise.
    pub fn data_root(&self) -> Option<&Path> {
        self.removable.as_deref().or(self.flash.as_deref())
    }

    pub fn default_favorites_path(&self) -> Option<PathBuf> {
        self.data_root()
            .map(|root| root.join(DATA_DIR).join(FAVORITES_FILE))
    }

    pub fn default_card_save_path(&self) -> Option<PathBuf> {
        self.data_root()
            .map(|root| root.join(DATA_DIR).join(CARD_SAVE_FILE))
    }

    pub fn is_volume_root(&self, path: &Path) -> bool {
        self.flash.as_deref() == Some(path) || self.removable.as_deref() == Some(path)
    }
}

/// Everything the two screen controllers share for one picker session.
pub struct NavContext {
    pub volumes: Volumes,
    pub favorites: Option<FavoritesStore>,
    pub slot: Box<dyn CartridgeSlot>,
    pub transfer: Box<dyn SaveTransfer>,
    pub geometry: PageGeometry,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn data_root_prefers_the_removable_volume() {
        let flash = TempDir::new().unwrap();
        let removable = TempDir::new().unwrap();

        let both = Volumes::new(
            Some(flash.path().to_path_buf()),
            Some(removable.path().to_path_buf()),
        );
        assert_eq!(both.data_root(), both.removable());

        let flash_only = Volumes::new(Some(flash.path().to_path_buf()), None);
        assert_eq!(flash_only.data_root(), flash_only.flash());
    }

    #[test]
    fn missing_directories_do_not_mount() {
        let volumes = Volumes::new(Some(PathBuf::from("/nonexistent/savenav-flash")), None);
        assert!(!volumes.any_mounted());
        assert!(volumes.default_favorites_path().is_none());
    }
}
