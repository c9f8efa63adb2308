use std::path::PathBuf;

/// One row of a directory listing. Rebuilt wholesale on every enumeration;
/// never mutated in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_directory: bool,
}

/// The three storage sources the top menu can offer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceKind {
    FlashVolume,
    RemovableVolume,
    CartridgeSlot,
}

/// A user favorite: a path plus its existence check from load time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Favorite {
    pub path: PathBuf,
    pub valid: bool,
}

/// A top-menu row. Reserved rows never participate in favorite add/remove;
/// their validity comes from mount/hardware state, not from the filesystem.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuEntry {
    Reserved(SourceKind),
    Favorite(Favorite),
}

impl MenuEntry {
    pub fn is_reserved(&self) -> bool {
        matches!(self, MenuEntry::Reserved(_))
    }
}

/// Identity read from an inserted cartridge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardInfo {
    pub title: String,
    pub gamecode: String,
}

/// List-view geometry: how many rows are visible and how far a page move
/// jumps. Both are configuration, not literals (settings file / CLI).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageGeometry {
    pub visible_rows: usize,
    pub page_length: usize,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            visible_rows: 11,
            page_length: 10,
        }
    }
}

/// Terminal result of the top-menu screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TopMenuOutcome {
    /// A raw volume root was chosen; continue browsing at this root.
    OpenRoot(PathBuf),
    /// A favorite or the cartridge source was confirmed.
    ChosePath(PathBuf),
    Quit,
}

/// Terminal result of the file-browser screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BrowserOutcome {
    Chosen(PathBuf),
    /// The user backed out of a volume root; hand control to the top menu.
    ToTopMenu,
    /// Cancel with directory navigation disabled: no file was picked.
    NoSelection,
    Quit,
}
