use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the save-file picker.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Two-level save-file picker: source menu, directory browser, favorites"
)]
pub struct Args {
    /// Root directory standing in for the flashcard volume.
    #[arg(long, value_hint = clap::ValueHint::DirPath)]
    pub flash: Option<PathBuf>,

    /// Root directory standing in for the removable (SD) volume.
    #[arg(long, value_hint = clap::ValueHint::DirPath)]
    pub removable: Option<PathBuf>,

    /// Cartridge image file backing the Slot-1 row.
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub cart: Option<PathBuf>,

    /// Extension allow-list (repeatable). Defaults to sav plus sav1..sav9.
    #[arg(long = "ext")]
    pub extensions: Vec<String>,

    /// Favorites file path, overriding the per-volume default.
    #[arg(long)]
    pub favorites: Option<PathBuf>,

    /// Pick a file from the starting directory only, without descending.
    #[arg(long)]
    pub no_dir_nav: bool,

    /// Visible list rows, overriding the settings file.
    #[arg(long)]
    pub rows: Option<usize>,

    /// Page-jump length, overriding the settings file.
    #[arg(long)]
    pub page: Option<usize>,
}

impl Args {
    /// The effective extension allow-list: explicit flags win, otherwise
    /// the save-file family `sav`, `sav1` .. `sav9`.
    pub fn resolve_extensions(&self) -> Vec<String> {
        if !self.extensions.is_empty() {
            return self.extensions.clone();
        }
        let mut extensions = vec!["sav".to_string()];
        extensions.extend((1..10).map(|i| format!("sav{i}")));
        extensions
    }
}
