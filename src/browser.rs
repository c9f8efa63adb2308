use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::context::NavContext;
use crate::listing::read_listing;
use crate::model::{BrowserOutcome, DirEntry, PageGeometry};
use crate::scroll::{MoveKey, ScrollState};

/// The directory drill-down screen. Backing entries are replaced wholesale
/// on every descent or ascent, and the scroll state resets with them.
pub struct BrowserApp {
    cwd: PathBuf,
    entries: Vec<DirEntry>,
    scroll: ScrollState,
    extensions: Vec<String>,
    navigation: bool,
    notice: Option<String>,
    geometry: PageGeometry,
}

impl BrowserApp {
    pub fn new(cwd: PathBuf, extensions: Vec<String>, navigation: bool, ctx: &NavContext) -> Self {
        let mut app = Self {
            cwd,
            entries: Vec::new(),
            scroll: ScrollState::new(),
            extensions,
            navigation,
            notice: None,
            geometry: ctx.geometry,
        };
        app.refresh(ctx);
        app
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn entries(&self) -> &[DirEntry] {
        &self.entries
    }

    pub fn scroll(&self) -> ScrollState {
        self.scroll
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn geometry(&self) -> PageGeometry {
        self.geometry
    }

    /// Re-enumerates the working directory and resets the scroll window.
    /// An unopenable directory shows an inline message over an empty
    /// listing; the session continues.
    fn refresh(&mut self, ctx: &NavContext) {
        let include_parent = self.navigation && !ctx.volumes.is_volume_root(&self.cwd);
        match read_listing(&self.cwd, &self.extensions, include_parent) {
            Ok(entries) => {
                self.entries = entries;
                self.notice = None;
            }
            Err(_) => {
                self.entries = Vec::new();
                self.notice = Some("Unable to open the directory.".to_string());
            }
        }
        self.scroll.reset();
    }

    pub fn handle_key(&mut self, key: KeyEvent, ctx: &mut NavContext) -> Option<BrowserOutcome> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        let pressed = key.kind == KeyEventKind::Press;

        match key.code {
            KeyCode::Up => {
                self.scroll
                    .apply(MoveKey::Up, self.entries.len(), self.geometry);
                return None;
            }
            KeyCode::Down => {
                self.scroll
                    .apply(MoveKey::Down, self.entries.len(), self.geometry);
                return None;
            }
            KeyCode::Left | KeyCode::PageUp => {
                self.scroll
                    .apply(MoveKey::PageBack, self.entries.len(), self.geometry);
                return None;
            }
            KeyCode::Right | KeyCode::PageDown => {
                self.scroll
                    .apply(MoveKey::PageForward, self.entries.len(), self.geometry);
                return None;
            }
            _ => {}
        }
        if !pressed {
            return None;
        }

        match key.code {
            KeyCode::Enter => self.activate(ctx),
            KeyCode::Backspace | KeyCode::Esc => self.cancel(ctx),
            KeyCode::Char('l') | KeyCode::Char('L') => {
                self.load_into_favorites(ctx);
                None
            }
            KeyCode::Char('q') => Some(BrowserOutcome::Quit),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(BrowserOutcome::Quit)
            }
            _ => None,
        }
    }

    fn activate(&mut self, ctx: &mut NavContext) -> Option<BrowserOutcome> {
        // An empty listing has nothing to confirm.
        let entry = self.entries.get(self.scroll.cursor)?.clone();
        if entry.is_directory {
            if self.navigation {
                if entry.name == ".." {
                    self.cwd.pop();
                } else {
                    self.cwd.push(&entry.name);
                }
                self.refresh(ctx);
            }
            None
        } else {
            Some(BrowserOutcome::Chosen(self.cwd.join(&entry.name)))
        }
    }

    fn cancel(&mut self, ctx: &mut NavContext) -> Option<BrowserOutcome> {
        if !self.navigation {
            return Some(BrowserOutcome::NoSelection);
        }
        if ctx.volumes.is_volume_root(&self.cwd) {
            return Some(BrowserOutcome::ToTopMenu);
        }
        self.cwd.pop();
        self.refresh(ctx);
        None
    }

    /// Secondary action: load the file into the working state and, on
    /// success, remember it as a favorite. Failure is silent and non-fatal.
    fn load_into_favorites(&mut self, ctx: &mut NavContext) {
        if !self.navigation {
            return;
        }
        let Some(entry) = self.entries.get(self.scroll.cursor) else {
            return;
        };
        if entry.is_directory {
            return;
        }
        let full = self.cwd.join(&entry.name);
        if ctx.transfer.load_save(&full).is_ok() {
            if let Some(store) = &ctx.favorites {
                let _ = store.append(&full);
            }
        }
    }
}
