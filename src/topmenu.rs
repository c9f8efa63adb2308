use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::context::NavContext;
use crate::model::{Favorite, MenuEntry, PageGeometry, SourceKind, TopMenuOutcome};
use crate::scroll::{MoveKey, ScrollState};
use crate::slot::{CartridgeWatch, SlotEvent};

/// The root screen: a drive/source picker stacked on top of the favorites
/// list. Reserved rows always precede favorites, so the cartridge row's
/// index is fixed for the whole session.
pub struct TopMenuApp {
    entries: Vec<MenuEntry>,
    scroll: ScrollState,
    watch: CartridgeWatch,
    cartridge_index: usize,
    confirm_remove: Option<usize>,
    notice: Option<String>,
    geometry: PageGeometry,
    flash_label: String,
    removable_label: String,
}

impl TopMenuApp {
    /// Builds the menu from the currently detected sources plus the stored
    /// favorites, and evaluates the cartridge row once before the first
    /// draw.
    pub fn new(ctx: &mut NavContext) -> Self {
        let mut entries = Vec::new();
        if ctx.volumes.flash().is_some() {
            entries.push(MenuEntry::Reserved(SourceKind::FlashVolume));
        }
        if ctx.volumes.removable().is_some() {
            entries.push(MenuEntry::Reserved(SourceKind::RemovableVolume));
        }
        // The slot placeholder is always present, inserted or not.
        entries.push(MenuEntry::Reserved(SourceKind::CartridgeSlot));
        let cartridge_index = entries.len() - 1;

        if let Some(store) = &ctx.favorites {
            entries.extend(store.load().into_iter().map(MenuEntry::Favorite));
        }

        let label_of = |root: Option<&std::path::Path>, fallback: &str| {
            root.and_then(|p| p.file_name())
                .map(|name| name.to_string_lossy().into_owned())
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| fallback.to_string())
        };
        let flash_label = label_of(ctx.volumes.flash(), "Flashcard");
        let removable_label = label_of(ctx.volumes.removable(), "SD Card");

        let mut app = Self {
            entries,
            scroll: ScrollState::new(),
            watch: CartridgeWatch::new(),
            cartridge_index,
            confirm_remove: None,
            notice: None,
            geometry: ctx.geometry,
            flash_label,
            removable_label,
        };
        app.advance_watch(ctx);
        app
    }

    pub fn geometry(&self) -> PageGeometry {
        self.geometry
    }

    /// Display text for one row. The cartridge row reflects the latest
    /// metadata probe rather than any filesystem state.
    pub fn entry_label(&self, entry: &MenuEntry) -> String {
        match entry {
            MenuEntry::Reserved(SourceKind::FlashVolume) => {
                format!("flash:/ ({})", self.flash_label)
            }
            MenuEntry::Reserved(SourceKind::RemovableVolume) => {
                format!("sd:/ ({})", self.removable_label)
            }
            MenuEntry::Reserved(SourceKind::CartridgeSlot) => match self.watch.info() {
                Some(info) => format!("Slot-1: ({}) [{}]", info.title, info.gamecode),
                None => "Slot-1: (No card inserted)".to_string(),
            },
            MenuEntry::Favorite(favorite) => favorite.path.display().to_string(),
        }
    }

    pub fn entry_valid(&self, entry: &MenuEntry) -> bool {
        match entry {
            MenuEntry::Reserved(SourceKind::CartridgeSlot) => self.watch.is_valid(),
            MenuEntry::Reserved(_) => true,
            MenuEntry::Favorite(favorite) => favorite.valid,
        }
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn scroll(&self) -> ScrollState {
        self.scroll
    }

    pub fn watch(&self) -> &CartridgeWatch {
        &self.watch
    }

    pub fn cartridge_index(&self) -> usize {
        self.cartridge_index
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// The favorite awaiting removal confirmation, if any.
    pub fn pending_removal(&self) -> Option<&Favorite> {
        match self.confirm_remove.and_then(|i| self.entries.get(i)) {
            Some(MenuEntry::Favorite(favorite)) => Some(favorite),
            _ => None,
        }
    }

    /// Advances the background cartridge poll by one frame. Runs every
    /// frame the cartridge row is inside the viewport, input or not.
    pub fn tick(&mut self, ctx: &mut NavContext) {
        let top = self.scroll.window_offset;
        if top <= self.cartridge_index && self.cartridge_index < top + self.geometry.visible_rows
        {
            self.advance_watch(ctx);
        }
    }

    fn advance_watch(&mut self, ctx: &mut NavContext) {
        match self.watch.tick(ctx.slot.as_mut()) {
            SlotEvent::MediumLost => {
                self.notice = Some("Slot-1: no card inserted".to_string());
            }
            SlotEvent::RowChanged => {
                self.notice = None;
            }
            SlotEvent::None => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, ctx: &mut NavContext) -> Option<TopMenuOutcome> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        let pressed = key.kind == KeyEventKind::Press;

        if let Some(index) = self.confirm_remove {
            if pressed {
                match key.code {
                    KeyCode::Char('y') | KeyCode::Char('Y') => {
                        self.confirm_remove = None;
                        self.remove_favorite(index, ctx);
                    }
                    KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                        self.confirm_remove = None;
                    }
                    _ => {}
                }
            }
            return None;
        }

        // Directional movement accepts key repeat; everything else is a
        // discrete press.
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
            KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Delete => {
                self.prepare_removal();
                None
            }
            KeyCode::Char('q') => Some(TopMenuOutcome::Quit),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(TopMenuOutcome::Quit)
            }
            _ => None,
        }
    }

    fn activate(&mut self, ctx: &mut NavContext) -> Option<TopMenuOutcome> {
        let entry = self.entries.get(self.scroll.cursor)?;
        match entry {
            MenuEntry::Reserved(SourceKind::FlashVolume) => ctx
                .volumes
                .flash()
                .map(|root| TopMenuOutcome::OpenRoot(root.to_path_buf())),
            MenuEntry::Reserved(SourceKind::RemovableVolume) => ctx
                .volumes
                .removable()
                .map(|root| TopMenuOutcome::OpenRoot(root.to_path_buf())),
            MenuEntry::Reserved(SourceKind::CartridgeSlot) => {
                if !self.watch.is_valid() {
                    return None;
                }
                match ctx.transfer.dump_save() {
                    Ok(path) => Some(TopMenuOutcome::ChosePath(path)),
                    Err(err) => {
                        self.notice = Some(format!("Save dump failed: {err}"));
                        None
                    }
                }
            }
            MenuEntry::Favorite(favorite) if favorite.valid => {
                Some(TopMenuOutcome::ChosePath(favorite.path.clone()))
            }
            MenuEntry::Favorite(_) => None,
        }
    }

    fn prepare_removal(&mut self) {
        if let Some(MenuEntry::Favorite(_)) = self.entries.get(self.scroll.cursor) {
            self.confirm_remove = Some(self.scroll.cursor);
        }
    }

    fn remove_favorite(&mut self, index: usize, ctx: &mut NavContext) {
        let Some(store) = &ctx.favorites else {
            return;
        };
        match store.remove_and_rewrite(&mut self.entries, index) {
            Ok(()) => {
                // Stay at the bottom of the list instead of wrapping.
                self.scroll.force_big_jump();
                self.scroll.settle(self.entries.len(), self.geometry);
            }
            Err(err) => {
                self.notice = Some(format!("Favorites update failed: {err}"));
            }
        }
    }
}
