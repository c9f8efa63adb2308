use crate::model::PageGeometry;

/// Directional input decoded from the key layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveKey {
    Up,
    Down,
    PageBack,
    PageForward,
}

/// What the caller must repaint after a settle step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Redraw {
    /// Degenerate case (empty list): nothing to repaint.
    Unchanged,
    /// Window offset unchanged: only the cursor highlight moved.
    Cursor,
    /// Window offset changed: repaint the whole visible window.
    Window,
}

/// Cursor, visible-window offset, and the big-jump flag for one list view.
///
/// Invariants after every settle: `cursor < length` (or 0 when empty) and
/// `window_offset <= cursor <= window_offset + visible_rows - 1`. The
/// big-jump flag is consumed exactly once per settle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollState {
    pub cursor: usize,
    pub window_offset: usize,
    pending_big_jump: bool,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets to the top of a freshly replaced backing list.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Applies one directional input and settles.
    ///
    /// Single steps wrap around the ends of the list; page moves set the
    /// big-jump flag, which turns the wrap correction into a clamp for the
    /// rest of this settle cycle.
    pub fn apply(&mut self, key: MoveKey, length: usize, geometry: PageGeometry) -> Redraw {
        let delta = match key {
            MoveKey::Up => -1,
            MoveKey::Down => 1,
            MoveKey::PageBack => {
                self.pending_big_jump = true;
                -(geometry.page_length as isize)
            }
            MoveKey::PageForward => {
                self.pending_big_jump = true;
                geometry.page_length as isize
            }
        };
        self.settle_at(self.cursor as isize + delta, length, geometry)
    }

    /// Marks the next settle as a big jump so an out-of-range cursor clamps
    /// to the nearest edge instead of wrapping. Used after list mutation
    /// (favorite removal) to pin the cursor to the new bottom.
    pub fn force_big_jump(&mut self) {
        self.pending_big_jump = true;
    }

    /// Re-settles the current cursor against a (possibly shrunk) length.
    pub fn settle(&mut self, length: usize, geometry: PageGeometry) -> Redraw {
        self.settle_at(self.cursor as isize, length, geometry)
    }

    fn settle_at(&mut self, target: isize, length: usize, geometry: PageGeometry) -> Redraw {
        if length == 0 {
            self.cursor = 0;
            self.window_offset = 0;
            self.pending_big_jump = false;
            return Redraw::Unchanged;
        }

        let last = (length - 1) as isize;
        let settled = if target < 0 {
            // Wrap to the bottom unless this cycle was a page move.
            if self.pending_big_jump {
                0
            } else {
                last
            }
        } else if target > last {
            // Wrap to the top unless this cycle was a page move.
            if self.pending_big_jump {
                last
            } else {
                0
            }
        } else {
            target
        };
        self.cursor = settled as usize;
        self.pending_big_jump = false;

        let visible = geometry.visible_rows.max(1);
        if self.cursor < self.window_offset {
            self.window_offset = self.cursor;
            Redraw::Window
        } else if self.cursor > self.window_offset + visible - 1 {
            self.window_offset = self.cursor + 1 - visible;
            Redraw::Window
        } else {
            Redraw::Cursor
        }
    }
}
