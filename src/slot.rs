use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use crate::model::CardInfo;

/// Frames to wait after an absence report before probing the medium again.
pub const SETTLE_FRAMES: u32 = 30;

/// Gamecode prefixes the editor knows how to work with.
const ALLOWED_GAMECODES: [&str; 9] = [
    "ADA", "APA", "CPU", "IPK", "IPG", "IRB", "IRA", "IRE", "IRD",
];

/// Narrow interface to the cartridge-slot hardware. One call to
/// [`CartridgeSlot::read_info`] is the single per-frame probe budget.
pub trait CartridgeSlot {
    /// Hardware presence status; may flip between any two frames.
    fn medium_present(&self) -> bool;
    /// Enables or disables low-level slot access.
    fn set_access(&mut self, enabled: bool);
    /// Reads medium metadata; `None` when the read fails.
    fn read_info(&mut self) -> Option<CardInfo>;
    /// Secondary check of the identifier against the allow-list.
    fn id_allowed(&self, gamecode: &str) -> bool;
}

/// File-backed slot: a configured image file stands in for the inserted
/// cartridge, its existence for the presence register, and its header
/// (12-byte title, 4-byte gamecode) for the medium metadata.
pub struct FileSlot {
    image: Option<PathBuf>,
    enabled: bool,
}

impl FileSlot {
    pub fn new(image: Option<PathBuf>) -> Self {
        Self {
            image,
            enabled: false,
        }
    }

    pub fn image(&self) -> Option<&PathBuf> {
        self.image.as_ref()
    }
}

impl CartridgeSlot for FileSlot {
    fn medium_present(&self) -> bool {
        self.image.as_ref().is_some_and(|path| path.exists())
    }

    fn set_access(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn read_info(&mut self) -> Option<CardInfo> {
        if !self.enabled {
            return None;
        }
        let path = self.image.as_ref()?;
        let mut header = [0u8; 16];
        let mut file = File::open(path).ok()?;
        file.read_exact(&mut header).ok()?;

        let title = String::from_utf8_lossy(&header[..12])
            .trim_end_matches(['\0', ' '])
            .to_string();
        let gamecode = String::from_utf8_lossy(&header[12..16])
            .trim_end_matches('\0')
            .to_string();
        if gamecode.is_empty() {
            return None;
        }
        Some(CardInfo { title, gamecode })
    }

    fn id_allowed(&self, gamecode: &str) -> bool {
        ALLOWED_GAMECODES
            .iter()
            .any(|prefix| gamecode.starts_with(prefix))
    }
}

/// Presence state derived from per-frame polling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotState {
    Absent,
    Settling(u32),
    Present,
}

/// What one tick asks the caller to surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotEvent {
    None,
    /// First absence report since the last known-present state: show the
    /// one-shot "no card" notice. Latched until the state changes again.
    MediumLost,
    /// Metadata was (re)read: repaint the cartridge row.
    RowChanged,
}

/// Polls the slot once per frame and recomputes validity without ever
/// blocking the frame loop. Displayed validity is only trustworthy in
/// `Present`; elsewhere it is forced false.
pub struct CartridgeWatch {
    state: SlotState,
    valid: bool,
    info: Option<CardInfo>,
    notice_latched: bool,
    settle_frames: u32,
}

impl CartridgeWatch {
    pub fn new() -> Self {
        Self::with_settle_frames(SETTLE_FRAMES)
    }

    pub fn with_settle_frames(settle_frames: u32) -> Self {
        Self {
            // Settling(0) probes on the very first present poll, so the
            // cartridge row is evaluated once before the first draw.
            state: SlotState::Settling(0),
            valid: false,
            info: None,
            notice_latched: false,
            settle_frames,
        }
    }

    pub fn state(&self) -> SlotState {
        self.state
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn info(&self) -> Option<&CardInfo> {
        self.info.as_ref()
    }

    /// Advances the state machine by one frame: at most one hardware probe,
    /// immediate return otherwise.
    pub fn tick(&mut self, slot: &mut dyn CartridgeSlot) -> SlotEvent {
        if !slot.medium_present() {
            slot.set_access(false);
            self.state = SlotState::Absent;
            self.valid = false;
            self.info = None;
            if !self.notice_latched {
                self.notice_latched = true;
                return SlotEvent::MediumLost;
            }
            return SlotEvent::None;
        }

        match self.state {
            SlotState::Present => SlotEvent::None,
            SlotState::Absent => {
                self.state = SlotState::Settling(self.settle_frames.saturating_sub(1));
                SlotEvent::None
            }
            SlotState::Settling(0) => self.probe(slot),
            SlotState::Settling(remaining) => {
                let remaining = remaining - 1;
                if remaining == 0 {
                    self.probe(slot)
                } else {
                    self.state = SlotState::Settling(remaining);
                    SlotEvent::None
                }
            }
        }
    }

    fn probe(&mut self, slot: &mut dyn CartridgeSlot) -> SlotEvent {
        slot.set_access(true);
        match slot.read_info() {
            Some(info) => {
                self.valid = slot.id_allowed(&info.gamecode);
                self.info = Some(info);
                self.state = SlotState::Present;
                self.notice_latched = false;
                SlotEvent::RowChanged
            }
            None => {
                // Metadata read failed; re-arm and retry after another delay.
                self.state = SlotState::Settling(self.settle_frames);
                SlotEvent::None
            }
        }
    }
}

impl Default for CartridgeWatch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeSlot {
        present: bool,
        enabled: bool,
        gamecode: &'static str,
    }

    impl FakeSlot {
        fn new(present: bool, gamecode: &'static str) -> Self {
            Self {
                present,
                enabled: false,
                gamecode,
            }
        }
    }

    impl CartridgeSlot for FakeSlot {
        fn medium_present(&self) -> bool {
            self.present
        }

        fn set_access(&mut self, enabled: bool) {
            self.enabled = enabled;
        }

        fn read_info(&mut self) -> Option<CardInfo> {
            if !self.enabled {
                return None;
            }
            Some(CardInfo {
                title: "POKEMON D".to_string(),
                gamecode: self.gamecode.to_string(),
            })
        }

        fn id_allowed(&self, gamecode: &str) -> bool {
            ALLOWED_GAMECODES
                .iter()
                .any(|prefix| gamecode.starts_with(prefix))
        }
    }

    #[test]
    fn first_tick_with_medium_present_probes_immediately() {
        let mut slot = FakeSlot::new(true, "ADAE");
        let mut watch = CartridgeWatch::new();

        assert_eq!(watch.tick(&mut slot), SlotEvent::RowChanged);
        assert_eq!(watch.state(), SlotState::Present);
        assert!(watch.is_valid());
    }

    #[test]
    fn hot_removal_drops_validity_on_the_next_poll_and_recovers_after_settle() {
        let mut slot = FakeSlot::new(true, "ADAE");
        let mut watch = CartridgeWatch::new();
        watch.tick(&mut slot);
        assert_eq!(watch.state(), SlotState::Present);

        slot.present = false;
        assert_eq!(watch.tick(&mut slot), SlotEvent::MediumLost);
        assert_eq!(watch.state(), SlotState::Absent);
        assert!(!watch.is_valid());
        assert!(!slot.enabled, "slot access is disabled while absent");

        // The notice is latched: further absent polls stay quiet.
        assert_eq!(watch.tick(&mut slot), SlotEvent::None);

        slot.present = true;
        let mut event = SlotEvent::None;
        for _ in 0..SETTLE_FRAMES {
            event = watch.tick(&mut slot);
        }
        assert_eq!(event, SlotEvent::RowChanged);
        assert_eq!(watch.state(), SlotState::Present);
        assert!(watch.is_valid());
    }

    #[test]
    fn unknown_gamecode_is_present_but_invalid() {
        let mut slot = FakeSlot::new(true, "ZZZZ");
        let mut watch = CartridgeWatch::new();
        watch.tick(&mut slot);
        assert_eq!(watch.state(), SlotState::Present);
        assert!(!watch.is_valid());
        assert_eq!(watch.info().unwrap().gamecode, "ZZZZ");
    }
}
