use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Save files larger than this are not plausible cartridge saves.
const MAX_SAVE_BYTES: u64 = 1 << 20;

const COPY_CHUNK: usize = 0x8000;

/// Narrow interface to the save-transfer machinery: dump the inserted
/// cartridge's save to a file, or load a file into the working state.
/// Invoked by the navigation layer, never reimplemented by it.
pub trait SaveTransfer {
    /// Dumps the cartridge save to the well-known card-save path and
    /// returns that path.
    fn dump_save(&mut self) -> io::Result<PathBuf>;
    /// Loads a save file into the working buffer.
    fn load_save(&mut self, path: &Path) -> io::Result<()>;
}

/// File-backed transfer: the cartridge's save lives next to the configured
/// image file with a `.sav` extension.
pub struct FileTransfer {
    image: Option<PathBuf>,
    card_save: PathBuf,
    working: Option<Vec<u8>>,
}

impl FileTransfer {
    pub fn new(image: Option<PathBuf>, card_save: PathBuf) -> Self {
        Self {
            image,
            card_save,
            working: None,
        }
    }

    pub fn card_save_path(&self) -> &Path {
        &self.card_save
    }

    pub fn working_save(&self) -> Option<&[u8]> {
        self.working.as_deref()
    }
}

impl SaveTransfer for FileTransfer {
    fn dump_save(&mut self) -> io::Result<PathBuf> {
        let image = self.image.as_ref().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "no cartridge configured")
        })?;
        let source = image.with_extension("sav");
        if let Some(parent) = self.card_save.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut reader = File::open(&source)?;
        let mut writer = File::create(&self.card_save)?;
        let mut buf = vec![0u8; COPY_CHUNK];
        loop {
            let read = reader.read(&mut buf)?;
            if read == 0 {
                break;
            }
            writer.write_all(&buf[..read])?;
        }
        Ok(self.card_save.clone())
    }

    fn load_save(&mut self, path: &Path) -> io::Result<()> {
        let size = fs::metadata(path)?.len();
        if size == 0 || size > MAX_SAVE_BYTES {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{} is not a usable save file", path.display()),
            ));
        }
        self.working = Some(fs::read(path)?);
        Ok(())
    }
}
