use std::fs;
use std::io;
use std::path::PathBuf;

use crate::model::PageGeometry;

const SETTINGS_ENV_PATH: &str = "SAVENAV_SETTINGS_PATH";

/// Persisted display configuration. The visible-row count and page-jump
/// length are tied to the display, so they are settings rather than
/// literals.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AppSettings {
    pub visible_rows: usize,
    pub page_length: usize,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            visible_rows: 11,
            page_length: 10,
        }
    }
}

impl AppSettings {
    pub fn geometry(&self) -> PageGeometry {
        PageGeometry {
            visible_rows: self.visible_rows.max(1),
            page_length: self.page_length.max(1),
        }
    }
}

pub fn load_settings() -> AppSettings {
    try_load_settings().unwrap_or_default()
}

pub fn try_load_settings() -> io::Result<AppSettings> {
    let path = settings_file_path();
    if !path.exists() {
        return Ok(AppSettings::default());
    }

    let content = fs::read_to_string(path)?;
    Ok(parse_settings(&content))
}

pub fn save_settings(settings: &AppSettings) -> io::Result<()> {
    let path = settings_file_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serialize_settings(settings))
}

fn settings_file_path() -> PathBuf {
    if let Some(path) = std::env::var_os(SETTINGS_ENV_PATH) {
        let path = PathBuf::from(path);
        if !path.as_os_str().is_empty() {
            return path;
        }
    }

    if let Some(config_home) = std::env::var_os("XDG_CONFIG_HOME") {
        if !config_home.is_empty() {
            return PathBuf::from(config_home)
                .join("savenav")
                .join("settings.conf");
        }
    }

    if let Ok(home) = std::env::var("HOME") {
        let mut path = PathBuf::from(home);
        path.push(".config");
        path.push("savenav");
        path.push("settings.conf");
        return path;
    }

    std::env::temp_dir().join("savenav.settings.conf")
}

fn parse_settings(content: &str) -> AppSettings {
    let mut settings = AppSettings::default();

    for raw_line in content.lines() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };

        let key = key.trim();
        let value = value.trim();

        match key {
            "visible_rows" => {
                if let Ok(v) = value.parse::<usize>() {
                    if v > 0 {
                        settings.visible_rows = v;
                    }
                }
            }
            "page_length" => {
                if let Ok(v) = value.parse::<usize>() {
                    if v > 0 {
                        settings.page_length = v;
                    }
                }
            }
            _ => {}
        }
    }

    settings
}

fn serialize_settings(settings: &AppSettings) -> String {
    format!(
        concat!(
            "# savenav settings file\n",
            "visible_rows={visible_rows}\n",
            "page_length={page_length}\n"
        ),
        visible_rows = settings.visible_rows,
        page_length = settings.page_length,
    )
}
