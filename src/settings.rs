use std::path::Path;

use config_file::FromConfigFile;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Runtime configuration for a render loop.
///
/// Loaded from a TOML file; missing fields fall back to the defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Pixel count of the strip.
    pub pixels: usize,
    /// Target tick frequency of the render loop.
    pub fps: f32,
    /// Overlay the diagnostic index marker.
    pub show_index: bool,
    /// OLA daemon address; `None` renders to the terminal instead.
    pub ola_addr: Option<String>,
    /// DMX universe to address.
    pub universe: u32,
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            pixels: 30,
            fps: 30.0,
            show_index: false,
            ola_addr: None,
            universe: 0,
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Settings> {
        Settings::from_config_file(path).map_err(|err| {
            Error::InvalidArgument(format!("cannot load {}: {err}", path.display()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let settings = Settings::default();
        assert!(settings.pixels > 0);
        assert!(settings.fps > 0.0);
        assert!(settings.ola_addr.is_none());
    }
}
