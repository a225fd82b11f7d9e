//! Configuration management

use crate::platform::Platform;
use crate::{Result, ScreenReaderError};
use ini::Ini;
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Default class package for the Android managed bridge
///
/// `[android] package` overrides where the outgoing calls look for
/// `AndroidTextToSpeech` and friends. The exported `NativeScreenReader`
/// entry points are bound to this package by symbol name and do not move.
pub const DEFAULT_ANDROID_PACKAGE: &str = "org/diasurgical/devilutionx";

/// File name used under the user's config directory
const CONFIG_FILE_NAME: &str = "game-screen-reader.cfg";

/// Screen reader settings
///
/// Backed by an INI file so players can tune speech without rebuilding the
/// game. Missing keys fall back to defaults.
pub struct Config {
    /// INI configuration storage
    ini: Ini,

    /// Config file path, if loaded from disk
    path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default location, creating it if missing
    ///
    /// Without a user config directory (Android) the built-in defaults are
    /// used and nothing is written.
    pub fn load() -> Result<Self> {
        Self::load_in(dirs::config_dir())
    }

    /// Load `game-screen-reader.cfg` from `dir`, or defaults if there is no dir
    pub(crate) fn load_in(dir: Option<PathBuf>) -> Result<Self> {
        match dir {
            Some(dir) => Self::load_from(dir.join(CONFIG_FILE_NAME)),
            None => {
                info!("No config directory, using default config");
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from `path`, writing defaults there if it does not exist
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        debug!("Loading config from {:?}", path);

        let ini = if path.exists() {
            Ini::load_from_file(&path)
                .map_err(|e| ScreenReaderError::IniParse(format!("Failed to load config: {}", e)))?
        } else {
            info!("Config file not found, creating default");
            let default = Self::default_ini();
            default
                .write_to_file(&path)
                .map_err(|e| ScreenReaderError::Config(format!("Failed to write config: {}", e)))?;
            default
        };

        Ok(Self {
            ini,
            path: Some(path),
        })
    }

    /// Save configuration to the file it was loaded from
    pub fn save(&self) -> Result<()> {
        let path = self
            .path
            .as_ref()
            .ok_or_else(|| ScreenReaderError::Config("Config has no file path".to_string()))?;
        debug!("Saving config to {:?}", path);
        self.ini
            .write_to_file(path)
            .map_err(|e| ScreenReaderError::Config(format!("Failed to save config: {}", e)))
    }

    /// Default config location (`<config dir>/game-screen-reader.cfg`)
    ///
    /// None on platforms without a user config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
    }

    /// Path the config was loaded from
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn default_ini() -> Ini {
        let mut ini = Ini::new();

        ini.with_section(Some("screen_reader")).set("enabled", "true");

        ini.with_section(Some("speech")).set(
            "interrupt",
            Platform::current().interrupts_by_default().to_string(),
        );

        ini.with_section(Some("android"))
            .set("package", DEFAULT_ANDROID_PACKAGE);

        ini
    }

    /// Get a boolean value from config
    pub fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.ini
            .get_from(Some(section), key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    /// Get a string value from config
    pub fn get_string(&self, section: &str, key: &str, default: &str) -> String {
        self.ini
            .get_from(Some(section), key)
            .unwrap_or(default)
            .to_string()
    }

    /// Get an integer value from config
    pub fn get_int(&self, section: &str, key: &str, default: i32) -> i32 {
        self.ini
            .get_from(Some(section), key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    /// Set a value in config
    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        self.ini.with_section(Some(section)).set(key, value);
    }

    /// Is accessibility output turned on at all?
    pub fn enabled(&self) -> bool {
        self.get_bool("screen_reader", "enabled", true)
    }

    /// Should new speech cut off the current utterance?
    pub fn interrupt(&self) -> bool {
        self.get_bool(
            "speech",
            "interrupt",
            Platform::current().interrupts_by_default(),
        )
    }

    /// Speech rate (0-100, 50 is the engine's normal rate)
    pub fn rate(&self) -> Option<u8> {
        self.get_int("speech", "rate", -1)
            .try_into()
            .ok()
            .filter(|&r| r <= 100)
    }

    /// Speech volume (0-100)
    pub fn volume(&self) -> Option<u8> {
        self.get_int("speech", "volume", -1)
            .try_into()
            .ok()
            .filter(|&v| v <= 100)
    }

    /// Voice index for the TTS engine
    pub fn voice_idx(&self) -> Option<usize> {
        self.get_int("speech", "voice_idx", -1).try_into().ok()
    }

    /// JNI class path prefix of the app's accessibility classes
    pub fn android_package(&self) -> String {
        let package = self.get_string("android", "package", DEFAULT_ANDROID_PACKAGE);
        package.trim().trim_end_matches('/').replace('.', "/")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ini: Self::default_ini(),
            path: None,
        }
    }
}
