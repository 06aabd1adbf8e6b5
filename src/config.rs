/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD), or from an
/// explicit path given on the command line.
/// Falls back to sensible defaults if the file is missing or incomplete.

use serde::Deserialize;
use std::path::{Path, PathBuf};

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub timing: TimingConfig,
    pub assets: AssetConfig,
    pub gamepad: GamepadConfig,
    pub seed: Option<u64>,
    pub log_file: PathBuf,
    /// Problems met while loading. Logged once the logger is up, since the
    /// log file location itself comes from this config.
    pub warnings: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimingConfig {
    pub tick_rate_ms: u64,
    pub banner_ticks: u32,         // how long an end-of-level message stays up
    pub spawn_interval_ticks: u32, // level 6 drop cadence
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig {
            tick_rate_ms: default_tick_rate(),
            banner_ticks: default_banner_ticks(),
            spawn_interval_ticks: default_spawn_interval(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AssetConfig {
    pub sounds_dir: PathBuf,
    pub images_dir: PathBuf,
}

#[derive(Clone, Debug)]
pub struct GamepadConfig {
    pub fire: Vec<String>,
    pub confirm: Vec<String>,
    pub cancel: Vec<String>,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    timing: TomlTiming,
    #[serde(default)]
    assets: TomlAssets,
    #[serde(default)]
    gamepad: TomlGamepad,
    #[serde(default)]
    general: TomlGeneral,
}

#[derive(Deserialize, Debug)]
struct TomlTiming {
    #[serde(default = "default_tick_rate")]
    tick_rate_ms: u64,
    #[serde(default = "default_banner_ticks")]
    banner_ticks: u32,
    #[serde(default = "default_spawn_interval")]
    spawn_interval_ticks: u32,
}

#[derive(Deserialize, Debug)]
struct TomlAssets {
    #[serde(default = "default_sounds_dir")]
    sounds_dir: String,
    #[serde(default = "default_images_dir")]
    images_dir: String,
}

#[derive(Deserialize, Debug)]
struct TomlGamepad {
    #[serde(default = "default_fire")]
    fire: Vec<String>,
    #[serde(default = "default_confirm")]
    confirm: Vec<String>,
    #[serde(default = "default_cancel")]
    cancel: Vec<String>,
}

#[derive(Deserialize, Debug)]
struct TomlGeneral {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default = "default_log_file")]
    log_file: String,
}

// ── Defaults ──

fn default_tick_rate() -> u64 { 16 }          // ~60 FPS
fn default_banner_ticks() -> u32 { 120 }      // 2s at 60 FPS
fn default_spawn_interval() -> u32 { 60 }     // 1s at 60 FPS

fn default_sounds_dir() -> String { "sounds".into() }
fn default_images_dir() -> String { "images".into() }

fn default_fire() -> Vec<String> { vec!["A".into(), "R1".into()] }
fn default_confirm() -> Vec<String> { vec!["Start".into(), "A".into()] }
fn default_cancel() -> Vec<String> { vec!["Select".into(), "B".into()] }

fn default_log_file() -> String { "liquid-rigidity.log".into() }

impl Default for TomlTiming {
    fn default() -> Self {
        TomlTiming {
            tick_rate_ms: default_tick_rate(),
            banner_ticks: default_banner_ticks(),
            spawn_interval_ticks: default_spawn_interval(),
        }
    }
}

impl Default for TomlAssets {
    fn default() -> Self {
        TomlAssets {
            sounds_dir: default_sounds_dir(),
            images_dir: default_images_dir(),
        }
    }
}

impl Default for TomlGamepad {
    fn default() -> Self {
        TomlGamepad {
            fire: default_fire(),
            confirm: default_confirm(),
            cancel: default_cancel(),
        }
    }
}

impl Default for TomlGeneral {
    fn default() -> Self {
        TomlGeneral { seed: None, log_file: default_log_file() }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// An explicit path wins; otherwise search (1) exe directory, (2) CWD,
    /// (3) the XDG data directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load(explicit: Option<&Path>) -> Self {
        let search_dirs = candidate_dirs();
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => search_dirs
                .iter()
                .map(|d| d.join("config.toml"))
                .find(|p| p.exists()),
        };
        let (toml_cfg, warning) = match path {
            Some(p) => match read_toml(&p) {
                Ok(cfg) => (cfg, None),
                Err(msg) => (TomlConfig::default(), Some(msg)),
            },
            None => (TomlConfig::default(), None),
        };
        let mut cfg = Self::resolve(toml_cfg, &search_dirs);
        cfg.warnings.extend(warning);
        cfg
    }

    /// Parse config text directly (no filesystem search for the file itself).
    #[cfg(test)]
    fn from_toml_str(text: &str) -> Self {
        let cfg = toml::from_str::<TomlConfig>(text).unwrap_or_default();
        Self::resolve(cfg, &[])
    }

    fn resolve(cfg: TomlConfig, search_dirs: &[PathBuf]) -> Self {
        GameConfig {
            timing: TimingConfig {
                tick_rate_ms: cfg.timing.tick_rate_ms.max(1),
                banner_ticks: cfg.timing.banner_ticks,
                spawn_interval_ticks: cfg.timing.spawn_interval_ticks.max(1),
            },
            assets: AssetConfig {
                sounds_dir: resolve_dir(&cfg.assets.sounds_dir, search_dirs),
                images_dir: resolve_dir(&cfg.assets.images_dir, search_dirs),
            },
            gamepad: GamepadConfig {
                fire: cfg.gamepad.fire,
                confirm: cfg.gamepad.confirm,
                cancel: cfg.gamepad.cancel,
            },
            seed: cfg.general.seed,
            log_file: PathBuf::from(cfg.general.log_file),
            warnings: Vec::new(),
        }
    }
}

/// Absolute paths are used as-is; relative ones are looked up in the
/// candidate directories, defaulting to CWD-relative.
fn resolve_dir(name: &str, search_dirs: &[PathBuf]) -> PathBuf {
    let path = PathBuf::from(name);
    if path.is_absolute() {
        return path;
    }
    search_dirs
        .iter()
        .map(|d| d.join(name))
        .find(|p| p.is_dir())
        .unwrap_or(path)
}

/// Candidate directories to search: exe dir + CWD + XDG data (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    // 1. Directory of the running executable
    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    // 2. Current working directory
    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    // 3. XDG data home (~/.local/share/liquid-rigidity)
    if let Ok(home) = std::env::var("HOME") {
        let xdg = PathBuf::from(&home).join(".local/share/liquid-rigidity");
        if xdg.is_dir() && !dirs.iter().any(|d| d == &xdg) {
            dirs.push(xdg);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

fn read_toml(path: &Path) -> Result<TomlConfig, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("could not read {}: {e}", path.display()))?;
    toml::from_str::<TomlConfig>(&text)
        .map_err(|e| format!("{}: parse error, using defaults: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = GameConfig::from_toml_str("");
        assert_eq!(cfg.timing, TimingConfig::default());
        assert_eq!(cfg.timing.tick_rate_ms, 16);
        assert_eq!(cfg.assets.sounds_dir, PathBuf::from("sounds"));
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.gamepad.fire, vec!["A".to_string(), "R1".to_string()]);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let cfg = GameConfig::from_toml_str(
            "[timing]\nbanner_ticks = 30\n\n[general]\nseed = 42\n",
        );
        assert_eq!(cfg.timing.banner_ticks, 30);
        assert_eq!(cfg.timing.spawn_interval_ticks, 60);
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.log_file, PathBuf::from("liquid-rigidity.log"));
    }

    #[test]
    fn zero_rates_are_clamped() {
        let cfg = GameConfig::from_toml_str("[timing]\ntick_rate_ms = 0\nspawn_interval_ticks = 0\n");
        assert_eq!(cfg.timing.tick_rate_ms, 1);
        assert_eq!(cfg.timing.spawn_interval_ticks, 1);
    }

    #[test]
    fn malformed_toml_falls_back() {
        let cfg = GameConfig::from_toml_str("[timing\nbroken");
        assert_eq!(cfg.timing, TimingConfig::default());
    }

    #[test]
    fn absolute_asset_dir_is_kept() {
        let cfg = GameConfig::from_toml_str("[assets]\nimages_dir = \"/opt/pics\"\n");
        assert_eq!(cfg.assets.images_dir, PathBuf::from("/opt/pics"));
    }
}
