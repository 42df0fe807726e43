//! Configuration file and CLI overrides
//!
//! Settings come from `config.toml` in the user config directory (or an
//! explicit `--config` path). Command-line flags take precedence over file
//! values, and anything unset falls back to the defaults below.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use log::LevelFilter;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::export::RasterOptions;
use crate::models::Language;

const APP_DIR: &str = "rhetoric-cards";
const DEFAULT_THROTTLE_MS: u64 = 500;
const DEFAULT_JPEG_QUALITY: u8 = 95;
const MAX_SCALE: f32 = 8.0;

/// Raw contents of `config.toml`; every key optional
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub language: Option<Language>,
    pub output_dir: Option<PathBuf>,
    pub catalog_dir: Option<PathBuf>,
    pub throttle_ms: Option<u64>,
    pub scale: Option<f32>,
    pub jpeg_quality: Option<u8>,
    /// Card background, "#rrggbb" or "r,g,b"
    pub background: Option<String>,
    pub log_level: Option<String>,
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub language: Option<Language>,
    pub output_dir: Option<PathBuf>,
    pub catalog_dir: Option<PathBuf>,
    pub log_level: Option<String>,
}

/// Fully resolved settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub language: Language,
    pub output_dir: PathBuf,
    pub catalog_dir: Option<PathBuf>,
    pub throttle: Duration,
    pub raster: RasterOptions,
    pub jpeg_quality: u8,
    pub log_level: LevelFilter,
}

/// `<config_dir>/rhetoric-cards/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    let dir = dirs::config_dir()?;
    Some(dir.join(APP_DIR).join("config.toml"))
}

/// `<download_dir>/rhetoric-cards`, or `./cards` without a download dir
pub fn default_output_dir() -> PathBuf {
    dirs::download_dir()
        .map(|p| p.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("cards"))
}

/// `<data_dir>/rhetoric-cards`, or the working directory
pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|p| p.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn parse_file_config(path: &Path, content: &str) -> Result<FileConfig, ConfigError> {
    let parse_error = |source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    };
    toml::from_str(content).map_err(parse_error)
}

/// Load the config file.
///
/// An explicit path must exist. The default path is optional: when it is
/// missing, every value falls back to its default.
pub fn load_file_config(explicit: Option<&Path>) -> Result<FileConfig, ConfigError> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => match default_config_path() {
            Some(p) if p.exists() => p,
            _ => return Ok(FileConfig::default()),
        },
    };

    let read_error = |source| ConfigError::Read {
        path: path.clone(),
        source,
    };
    let content = std::fs::read_to_string(&path).map_err(read_error)?;
    parse_file_config(&path, &content)
}

/// Parse "#rrggbb" or "r,g,b"
fn parse_rgb(s: &str) -> Option<[u8; 3]> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        return Some([r, g, b]);
    }

    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 3 {
        return None;
    }
    let r = parts[0].trim().parse().ok()?;
    let g = parts[1].trim().parse().ok()?;
    let b = parts[2].trim().parse().ok()?;
    Some([r, g, b])
}

impl Settings {
    /// Merge file values and CLI overrides, validating ranges
    pub fn resolve(file: FileConfig, overrides: Overrides) -> Result<Self, ConfigError> {
        let scale = file.scale.unwrap_or(RasterOptions::default().scale);
        if !(scale > 0.0 && scale <= MAX_SCALE) {
            let msg = format!("scale must be in (0, {}], got {}", MAX_SCALE, scale);
            return Err(ConfigError::Invalid(msg));
        }

        let jpeg_quality = file.jpeg_quality.unwrap_or(DEFAULT_JPEG_QUALITY);
        if !(1..=100).contains(&jpeg_quality) {
            let msg = format!("jpeg_quality must be 1-100, got {}", jpeg_quality);
            return Err(ConfigError::Invalid(msg));
        }

        let background = match file.background.as_deref() {
            Some(s) => match parse_rgb(s) {
                Some(rgb) => rgb,
                None => {
                    let msg = format!("unrecognized background color '{}'", s);
                    return Err(ConfigError::Invalid(msg));
                }
            },
            None => RasterOptions::default().background,
        };

        let level_name = overrides.log_level.or(file.log_level);
        let log_level = match level_name.as_deref() {
            Some(name) => match LevelFilter::from_str(name) {
                Ok(level) => level,
                Err(_) => {
                    let msg = format!("unknown log level '{}'", name);
                    return Err(ConfigError::Invalid(msg));
                }
            },
            None => LevelFilter::Info,
        };

        Ok(Self {
            language: overrides.language.or(file.language).unwrap_or_default(),
            output_dir: overrides
                .output_dir
                .or(file.output_dir)
                .unwrap_or_else(default_output_dir),
            catalog_dir: overrides.catalog_dir.or(file.catalog_dir),
            throttle: Duration::from_millis(file.throttle_ms.unwrap_or(DEFAULT_THROTTLE_MS)),
            raster: RasterOptions {
                scale,
                background,
                verbose: log_level >= LevelFilter::Debug,
                ..RasterOptions::default()
            },
            jpeg_quality,
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_when_empty() {
        let file = FileConfig::default();
        let settings = Settings::resolve(file, Overrides::default()).unwrap();
        assert_eq!(settings.language, Language::En);
        assert_eq!(settings.throttle, Duration::from_millis(500));
        assert_eq!(settings.jpeg_quality, 95);
        assert_eq!(settings.raster.scale, 2.0);
        assert_eq!(settings.raster.background, [255, 255, 255]);
        assert!(!settings.raster.verbose);
        assert_eq!(settings.log_level, LevelFilter::Info);
        assert!(settings.catalog_dir.is_none());
    }

    #[test]
    fn test_parse_file_values() {
        let cfg = parse_file_config(
            Path::new("config.toml"),
            r##"
language = "sv"
output_dir = "/tmp/cards"
throttle_ms = 100
background = "#fafafa"
log_level = "debug"
"##,
        )
        .unwrap();
        let settings = Settings::resolve(cfg, Overrides::default()).unwrap();
        assert_eq!(settings.language, Language::Sv);
        assert_eq!(settings.output_dir, PathBuf::from("/tmp/cards"));
        assert_eq!(settings.throttle, Duration::from_millis(100));
        assert_eq!(settings.raster.background, [250, 250, 250]);
        assert!(settings.raster.verbose);
    }

    #[test]
    fn test_cli_overrides_file() {
        let cfg = FileConfig {
            language: Some(Language::It),
            output_dir: Some(PathBuf::from("from-file")),
            log_level: Some("warn".to_string()),
            ..Default::default()
        };
        let overrides = Overrides {
            language: Some(Language::El),
            output_dir: Some(PathBuf::from("from-cli")),
            catalog_dir: None,
            log_level: Some("error".to_string()),
        };
        let settings = Settings::resolve(cfg, overrides).unwrap();
        assert_eq!(settings.language, Language::El);
        assert_eq!(settings.output_dir, PathBuf::from("from-cli"));
        assert_eq!(settings.log_level, LevelFilter::Error);
    }

    #[test]
    fn test_unsupported_language_rejected() {
        let toml = "language = \"fr\"";
        let err = parse_file_config(Path::new("c.toml"), toml).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = parse_file_config(Path::new("c.toml"), "colour = 1");
        assert!(result.is_err());
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        let bad_quality = FileConfig {
            jpeg_quality: Some(0),
            ..Default::default()
        };
        let result = Settings::resolve(bad_quality, Overrides::default());
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let bad_scale = FileConfig {
            scale: Some(0.0),
            ..Default::default()
        };
        let result = Settings::resolve(bad_scale, Overrides::default());
        assert!(result.is_err());

        let bad_color = FileConfig {
            background: Some("white".to_string()),
            ..Default::default()
        };
        let result = Settings::resolve(bad_color, Overrides::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_rgb_formats() {
        assert_eq!(parse_rgb("#ff0080"), Some([255, 0, 128]));
        assert_eq!(parse_rgb(" 1, 2 ,3 "), Some([1, 2, 3]));
        assert_eq!(parse_rgb("#fff"), None);
        assert_eq!(parse_rgb("1,2"), None);
    }

    #[test]
    fn test_explicit_config_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "jpeg_quality = 80\n").unwrap();
        let cfg = load_file_config(Some(&path)).unwrap();
        assert_eq!(cfg.jpeg_quality, Some(80));

        let nope = dir.path().join("nope.toml");
        let missing = load_file_config(Some(&nope)).unwrap_err();
        assert!(matches!(missing, ConfigError::Read { .. }));
    }
}
