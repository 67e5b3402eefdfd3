//! Render configuration (qrplate.yaml) parsing.
//!
//! The configuration holds every numeric constant of the pipeline, the
//! default colours, the error correction level and the default logo.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::encode::EccLevel;
use crate::error::{PlateError, Result};
use crate::render::BackplateStyle;
use crate::types::{Colour, Logo, DEFAULT_MAX_LOGO_BYTES};

/// Configuration filename looked up by the CLI.
pub const CONFIG_FILENAME: &str = "qrplate.yaml";

/// Largest accepted pixel dimension for sizes and margins.
pub const MAX_DIMENSION: u32 = 16_384;

/// Logo used when neither the request nor the config supplies one.
pub const DEFAULT_LOGO_SVG: &[u8] = include_bytes!("../assets/logo.svg");

/// Render configuration loaded from qrplate.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Nominal output size in pixels. The canvas is truncated to a whole
    /// number of pixels per module.
    pub output_size: u32,

    /// Longest side of the normalized logo, in pixels.
    pub logo_size: u32,

    /// Error correction level used when encoding.
    pub ecc: EccLevel,

    /// Default foreground colour for data modules.
    pub foreground: Colour,

    /// Default background colour.
    pub background: Colour,

    /// Default logo file (.svg, .png, .jpg, .jpeg). The built-in logo is
    /// used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<PathBuf>,

    /// Largest accepted logo upload, in bytes.
    pub max_logo_bytes: u64,

    /// Backplate drawn behind the logo.
    pub backplate: BackplateStyle,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output_size: 400,
            logo_size: 60,
            ecc: EccLevel::High,
            foreground: Colour::BLACK,
            background: Colour::WHITE,
            logo: None,
            max_logo_bytes: DEFAULT_MAX_LOGO_BYTES,
            backplate: BackplateStyle::default(),
        }
    }
}

impl RenderConfig {
    /// Load configuration from a qrplate.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| PlateError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        let mut config = Self::parse(&content)?;

        // Relative logo paths are relative to the config file
        if let Some(dir) = path.parent() {
            config.logo = config
                .logo
                .take()
                .map(|logo| if logo.is_relative() { dir.join(logo) } else { logo });
        }

        Ok(config)
    }

    /// Parse configuration from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content).map_err(|e| PlateError::Config {
            message: format!("Invalid config: {}", e),
            help: Some(format!("Check {} syntax", CONFIG_FILENAME)),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| PlateError::Config {
            message: format!("Failed to serialize config: {}", e),
            help: None,
        })
    }

    /// Check numeric settings.
    pub fn validate(&self) -> Result<()> {
        let invalid = |field: &str, reason: &str| PlateError::Config {
            message: format!("{} {}", field, reason),
            help: None,
        };

        let too_large = format!("must not exceed {}", MAX_DIMENSION);

        if self.output_size == 0 {
            return Err(invalid("output_size", "must be greater than zero"));
        }
        if self.output_size > MAX_DIMENSION {
            return Err(invalid("output_size", &too_large));
        }
        if self.logo_size == 0 {
            return Err(invalid("logo_size", "must be greater than zero"));
        }
        if self.logo_size > MAX_DIMENSION {
            return Err(invalid("logo_size", &too_large));
        }
        if self.backplate.margin > MAX_DIMENSION {
            return Err(invalid("backplate.margin", &too_large));
        }
        if self.backplate.shadow_offset.unsigned_abs() > MAX_DIMENSION {
            return Err(invalid("backplate.shadow_offset", &too_large));
        }
        if self.backplate.corner_radius.is_nan() || self.backplate.corner_radius < 0.0 {
            return Err(invalid("backplate.corner_radius", "must not be negative"));
        }
        if self.backplate.border_width.is_nan() || self.backplate.border_width < 0.0 {
            return Err(invalid("backplate.border_width", "must not be negative"));
        }

        Ok(())
    }

    /// Load the default logo, falling back to the built-in SVG.
    ///
    /// A configured logo's kind comes from its file extension.
    pub fn load_default_logo(&self) -> Result<Logo> {
        match &self.logo {
            Some(path) => Logo::from_path(path),
            None => Ok(Logo::svg(DEFAULT_LOGO_SVG)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LogoKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_empty_is_default() {
        let config = RenderConfig::parse("{}").unwrap();
        assert_eq!(config, RenderConfig::default());
    }

    #[test]
    fn test_parse_full() {
        let yaml = r##"
output_size: 800
logo_size: 90
ecc: quartile
foreground: "#5DADE2"
background: "ffffff"
logo: brand.svg
max_logo_bytes: 1024
backplate:
  margin: 10
  corner_radius: 4.5
  shadow_offset: 3
  shadow_alpha: 40
  border_width: 1.0
"##;
        let config = RenderConfig::parse(yaml).unwrap();

        assert_eq!(config.output_size, 800);
        assert_eq!(config.logo_size, 90);
        assert_eq!(config.ecc, EccLevel::Quartile);
        assert_eq!(config.foreground, Colour::rgb(0x5d, 0xad, 0xe2));
        assert_eq!(config.background, Colour::WHITE);
        assert_eq!(config.logo, Some(PathBuf::from("brand.svg")));
        assert_eq!(config.max_logo_bytes, 1024);
        assert_eq!(
            config.backplate,
            BackplateStyle {
                margin: 10,
                corner_radius: 4.5,
                shadow_offset: 3,
                shadow_alpha: 40,
                border_width: 1.0,
            }
        );
    }

    #[test]
    fn test_parse_invalid_colour() {
        let err = RenderConfig::parse("foreground: \"#12345\"").unwrap_err();
        assert!(matches!(err, PlateError::Config { .. }));
    }

    #[test]
    fn test_parse_zero_output_size() {
        let err = RenderConfig::parse("output_size: 0").unwrap_err();
        assert!(matches!(err, PlateError::Config { .. }));
    }

    #[test]
    fn test_parse_huge_output_size() {
        let err = RenderConfig::parse("output_size: 4000000000").unwrap_err();
        assert!(matches!(err, PlateError::Config { ref message, .. } if message.contains("output_size")));
    }

    #[test]
    fn test_parse_huge_logo_size() {
        let err = RenderConfig::parse("logo_size: 100000").unwrap_err();
        assert!(matches!(err, PlateError::Config { .. }));
    }

    #[test]
    fn test_parse_huge_margin() {
        let err = RenderConfig::parse("backplate:\n  margin: 4000000000").unwrap_err();
        assert!(matches!(err, PlateError::Config { ref message, .. } if message.contains("margin")));
    }

    #[test]
    fn test_parse_largest_sizes() {
        let config = RenderConfig::parse("output_size: 16384\nlogo_size: 16384").unwrap();
        assert_eq!(config.output_size, MAX_DIMENSION);
    }

    #[test]
    fn test_parse_negative_radius() {
        let err = RenderConfig::parse("backplate:\n  corner_radius: -1.0").unwrap_err();
        assert!(matches!(err, PlateError::Config { .. }));
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = RenderConfig::default();
        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("#000000"));
        assert_eq!(RenderConfig::parse(&yaml).unwrap(), config);
    }

    #[test]
    fn test_load_resolves_relative_logo() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "logo: art/mark.svg\n").unwrap();

        let config = RenderConfig::load(&path).unwrap();
        assert_eq!(config.logo, Some(dir.path().join("art/mark.svg")));
    }

    #[test]
    fn test_load_missing_file() {
        let err = RenderConfig::load(Path::new("/nonexistent/qrplate.yaml")).unwrap_err();
        assert!(matches!(err, PlateError::Io { .. }));
    }

    #[test]
    fn test_default_logo_is_builtin() {
        let logo = RenderConfig::default().load_default_logo().unwrap();
        assert_eq!(logo, Logo::svg(DEFAULT_LOGO_SVG));
    }

    #[test]
    fn test_default_logo_kind_from_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "logo: brand.png\n").unwrap();
        std::fs::write(dir.path().join("brand.png"), b"png bytes").unwrap();

        let logo = RenderConfig::load(&path).unwrap().load_default_logo().unwrap();
        assert_eq!(logo.kind, LogoKind::Png);
        assert_eq!(logo.bytes, b"png bytes");
    }
}
