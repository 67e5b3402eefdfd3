//! Generation pipeline - payload and style in, composited PNG out.
//!
//! A [`Pipeline`] owns the immutable configuration and default logo. It
//! holds no other state, so one instance can serve any number of requests
//! from any number of threads.

use std::path::Path;

use image::RgbImage;
use tracing::{debug, info};

use crate::config::RenderConfig;
use crate::encode::encode;
use crate::error::{PlateError, Result};
use crate::render::{composite, encode_png, normalize, rasterize};
use crate::types::{Colour, Logo};

/// A single generation request. Colours are raw, unvalidated strings.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Payload to encode.
    pub data: String,

    /// Foreground colour for data modules (`RRGGBB` or `#RRGGBB`).
    pub foreground: String,

    /// Background colour (`RRGGBB` or `#RRGGBB`).
    pub background: String,

    /// Caller-supplied logo; the default logo is used when `None`.
    pub logo: Option<Logo>,
}

/// A generated PNG image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    png: Vec<u8>,
}

impl GeneratedImage {
    /// The encoded PNG bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.png
    }

    /// Consume into the encoded PNG bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.png
    }

    /// Byte length of the encoded PNG.
    pub fn len(&self) -> usize {
        self.png.len()
    }

    /// Check if the image is empty (never true for a generated image).
    pub fn is_empty(&self) -> bool {
        self.png.is_empty()
    }

    /// Write the PNG to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, &self.png).map_err(|e| PlateError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to write PNG: {}", e),
        })
    }
}

/// QR code generation pipeline.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: RenderConfig,
    default_logo: Logo,
}

impl Pipeline {
    /// Create a pipeline, loading the default logo named by the config.
    pub fn new(config: RenderConfig) -> Result<Self> {
        let default_logo = config.load_default_logo()?;
        Self::with_default_logo(config, default_logo)
    }

    /// Create a pipeline with an explicit default logo.
    ///
    /// The default logo is decoded once here, so a broken one fails at
    /// construction instead of on every request.
    pub fn with_default_logo(config: RenderConfig, default_logo: Logo) -> Result<Self> {
        config.validate()?;
        normalize(&default_logo, config.logo_size)?;
        debug!(kind = %default_logo.kind, "Default logo ready");

        Ok(Self {
            config,
            default_logo,
        })
    }

    /// The configuration this pipeline renders with.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Build a request using the configured default colours and logo.
    pub fn default_request(&self, data: impl Into<String>) -> GenerateRequest {
        GenerateRequest {
            data: data.into(),
            foreground: self.config.foreground.to_string(),
            background: self.config.background.to_string(),
            logo: None,
        }
    }

    /// Render a request to the composited bitmap.
    pub fn render(&self, request: &GenerateRequest) -> Result<RgbImage> {
        if request.data.is_empty() {
            return Err(PlateError::EmptyPayload);
        }

        let foreground = Colour::from_hex(&request.foreground)?;
        let background = Colour::from_hex(&request.background)?;

        debug!(
            data_len = request.data.len(),
            %foreground,
            %background,
            custom_logo = request.logo.is_some(),
            "Generating QR code"
        );

        let matrix = encode(&request.data, self.config.ecc)?;
        debug!(side = matrix.side(), "Encoded symbol");

        let canvas = rasterize(&matrix, foreground, background, self.config.output_size)?;

        let logo = request.logo.as_ref().unwrap_or(&self.default_logo);
        let asset = normalize(logo, self.config.logo_size)?;

        composite(&canvas, &asset, &self.config.backplate)
    }

    /// Render a request and encode it as PNG.
    pub fn generate(&self, request: &GenerateRequest) -> Result<GeneratedImage> {
        let img = self.render(request)?;
        let png = encode_png(&img)?;

        info!(
            width = img.width(),
            height = img.height(),
            bytes = png.len(),
            "QR code generated"
        );

        Ok(GeneratedImage { png })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LogoKind;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn pipeline() -> Pipeline {
        Pipeline::new(RenderConfig::default()).unwrap()
    }

    #[test]
    fn test_pipeline_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Pipeline>();
    }

    #[test]
    fn test_default_request_uses_config_colours() {
        let p = pipeline();
        let req = p.default_request("hello");
        assert_eq!(req.foreground, "#000000");
        assert_eq!(req.background, "#FFFFFF");
        assert!(req.logo.is_none());
    }

    #[test]
    fn test_empty_payload() {
        let p = pipeline();
        let err = p.generate(&p.default_request("")).unwrap_err();
        assert!(matches!(err, PlateError::EmptyPayload));
    }

    #[test]
    fn test_whitespace_payload_is_valid() {
        let p = pipeline();
        assert!(p.generate(&p.default_request("   ")).is_ok());
    }

    #[test]
    fn test_invalid_foreground() {
        let p = pipeline();
        let mut req = p.default_request("hello");
        req.foreground = "zzzzzz".to_string();
        assert!(matches!(
            p.generate(&req).unwrap_err(),
            PlateError::InvalidColour { .. }
        ));
    }

    #[test]
    fn test_invalid_background() {
        let p = pipeline();
        let mut req = p.default_request("hello");
        req.background = String::new();
        assert!(matches!(
            p.generate(&req).unwrap_err(),
            PlateError::InvalidColour { .. }
        ));
    }

    #[test]
    fn test_colour_checked_before_logo() {
        let p = pipeline();
        let mut req = p.default_request("hello");
        req.foreground = "bad".to_string();
        req.logo = Some(Logo::new(LogoKind::Png, b"garbage".to_vec()));
        assert!(matches!(
            p.generate(&req).unwrap_err(),
            PlateError::InvalidColour { .. }
        ));
    }

    #[test]
    fn test_corrupt_logo_aborts() {
        let p = pipeline();
        let mut req = p.default_request("hello");
        req.logo = Some(Logo::new(LogoKind::Png, b"garbage".to_vec()));
        assert!(matches!(
            p.generate(&req).unwrap_err(),
            PlateError::LogoDecode { .. }
        ));
    }

    #[test]
    fn test_generated_len_matches_bytes() {
        let p = pipeline();
        let out = p.generate(&p.default_request("https://github.com")).unwrap();
        assert_eq!(out.len(), out.as_bytes().len());
        assert!(!out.is_empty());
    }

    fn png_logo(w: u32, h: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(w, h, image::Rgba([0, 0, 255, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_png_default_logo_from_config() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("brand.png"), png_logo(10, 10)).unwrap();
        let config = RenderConfig {
            logo: Some(dir.path().join("brand.png")),
            ..RenderConfig::default()
        };

        let p = Pipeline::new(config).unwrap();
        let img = p.render(&p.default_request("hello")).unwrap();

        let (w, h) = img.dimensions();
        let centre = img.get_pixel(w / 2, h / 2).0;
        assert!(centre[2] > 240 && centre[0] < 15, "centre {:?}", centre);
    }

    #[test]
    fn test_broken_default_logo_fails_at_construction() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("brand.png"), b"not a png").unwrap();
        let config = RenderConfig {
            logo: Some(dir.path().join("brand.png")),
            ..RenderConfig::default()
        };

        assert!(matches!(
            Pipeline::new(config).unwrap_err(),
            PlateError::LogoDecode { .. }
        ));
    }

    #[test]
    fn test_save_writes_png() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("code.png");
        let p = pipeline();
        let out = p.generate(&p.default_request("hello")).unwrap();

        out.save(&path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), out.as_bytes());
    }

    #[test]
    fn test_save_missing_directory() {
        let dir = tempdir().unwrap();
        let p = pipeline();
        let out = p.generate(&p.default_request("hello")).unwrap();

        let err = out.save(&dir.path().join("missing").join("code.png")).unwrap_err();
        assert!(matches!(err, PlateError::Io { .. }));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = RenderConfig {
            logo_size: 0,
            ..RenderConfig::default()
        };
        assert!(Pipeline::new(config).is_err());
    }
}
