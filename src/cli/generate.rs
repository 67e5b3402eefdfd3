//! Generate command implementation.
//!
//! Renders one payload to a PNG file.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::config::{RenderConfig, CONFIG_FILENAME};
use crate::error::Result;
use crate::output::{display_path, Printer};
use crate::pipeline::Pipeline;
use crate::types::LogoUpload;

/// Render a QR code with a logo to a PNG file
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Text or URL to encode
    pub data: String,

    /// Output PNG path
    #[arg(long, short, default_value = "qrcode.png")]
    pub output: PathBuf,

    /// Foreground colour for data modules (RRGGBB or #RRGGBB)
    #[arg(long)]
    pub foreground: Option<String>,

    /// Background colour (RRGGBB or #RRGGBB)
    #[arg(long)]
    pub background: Option<String>,

    /// Logo file (.svg, .png, .jpg, .jpeg)
    #[arg(long)]
    pub logo: Option<PathBuf>,

    /// Config file (default: ./qrplate.yaml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: GenerateArgs, printer: &Printer) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let pipeline = Pipeline::new(config)?;

    let mut request = pipeline.default_request(args.data);
    if let Some(fg) = args.foreground {
        request.foreground = fg;
    }
    if let Some(bg) = args.background {
        request.background = bg;
    }
    if let Some(path) = &args.logo {
        // An empty file counts as no logo, same as an empty upload
        request.logo = LogoUpload::from_path(path)?.validate(pipeline.config().max_logo_bytes)?;
    }

    printer.status("Rendering", &format!("{} bytes of data", request.data.len()));
    let image = pipeline.generate(&request)?;

    image.save(&args.output)?;

    printer.success(
        "Finished",
        &format!("{} ({} bytes)", display_path(&args.output), image.len()),
    );

    Ok(())
}

/// Load an explicit config, or ./qrplate.yaml when present, or defaults.
fn load_config(path: Option<&Path>) -> Result<RenderConfig> {
    match path {
        Some(path) => RenderConfig::load(path),
        None => {
            let local = Path::new(CONFIG_FILENAME);
            if local.exists() {
                RenderConfig::load(local)
            } else {
                Ok(RenderConfig::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlateError;
    use tempfile::tempdir;

    fn args(output: PathBuf) -> GenerateArgs {
        GenerateArgs {
            data: "https://example.com".to_string(),
            output,
            foreground: Some("5DADE2".to_string()),
            background: None,
            logo: None,
            config: None,
        }
    }

    #[test]
    fn test_run_writes_png() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("code.png");

        run(args(output.clone()), &Printer::new()).unwrap();

        let img = image::open(&output).unwrap();
        assert_eq!(img.width(), img.height());
    }

    #[test]
    fn test_run_with_config_and_logo() {
        let dir = tempdir().unwrap();
        let config = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&config, "output_size: 200\n").unwrap();
        let logo = dir.path().join("mark.svg");
        std::fs::write(&logo, crate::DEFAULT_LOGO_SVG).unwrap();

        let output = dir.path().join("code.png");
        let mut a = args(output.clone());
        a.config = Some(config);
        a.logo = Some(logo);

        run(a, &Printer::new()).unwrap();

        let img = image::open(&output).unwrap();
        assert!(img.width() <= 200 + 2 * 200 / 21);
    }

    #[test]
    fn test_run_rejects_oversized_logo() {
        let dir = tempdir().unwrap();
        let config = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&config, "max_logo_bytes: 4\n").unwrap();
        let logo = dir.path().join("mark.svg");
        std::fs::write(&logo, crate::DEFAULT_LOGO_SVG).unwrap();

        let mut a = args(dir.path().join("code.png"));
        a.config = Some(config);
        a.logo = Some(logo);

        let err = run(a, &Printer::new()).unwrap_err();
        assert!(matches!(err, PlateError::InvalidUpload { .. }));
    }

    #[test]
    fn test_run_empty_logo_uses_default() {
        let dir = tempdir().unwrap();
        let logo = dir.path().join("mark.png");
        std::fs::write(&logo, b"").unwrap();

        let output = dir.path().join("code.png");
        let mut a = args(output.clone());
        a.logo = Some(logo);

        run(a, &Printer::new()).unwrap();
        assert!(output.exists());
    }

    #[test]
    fn test_run_invalid_colour_writes_nothing() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("code.png");
        let mut a = args(output.clone());
        a.background = Some("nothex".to_string());

        assert!(run(a, &Printer::new()).is_err());
        assert!(!output.exists());
    }
}
