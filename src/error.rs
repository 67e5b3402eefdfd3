use miette::Diagnostic;
use thiserror::Error;

/// Main error type for qrplate operations
#[derive(Error, Diagnostic, Debug)]
pub enum PlateError {
    #[error("IO error: {0}")]
    #[diagnostic(code(qrplate::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(qrplate::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Invalid hex colour format: {value:?}")]
    #[diagnostic(
        code(qrplate::colour),
        help("Expected format: RRGGBB or #RRGGBB")
    )]
    InvalidColour { value: String },

    #[error("QR code data cannot be empty")]
    #[diagnostic(code(qrplate::payload))]
    EmptyPayload,

    #[error("Symbol encoding failed: {0}")]
    #[diagnostic(
        code(qrplate::encode),
        help("Shorten the payload or lower the error correction level")
    )]
    SymbolEncoding(#[from] qrcode::types::QrError),

    #[error("Failed to decode logo: {message}")]
    #[diagnostic(code(qrplate::logo))]
    LogoDecode { message: String },

    #[error("Unsupported logo format: {kind}")]
    #[diagnostic(
        code(qrplate::logo),
        help("Supported formats: image/svg+xml, image/png, image/jpeg")
    )]
    UnsupportedLogoFormat { kind: String },

    #[error("Invalid logo upload: {message}")]
    #[diagnostic(code(qrplate::upload))]
    InvalidUpload {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(qrplate::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Render error: {message}")]
    #[diagnostic(code(qrplate::render))]
    Render { message: String },
}

pub type Result<T> = std::result::Result<T, PlateError>;
