//! Command-line and environment configuration
//!
//! Every flag can also be set through an environment variable, and a `.env`
//! file is loaded before parsing (see `main`).

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use qrpage_domain::paging::{PagingConfig, PagingError};
use qrpage_qr::{ErrorCorrection, QrEncoderConfig};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Server configuration
#[derive(Debug, Clone, Parser)]
#[command(name = "qrpage-server")]
#[command(version, about = "Serve a file as a sequence of QR code pages", long_about = None)]
pub struct ServerConfig {
    /// Path to the file to transfer
    #[arg(short = 'f', long = "file", env = "QRPAGE_FILE")]
    pub file: PathBuf,

    /// Address to listen on
    #[arg(long, env = "QRPAGE_ADDR", default_value = "0.0.0.0:8000")]
    pub addr: SocketAddr,

    /// Max content size per QR code part, in bytes
    #[arg(long = "max-part-size", env = "QRPAGE_MAX_PART_SIZE", default_value_t = 1024)]
    pub max_part_size: usize,

    /// QR error correction level: low, medium, quartile or high
    #[arg(long, env = "QRPAGE_EC_LEVEL", default_value = "low")]
    pub ec_level: ErrorCorrection,

    /// Minimum width and height of each QR image, in pixels
    #[arg(long, env = "QRPAGE_IMAGE_SIZE", default_value_t = 1024)]
    pub image_size: u32,

    /// Log output format
    #[arg(long, env = "QRPAGE_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Paging configuration derived from the flags
    ///
    /// # Errors
    ///
    /// Returns `PagingError::InvalidConfiguration` if `--max-part-size` is 0
    pub fn paging_config(&self) -> Result<PagingConfig, PagingError> {
        PagingConfig::new(self.max_part_size)
    }

    /// Encoder configuration derived from the flags
    pub fn encoder_config(&self) -> QrEncoderConfig {
        QrEncoderConfig {
            error_correction: self.ec_level,
            image_size: self.image_size,
        }
    }
}
