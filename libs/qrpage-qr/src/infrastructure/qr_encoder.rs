//! QR Segment Encoder Implementation
//!
//! This module implements the `SegmentEncoder` port with the `qrcode` crate.
//! Segments are encoded as binary QR codes and rendered to a greyscale PNG.

use std::fmt;
use std::io::Cursor;
use std::str::FromStr;

use image::{ImageFormat, Luma};
use qrcode::{bits::Bits, types::QrError, EcLevel, QrCode, Version};
use qrpage_domain::{paging::PagingError, ports::SegmentEncoder};
use tracing::{debug, error, instrument};

use crate::error::QrAdapterError;

/// QR error correction level
///
/// Higher levels survive more damage to the printed/displayed code at the
/// cost of capacity. `Low` matches what a screen-to-camera link needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ErrorCorrection {
    /// ~7% recovery
    #[default]
    Low,
    /// ~15% recovery
    Medium,
    /// ~25% recovery
    Quartile,
    /// ~30% recovery
    High,
}

impl ErrorCorrection {
    /// Largest binary payload a version 40 QR code holds at this level
    pub fn max_payload_len(self) -> usize {
        match self {
            Self::Low => 2953,
            Self::Medium => 2331,
            Self::Quartile => 1663,
            Self::High => 1273,
        }
    }

    fn ec_level(self) -> EcLevel {
        match self {
            Self::Low => EcLevel::L,
            Self::Medium => EcLevel::M,
            Self::Quartile => EcLevel::Q,
            Self::High => EcLevel::H,
        }
    }
}

impl FromStr for ErrorCorrection {
    type Err = QrAdapterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "l" | "low" => Ok(Self::Low),
            "m" | "medium" => Ok(Self::Medium),
            "q" | "quartile" => Ok(Self::Quartile),
            "h" | "high" => Ok(Self::High),
            _ => Err(QrAdapterError::unknown_error_correction(s)),
        }
    }
}

impl fmt::Display for ErrorCorrection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::Quartile => "quartile",
            Self::High => "high",
        };
        f.write_str(name)
    }
}

/// Configuration for the QR encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrEncoderConfig {
    /// Error correction level (default: low)
    pub error_correction: ErrorCorrection,
    /// Minimum width and height of the rendered PNG in pixels (default: 1024)
    pub image_size: u32,
}

impl Default for QrEncoderConfig {
    fn default() -> Self {
        Self {
            error_correction: ErrorCorrection::Low,
            image_size: 1024,
        }
    }
}

/// QR-code implementation of the SegmentEncoder port
///
/// This adapter translates a segment's bytes into a PNG image of a binary
/// mode QR code.
///
/// ## Error Handling
///
/// - Segments longer than the level's capacity are rejected with
///   `PagingError::EncodingCapacityExceeded` before the QR library is called
/// - Any other QR or PNG failure becomes `PagingError::EncodingFailed`
#[derive(Debug, Clone, Default)]
pub struct QrSegmentEncoder {
    config: QrEncoderConfig,
}

impl QrSegmentEncoder {
    /// Create a new QR encoder
    ///
    /// # Example
    ///
    /// ```rust
    /// use qrpage_domain::ports::SegmentEncoder;
    /// use qrpage_qr::{ErrorCorrection, QrEncoderConfig, QrSegmentEncoder};
    ///
    /// let encoder = QrSegmentEncoder::new(QrEncoderConfig {
    ///     error_correction: ErrorCorrection::Medium,
    ///     image_size: 512,
    /// });
    /// assert_eq!(encoder.max_payload_len(), 2331);
    /// ```
    pub fn new(config: QrEncoderConfig) -> Self {
        Self { config }
    }

    /// Pack a segment as a single byte-mode QR segment in the smallest version that holds it
    fn byte_mode_bits(&self, segment: &[u8]) -> Result<Bits, QrError> {
        let ec_level = self.config.error_correction.ec_level();
        let mut last_err = QrError::DataTooLong;

        for version in 1..=40 {
            let mut bits = Bits::new(Version::Normal(version));
            match bits
                .push_byte_data(segment)
                .and_then(|()| bits.push_terminator(ec_level))
            {
                Ok(()) => return Ok(bits),
                Err(err) => last_err = err,
            }
        }

        Err(last_err)
    }

    fn write_png(&self, code: &QrCode) -> Result<Vec<u8>, PagingError> {
        let size = self.config.image_size;
        let image = code
            .render::<Luma<u8>>()
            .min_dimensions(size, size)
            .build();

        let mut png = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|err| {
                error!(error = ?err, "Failed to write PNG");
                PagingError::encoding_failed(format!("writing png: {}", err))
            })?;

        Ok(png)
    }
}

impl SegmentEncoder for QrSegmentEncoder {
    fn max_payload_len(&self) -> usize {
        self.config.error_correction.max_payload_len()
    }

    fn content_type(&self) -> &'static str {
        "image/png"
    }

    #[instrument(
        skip(self, segment),
        fields(size = segment.len(), ec = %self.config.error_correction)
    )]
    fn encode(&self, segment: &[u8]) -> Result<Vec<u8>, PagingError> {
        let max = self.max_payload_len();
        if segment.len() > max {
            error!(max, "Segment exceeds QR capacity");
            return Err(PagingError::capacity_exceeded(segment.len(), max));
        }

        let ec_level = self.config.error_correction.ec_level();
        let code = self
            .byte_mode_bits(segment)
            .and_then(|bits| QrCode::with_bits(bits, ec_level))
            .map_err(|err| {
                error!(error = ?err, "QR encoding failed");
                PagingError::encoding_failed(err.to_string())
            })?;

        let png = self.write_png(&code)?;
        debug!(version = ?code.version(), png_size = png.len(), "Encoded segment");

        Ok(png)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    const LEVELS: [ErrorCorrection; 4] = [
        ErrorCorrection::Low,
        ErrorCorrection::Medium,
        ErrorCorrection::Quartile,
        ErrorCorrection::High,
    ];

    /// Read the byte content back out of a rendered QR code
    fn decode_png(png: &[u8]) -> Vec<u8> {
        let image = image::load_from_memory_with_format(png, ImageFormat::Png)
            .unwrap()
            .to_luma8();
        let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
            image.width() as usize,
            image.height() as usize,
            |x, y| image.get_pixel(x as u32, y as u32)[0],
        );

        let grids = prepared.detect_grids();
        assert_eq!(grids.len(), 1, "expected exactly one QR code");

        let mut data = Vec::new();
        grids[0].decode_to(&mut data).unwrap();
        data
    }

    /// Runs of six ASCII digits separated by a non-text byte
    fn digit_runs(len: usize) -> Vec<u8> {
        b"123456\xFF".iter().copied().cycle().take(len).collect()
    }

    fn encoder(error_correction: ErrorCorrection, image_size: u32) -> QrSegmentEncoder {
        QrSegmentEncoder::new(QrEncoderConfig {
            error_correction,
            image_size,
        })
    }

    #[test]
    fn test_encode_produces_png() {
        let encoder = encoder(ErrorCorrection::Low, 256);

        let png = encoder.encode(b"hello qrpage").unwrap();

        assert!(png.starts_with(PNG_SIGNATURE));
        assert_eq!(encoder.content_type(), "image/png");
    }

    #[test]
    fn test_image_is_at_least_requested_size() {
        let encoder = encoder(ErrorCorrection::Low, 300);

        let png = encoder.encode(&[0u8, 1, 2, 3, 255]).unwrap();
        let decoded = image::load_from_memory_with_format(&png, ImageFormat::Png).unwrap();

        assert!(decoded.width() >= 300);
        assert!(decoded.height() >= 300);
        assert_eq!(decoded.width(), decoded.height());
    }

    #[test]
    fn test_encode_at_full_capacity() {
        let encoder = encoder(ErrorCorrection::High, 64);
        let segment = vec![0xA5; ErrorCorrection::High.max_payload_len()];

        assert!(encoder.encode(&segment).is_ok());
    }

    #[test]
    fn test_encode_mixed_content_at_full_capacity() {
        for level in LEVELS {
            let segment = digit_runs(level.max_payload_len());

            let png = encoder(level, 64).encode(&segment);

            assert!(png.is_ok(), "{} level failed: {:?}", level, png.err());
        }
    }

    #[test]
    fn test_encoded_png_decodes_to_segment() {
        let mut segment = digit_runs(120);
        segment.extend([0u8, 0x7F, 0x80, 0xFE]);

        for level in LEVELS {
            let png = encoder(level, 512).encode(&segment).unwrap();
            assert_eq!(decode_png(&png), segment, "{} level", level);
        }
    }

    #[test]
    fn test_encode_over_capacity_fails() {
        let encoder = encoder(ErrorCorrection::Low, 64);
        let segment = vec![0u8; 2954];

        let err = encoder.encode(&segment).unwrap_err();
        assert!(matches!(
            err,
            PagingError::EncodingCapacityExceeded {
                size: 2954,
                max: 2953
            }
        ));
    }

    #[test]
    fn test_max_payload_len_per_level() {
        assert_eq!(encoder(ErrorCorrection::Low, 1).max_payload_len(), 2953);
        assert_eq!(encoder(ErrorCorrection::Medium, 1).max_payload_len(), 2331);
        assert_eq!(encoder(ErrorCorrection::Quartile, 1).max_payload_len(), 1663);
        assert_eq!(encoder(ErrorCorrection::High, 1).max_payload_len(), 1273);
    }

    #[test]
    fn test_encode_empty_segment() {
        let png = QrSegmentEncoder::default().encode(&[]).unwrap();
        assert!(png.starts_with(PNG_SIGNATURE));
    }

    #[test]
    fn test_parse_error_correction() {
        assert_eq!("low".parse::<ErrorCorrection>().unwrap(), ErrorCorrection::Low);
        assert_eq!("M".parse::<ErrorCorrection>().unwrap(), ErrorCorrection::Medium);
        assert_eq!("Quartile".parse::<ErrorCorrection>().unwrap(), ErrorCorrection::Quartile);
        assert_eq!("h".parse::<ErrorCorrection>().unwrap(), ErrorCorrection::High);

        let err = "ultra".parse::<ErrorCorrection>().unwrap_err();
        assert_eq!(err, QrAdapterError::unknown_error_correction("ultra"));
        assert!(err.to_string().contains("ultra"));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for level in [
            ErrorCorrection::Low,
            ErrorCorrection::Medium,
            ErrorCorrection::Quartile,
            ErrorCorrection::High,
        ] {
            assert_eq!(level.to_string().parse::<ErrorCorrection>().unwrap(), level);
        }
    }
}
