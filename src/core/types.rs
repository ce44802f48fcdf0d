//! Core types for stamping options, inputs and results.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::utils::{StamperError, StamperResult};

/// Output encoding for stamped images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Jpg,
    Webp,
}

impl OutputFormat {
    /// File extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Jpg => "jpg",
            Self::Webp => "webp",
        }
    }

    /// MIME type for this format
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Jpg => "image/jpeg",
            Self::Webp => "image/webp",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = StamperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jpg" | "jpeg" => Ok(Self::Jpg),
            "webp" => Ok(Self::Webp),
            other => Err(StamperError::invalid_options(format!(
                "Unsupported output format: {}. Use 'jpg' or 'webp'",
                other
            ))),
        }
    }
}

/// Caller-supplied stamping options.
///
/// Every field is optional; unspecified fields are resolved to their
/// documented defaults once per invocation by [`StampOptions::resolve`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StampOptions {
    /// Encoding quality (1-100), defaults to 75
    pub quality: Option<u8>,
    /// Output format, defaults to jpg
    pub format: Option<OutputFormat>,
    /// Stamp opacity (1-100), defaults to 50
    pub opacity: Option<u8>,
    /// Draw the original filename stem as a watermark label, defaults to true
    pub add_filename: Option<bool>,
}

/// Options after default resolution, immutable for the rest of the invocation.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedOptions {
    pub quality: u8,
    pub format: OutputFormat,
    pub opacity: u8,
    pub add_filename: bool,
}

impl StampOptions {
    /// Resolves unspecified fields to their defaults and validates ranges.
    pub fn resolve(&self) -> StamperResult<ResolvedOptions> {
        let resolved = ResolvedOptions {
            quality: self.quality.unwrap_or(75),
            format: self.format.unwrap_or(OutputFormat::Jpg),
            opacity: self.opacity.unwrap_or(50),
            add_filename: self.add_filename.unwrap_or(true),
        };

        if resolved.quality == 0 || resolved.quality > 100 {
            return Err(StamperError::invalid_options(format!(
                "Invalid quality value: {}. Must be between 1 and 100",
                resolved.quality
            )));
        }
        if resolved.opacity == 0 || resolved.opacity > 100 {
            return Err(StamperError::invalid_options(format!(
                "Invalid opacity value: {}. Must be between 1 and 100",
                resolved.opacity
            )));
        }

        Ok(resolved)
    }
}

/// A source image held in memory, as handed over by the caller.
#[derive(Debug, Clone)]
pub struct InputImage {
    /// Original file name including extension
    pub name: String,
    /// Raw encoded image bytes
    pub bytes: Vec<u8>,
}

impl InputImage {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// One successfully stamped image.
///
/// Ordering in the result sequence matches the input list; ownership passes
/// to the caller once returned.
#[derive(Debug, Clone)]
pub struct StampedImage {
    /// Output file name, `<stem>_stamped.<ext>`
    pub file_name: String,
    /// MIME type matching the resolved output format
    pub mime_type: &'static str,
    /// Encoded output bytes
    pub bytes: Vec<u8>,
    /// Name of the input file this result was produced from
    pub original_name: String,
}
