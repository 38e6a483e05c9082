//! OCR provider trait and the placeholder provider.

use crate::error::OcrError;

use super::OcrText;

/// Message returned when no OCR backend is set up.
pub const OCR_NOT_CONFIGURED: &str =
    "OCR not configured. Please enter transaction details manually.";

/// Something that can read text out of a receipt image.
pub trait OcrProvider {
    /// Recognize text in an encoded image (JPEG, PNG, ...).
    fn recognize(&self, image: &[u8]) -> Result<OcrText, OcrError>;

    /// Provider name, for logs.
    fn name(&self) -> &str;
}

/// Provider used until a real OCR backend is wired in; always fails so the
/// app falls back to manual entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredOcr;

impl OcrProvider for UnconfiguredOcr {
    fn recognize(&self, _image: &[u8]) -> Result<OcrText, OcrError> {
        Err(OcrError::NotConfigured(OCR_NOT_CONFIGURED.to_string()))
    }

    fn name(&self) -> &str {
        "unconfigured"
    }
}

impl<P: OcrProvider + ?Sized> OcrProvider for &P {
    fn recognize(&self, image: &[u8]) -> Result<OcrText, OcrError> {
        (**self).recognize(image)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<P: OcrProvider + ?Sized> OcrProvider for Box<P> {
    fn recognize(&self, image: &[u8]) -> Result<OcrText, OcrError> {
        (**self).recognize(image)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
