//! QR code rendering to PNG data URLs

use base64::{Engine, engine::general_purpose::STANDARD};
use image::{DynamicImage, ImageFormat, Luma};
use medcard_core::CardError;
use qrcode::QrCode;
use std::io::Cursor;

const DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Encode `text` as a QR code and return it as a `data:image/png;base64,` URL
pub fn to_data_url(text: &str) -> Result<String, CardError> {
    let code = QrCode::new(text.as_bytes()).map_err(|e| CardError::Render(e.to_string()))?;
    let image = code.render::<Luma<u8>>().build();

    let mut png = Vec::new();
    DynamicImage::ImageLuma8(image)
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| CardError::Render(e.to_string()))?;

    Ok(format!("{}{}", DATA_URL_PREFIX, STANDARD.encode(png)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    #[test]
    fn renders_png_data_url() {
        let url = to_data_url("http://localhost:5173/medical/abc").unwrap();
        let payload = url.strip_prefix(DATA_URL_PREFIX).expect("missing prefix");
        let bytes = STANDARD.decode(payload).unwrap();
        assert!(bytes.starts_with(PNG_MAGIC));
    }

    #[test]
    fn oversized_input_fails() {
        // Larger than the capacity of a version 40 code
        let text = "x".repeat(8000);
        let err = to_data_url(&text).unwrap_err();
        assert!(matches!(err, CardError::Render(_)));
    }
}
