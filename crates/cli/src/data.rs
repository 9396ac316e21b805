//! Inline data-URL encoding for the company logo and seal.
//!
//! Images live inside the company-config slot as `data:` URLs so the
//! whole configuration stays one JSON payload.

use std::path::Path;

use base64::Engine as _;

use crate::error::{AppError, Result};

/// Reads an image file and encodes it as an inline data-URL.
pub fn image_data_url(path: &Path) -> Result<String> {
    let media_type = match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        other => {
            return Err(AppError::Input(format!(
                "unsupported image type: {}",
                other.unwrap_or("none")
            )));
        }
    };

    let bytes = std::fs::read(path)?;
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    Ok(format!("data:{media_type};base64,{encoded}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unknown_extensions() {
        assert!(image_data_url(Path::new("seal.bmp")).is_err());
        assert!(image_data_url(Path::new("seal")).is_err());
    }
}
