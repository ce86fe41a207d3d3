//! Image ingestion: raw file bytes to an oriented RGB bitmap.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::DynamicImage;
use image::ImageReader;

use super::{DecodeError, DecodedImage, Orientation};

/// Decode an image from raw file bytes, applying EXIF orientation correction.
///
/// The container format is guessed from the content, so any format enabled
/// in the `image` crate features (JPEG, PNG) is accepted.
///
/// # Errors
///
/// Returns `DecodeError::EmptyInput` for an empty slice,
/// `DecodeError::InvalidFormat` if the format is not recognized and
/// `DecodeError::CorruptedFile` if decoding fails part way.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::EmptyInput);
    }

    let orientation = extract_orientation(bytes);
    let img = read_dynamic(bytes)?;
    let rgb_img = apply_orientation(img, orientation).into_rgb8();

    tracing::debug!(
        width = rgb_img.width(),
        height = rgb_img.height(),
        ?orientation,
        "Decoded image"
    );
    Ok(DecodedImage::from_rgb_image(rgb_img))
}

fn read_dynamic(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))
}

fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
