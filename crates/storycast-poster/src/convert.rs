use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;

/// Convert a `.webp` file to a sibling `.jpg` and return the new path.
///
/// The platform's photo-story endpoint does not accept webp, so the decoded
/// image is re-encoded as RGB JPEG next to the original. The converted path
/// is what gets uploaded and logged; the webp original is left in place.
pub fn webp_to_jpeg(path: &Path) -> Result<PathBuf> {
    let jpeg_path = path.with_extension("jpg");
    let img = image::open(path)?;
    img.to_rgb8()
        .save_with_format(&jpeg_path, image::ImageFormat::Jpeg)?;
    debug!(from = %path.display(), to = %jpeg_path.display(), "webp converted");
    Ok(jpeg_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_next_to_the_original() {
        let dir = tempfile::tempdir().expect("tempdir");
        let webp = dir.path().join("story1.webp");
        image::RgbImage::from_pixel(4, 4, image::Rgb([200, 40, 40]))
            .save_with_format(&webp, image::ImageFormat::WebP)
            .expect("write webp fixture");

        let jpeg = webp_to_jpeg(&webp).expect("convert");

        assert_eq!(jpeg, dir.path().join("story1.jpg"));
        let reopened = image::open(&jpeg).expect("reopen");
        assert_eq!(reopened.width(), 4);
        assert!(webp.exists());
    }

    #[test]
    fn unreadable_input_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let bogus = dir.path().join("broken.webp");
        std::fs::write(&bogus, b"not an image").expect("write");

        assert!(webp_to_jpeg(&bogus).is_err());
    }
}
