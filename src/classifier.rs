//! Mock plant health model: average brightness decides the category.

use std::path::Path;

use image::DynamicImage;
use tracing::debug;

use crate::error::{ClassroomError, Result};
use crate::models::{Classification, HealthCategory};

pub const MODERATE_THRESHOLD: f64 = 100.0;
pub const HEALTHY_THRESHOLD: f64 = 150.0;

pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

pub fn classify_mean(mean: f64) -> HealthCategory {
    if mean < MODERATE_THRESHOLD {
        HealthCategory::Unhealthy
    } else if mean < HEALTHY_THRESHOLD {
        HealthCategory::Moderate
    } else {
        HealthCategory::Healthy
    }
}

pub fn advice(category: HealthCategory) -> &'static str {
    match category {
        HealthCategory::Unhealthy => {
            "식물이 충분한 햇빛을 받지 못하고 있을 수 있습니다. 빛을 더 쬐어주세요. 물 주기를 확인하세요."
        }
        HealthCategory::Moderate => "식물 상태가 보통입니다. 물과 영양분 공급을 꾸준히 유지하세요.",
        HealthCategory::Healthy => "식물이 건강합니다! 현재 조건을 유지하세요.",
        HealthCategory::AnalysisError => "이미지 처리 중 오류가 발생했습니다.",
    }
}

pub fn classify_samples(samples: &[u8]) -> Result<Classification> {
    if samples.is_empty() {
        return Err(ClassroomError::EmptyImage);
    }

    let total: u64 = samples.iter().map(|&s| u64::from(s)).sum();
    let mean = total as f64 / samples.len() as f64;
    let category = classify_mean(mean);
    debug!(samples = samples.len(), mean, %category, "classified image");

    Ok(Classification {
        category,
        mean: Some(mean),
        advice: advice(category).to_string(),
    })
}

/// Averages every channel of every pixel, alpha included.
///
/// Wider sample types are scaled to the 8-bit range keeping the image's own
/// channel layout.
pub fn classify_image(image: &DynamicImage) -> Result<Classification> {
    match image {
        DynamicImage::ImageLuma8(_)
        | DynamicImage::ImageLumaA8(_)
        | DynamicImage::ImageRgb8(_)
        | DynamicImage::ImageRgba8(_) => classify_samples(image.as_bytes()),
        other => match (other.color().channel_count(), other.color().has_alpha()) {
            (1, _) => classify_samples(other.to_luma8().as_raw()),
            (2, _) => classify_samples(other.to_luma_alpha8().as_raw()),
            (_, false) => classify_samples(other.to_rgb8().as_raw()),
            (_, true) => classify_samples(other.to_rgba8().as_raw()),
        },
    }
}

pub fn classify_bytes(bytes: &[u8]) -> Result<Classification> {
    let image =
        image::load_from_memory(bytes).map_err(|err| ClassroomError::Decode(err.to_string()))?;
    classify_image(&image)
}

/// Never fails: problems become an `AnalysisError` result carrying the diagnostic.
pub fn analyze(bytes: &[u8]) -> Classification {
    classify_bytes(bytes).unwrap_or_else(|err| error_classification(&err))
}

pub fn error_classification(err: &ClassroomError) -> Classification {
    Classification {
        category: HealthCategory::AnalysisError,
        mean: None,
        advice: format!("{} ({err})", advice(HealthCategory::AnalysisError)),
    }
}

pub fn check_extension(path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if ACCEPTED_EXTENSIONS.contains(&extension.as_str()) {
        Ok(())
    } else {
        Err(ClassroomError::UnsupportedImage(extension))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{ImageBuffer, ImageFormat, Luma, Rgb, RgbImage};

    use super::*;

    fn uniform_png(value: u8) -> Vec<u8> {
        let image = RgbImage::from_pixel(4, 3, Rgb([value, value, value]));
        encode_png(DynamicImage::ImageRgb8(image))
    }

    #[test]
    fn thresholds_put_boundaries_in_upper_bucket() {
        assert_eq!(classify_mean(0.0), HealthCategory::Unhealthy);
        assert_eq!(classify_mean(99.9), HealthCategory::Unhealthy);
        assert_eq!(classify_mean(100.0), HealthCategory::Moderate);
        assert_eq!(classify_mean(149.9), HealthCategory::Moderate);
        assert_eq!(classify_mean(150.0), HealthCategory::Healthy);
        assert_eq!(classify_mean(255.0), HealthCategory::Healthy);
    }

    #[test]
    fn uniform_images_classify_by_value() {
        for (value, expected) in [
            (40, HealthCategory::Unhealthy),
            (100, HealthCategory::Moderate),
            (149, HealthCategory::Moderate),
            (150, HealthCategory::Healthy),
            (230, HealthCategory::Healthy),
        ] {
            let result = analyze(&uniform_png(value));
            assert_eq!(result.category, expected, "value {value}");
            assert_eq!(result.mean, Some(f64::from(value)));
            assert_eq!(result.advice, advice(expected));
        }
    }

    fn encode_png(image: DynamicImage) -> Vec<u8> {
        let mut bytes = Cursor::new(Vec::new());
        image.write_to(&mut bytes, ImageFormat::Png).unwrap();
        bytes.into_inner()
    }

    #[test]
    fn sixteen_bit_images_keep_their_channels() {
        let rgb: ImageBuffer<Rgb<u16>, Vec<u16>> =
            ImageBuffer::from_pixel(4, 3, Rgb([50 * 257, 50 * 257, 50 * 257]));
        let result = analyze(&encode_png(DynamicImage::ImageRgb16(rgb)));
        assert_eq!(result.category, HealthCategory::Unhealthy);
        assert_eq!(result.mean, Some(50.0));

        let gray: ImageBuffer<Luma<u16>, Vec<u16>> =
            ImageBuffer::from_pixel(4, 3, Luma([20 * 257]));
        let result = analyze(&encode_png(DynamicImage::ImageLuma16(gray)));
        assert_eq!(result.mean, Some(20.0));
    }

    #[test]
    fn mean_spans_all_channels() {
        // two RGB pixels
        let result = classify_samples(&[0, 100, 200, 50, 100, 150]).unwrap();
        assert_eq!(result.mean, Some(100.0));
        assert_eq!(result.category, HealthCategory::Moderate);
    }

    #[test]
    fn empty_samples_are_an_error() {
        assert!(matches!(
            classify_samples(&[]),
            Err(ClassroomError::EmptyImage)
        ));
    }

    #[test]
    fn corrupt_bytes_become_error_category() {
        let result = analyze(b"definitely not a png");
        assert_eq!(result.category, HealthCategory::AnalysisError);
        assert_eq!(result.mean, None);
        assert!(result.advice.contains("could not decode image"));
    }

    #[test]
    fn only_photo_extensions_are_accepted() {
        assert!(check_extension(Path::new("leaf.PNG")).is_ok());
        assert!(check_extension(Path::new("leaf.jpeg")).is_ok());
        assert!(matches!(
            check_extension(Path::new("leaf.gif")),
            Err(ClassroomError::UnsupportedImage(ext)) if ext == "gif"
        ));
        assert!(check_extension(Path::new("leaf")).is_err());
    }
}
