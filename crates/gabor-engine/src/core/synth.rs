use std::f64::consts::TAU;

use crate::{RasterImage, StimulusParams};

/// Renders a Gabor patch: a cosine grating under a Gaussian envelope.
///
/// Pixel coordinates are normalized so the patch spans roughly `[-1, 1]` on
/// both axes, rotated by the orientation, and evaluated as
///
/// ```text
/// gabor = cos(2π · frequency · x_θ) · exp(-(x_θ² + y_θ²) / (2σ²)) · contrast
/// value = floor((gabor + 1) / 2 · 255)
/// ```
///
/// The result is deterministic: equal parameters always produce identical
/// pixels.
///
/// # Example
///
/// ```
/// use gabor_engine::{Orientation, StimulusParams, synthesize};
///
/// let params = StimulusParams::new(9, Orientation::ZERO, 4.0, 0.35, 0.9).unwrap();
/// let image = synthesize(&params);
///
/// assert_eq!(image.len(), 81);
/// // The center sits at the peak of both the grating and the envelope.
/// assert_eq!(image.intensity(4, 4), Some(242));
/// ```
#[must_use]
pub fn synthesize(params: &StimulusParams) -> RasterImage {
    let size = params.size();
    let center = f64::from(size - 1) / 2.0;
    // A single-pixel patch has no extent to normalize against.
    let scale = if center > 0.0 { center } else { 1.0 };

    let theta = params.orientation().radians();
    let (sin, cos) = theta.sin_cos();
    let two_sigma_sq = 2.0 * params.sigma() * params.sigma();
    let angular_frequency = TAU * params.frequency();
    let contrast = params.contrast();

    let intensities = (0..size).flat_map(move |y| {
        let py = (f64::from(y) - center) / scale;
        (0..size).map(move |x| {
            let px = (f64::from(x) - center) / scale;
            let x_theta = px * cos + py * sin;
            let y_theta = -px * sin + py * cos;

            let grating = (angular_frequency * x_theta).cos();
            let envelope = (-(x_theta * x_theta + y_theta * y_theta) / two_sigma_sq).exp();
            quantize(grating * envelope * contrast)
        })
    });

    RasterImage::from_intensities(size, intensities)
}

/// Maps a value in `[-1, 1]` onto `0..=255`.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn quantize(value: f64) -> u8 {
    ((value + 1.0) / 2.0 * 255.0).floor().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::*;
    use crate::{DEFAULT_CONTRAST, DEFAULT_SIGMA, Orientation};

    fn params(size: u32, theta: f64, frequency: f64, contrast: f64) -> StimulusParams {
        StimulusParams::new(
            size,
            Orientation::from_radians(theta).unwrap(),
            frequency,
            DEFAULT_SIGMA,
            contrast,
        )
        .unwrap()
    }

    #[test]
    fn test_buffer_has_size_squared_pixels() {
        for size in [1, 2, 7, 16, 33, 120] {
            let image = synthesize(&params(size, 0.7, 4.2, DEFAULT_CONTRAST));
            assert_eq!(image.size(), size);
            assert_eq!(image.len(), (size * size) as usize);
            assert_eq!(image.as_rgba_bytes().len(), (size * size * 4) as usize);
        }
    }

    #[test]
    fn test_pixels_are_opaque_gray() {
        let image = synthesize(&params(24, 1.1, 5.0, 1.0));
        for [r, g, b, a] in image.pixels().iter().copied() {
            assert_eq!(r, g);
            assert_eq!(g, b);
            assert_eq!(a, 255);
        }
    }

    #[test]
    fn test_is_deterministic() {
        let p = params(48, 0.4, 4.6, DEFAULT_CONTRAST);
        assert_eq!(synthesize(&p), synthesize(&p));
    }

    #[test]
    fn test_center_pixel_depends_only_on_contrast() {
        for contrast in [0.0, 0.25, 0.5, 0.9, 1.0] {
            for theta in [0.0, 0.3, 1.2, 2.9] {
                let image = synthesize(&params(31, theta, 6.0, contrast));
                #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let expected = ((contrast + 1.0) / 2.0 * 255.0).floor() as u8;
                assert_eq!(image.intensity(15, 15), Some(expected));
            }
        }
    }

    #[test]
    fn test_zero_contrast_is_flat_gray() {
        let image = synthesize(&params(16, 0.9, 4.0, 0.0));
        assert!(image.intensities().all(|value| value == 127));
    }

    #[test]
    fn test_half_turn_rotation_is_identical() {
        for theta in [0.0, 0.5, 1.3, 2.2, 3.0] {
            let a = synthesize(&params(40, theta, 4.2, DEFAULT_CONTRAST));
            // Synthesize the rotated grating without normalizing the angle first.
            let b = synthesize_unnormalized(40, theta + PI, 4.2, DEFAULT_CONTRAST);
            let max_diff = a
                .intensities()
                .zip(b)
                .map(|(x, y)| x.abs_diff(y))
                .max()
                .unwrap();
            assert!(max_diff <= 1, "theta={theta} max_diff={max_diff}");
        }
    }

    #[test]
    fn test_orientation_changes_image() {
        let horizontal = synthesize(&params(32, 0.0, 4.0, DEFAULT_CONTRAST));
        let vertical = synthesize(&params(32, PI / 2.0, 4.0, DEFAULT_CONTRAST));
        assert_ne!(horizontal, vertical);
    }

    #[test]
    fn test_theta_zero_grating_varies_along_x_only() {
        // With theta = 0 the grating depends on x; the envelope is symmetric in y.
        let image = synthesize(&params(21, 0.0, 4.0, DEFAULT_CONTRAST));
        for x in 0..21 {
            assert_eq!(image.intensity(x, 3), image.intensity(x, 17));
        }
    }

    #[test]
    fn test_single_pixel_patch() {
        let image = synthesize(&params(1, 0.0, 4.0, 1.0));
        assert_eq!(image.intensity(0, 0), Some(255));
    }

    /// Evaluates the same formula with a raw angle, bypassing normalization.
    fn synthesize_unnormalized(size: u32, theta: f64, frequency: f64, contrast: f64) -> Vec<u8> {
        let center = f64::from(size - 1) / 2.0;
        let mut out = Vec::new();
        for y in 0..size {
            for x in 0..size {
                let px = (f64::from(x) - center) / center;
                let py = (f64::from(y) - center) / center;
                let x_theta = px * theta.cos() + py * theta.sin();
                let y_theta = -px * theta.sin() + py * theta.cos();
                let grating = (2.0 * PI * frequency * x_theta).cos();
                let envelope = (-(x_theta.powi(2) + y_theta.powi(2))
                    / (2.0 * DEFAULT_SIGMA * DEFAULT_SIGMA))
                    .exp();
                out.push(quantize(grating * envelope * contrast));
            }
        }
        out
    }
}
