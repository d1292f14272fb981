mod common;

use approx::assert_abs_diff_eq;

use fundus_core::pipeline::config::PreprocessConfig;
use fundus_core::preprocess::{enhance, fitted_size};

use common::{ramp_frame, uniform_frame};

#[test]
fn test_fitted_size_limits_longest_side() {
    assert_eq!(fitted_size(3200, 2400, 1600), (1600, 1200));
    assert_eq!(fitted_size(1000, 4000, 1600), (400, 1600));
    assert_eq!(fitted_size(800, 600, 1600), (800, 600));
    assert_eq!(fitted_size(1600, 1600, 1600), (1600, 1600));
}

#[test]
fn test_fitted_size_never_collapses() {
    assert_eq!(fitted_size(10_000, 1, 100), (100, 1));
    // zero disables the limit
    assert_eq!(fitted_size(5000, 3000, 0), (5000, 3000));
}

#[test]
fn test_disabled_returns_input() {
    let frame = ramp_frame(40, 30);
    let config = PreprocessConfig {
        enabled: false,
        ..Default::default()
    };
    assert_eq!(enhance(&frame, &config), frame);
}

#[test]
fn test_large_image_is_downscaled() {
    let frame = ramp_frame(400, 200);
    let config = PreprocessConfig {
        max_dimension: 100,
        ..Default::default()
    };
    let out = enhance(&frame, &config);
    assert_eq!((out.width(), out.height()), (100, 50));
}

#[test]
fn test_default_adjustments_on_gray() {
    let frame = uniform_frame(16, 16, [0.2, 0.2, 0.2]);
    let out = enhance(&frame, &PreprocessConfig::default());
    // (0.2 - 0.5) * 1.25 + 0.5 = 0.125, then * 1.05; gray has nothing to saturate
    let expected = 0.125 * 1.05;
    for v in out.red.iter().chain(out.green.iter()).chain(out.blue.iter()) {
        assert_abs_diff_eq!(*v, expected, epsilon = 1e-5);
    }
}

#[test]
fn test_mid_gray_is_contrast_fixed_point() {
    let frame = uniform_frame(8, 8, [0.5, 0.5, 0.5]);
    let config = PreprocessConfig {
        brightness: 1.0,
        saturation: 1.0,
        ..Default::default()
    };
    let out = enhance(&frame, &config);
    for v in out.red.iter() {
        assert_abs_diff_eq!(*v, 0.5, epsilon = 1e-6);
    }
}

#[test]
fn test_zero_saturation_yields_luminance_gray() {
    let frame = uniform_frame(4, 4, [0.6, 0.4, 0.3]);
    let config = PreprocessConfig {
        contrast: 1.0,
        brightness: 1.0,
        saturation: 0.0,
        ..Default::default()
    };
    let out = enhance(&frame, &config);
    let lum = 0.2126 * 0.6 + 0.7152 * 0.4 + 0.0722 * 0.3;
    let [r, g, b] = out.pixel(2, 2);
    assert_abs_diff_eq!(r, lum, epsilon = 1e-5);
    assert_abs_diff_eq!(g, lum, epsilon = 1e-5);
    assert_abs_diff_eq!(b, lum, epsilon = 1e-5);
}

#[test]
fn test_output_stays_in_range() {
    let frame = ramp_frame(64, 48);
    let config = PreprocessConfig {
        contrast: 3.0,
        brightness: 1.8,
        saturation: 2.5,
        ..Default::default()
    };
    let out = enhance(&frame, &config);
    for v in out.red.iter().chain(out.green.iter()).chain(out.blue.iter()) {
        assert!((0.0..=1.0).contains(v));
    }
}
