mod common;

use ndarray::Array2;

use fundus_core::error::FundusError;
use fundus_core::frame::ColorFrame;
use fundus_core::heatmap::{build_saliency, map_intensity, GridCell, SaliencyField};
use fundus_core::pipeline::config::SaliencyConfig;

use common::{frame_with_patch, ramp_frame, uniform_frame};

#[test]
fn test_uniform_image_has_zero_intensity() {
    let frame = uniform_frame(100, 80, [0.3, 0.6, 0.2]);
    let field = build_saliency(&frame, &SaliencyConfig::default()).unwrap();
    assert_eq!(field.grid_size(), (64, 64));
    for v in field.intensity_grid().iter() {
        assert!(v.abs() < 1e-6, "uniform image should have no saliency, got {v}");
    }
    assert_eq!(field.hot_cell_count(), 0);
}

#[test]
fn test_bright_patch_is_hot() {
    // 64x64 source on a 64x64 grid: one pixel per cell.
    let frame = frame_with_patch(64, 64, 16, [1.0, 1.0, 1.0]);
    let field = build_saliency(&frame, &SaliencyConfig::default()).unwrap();

    assert_eq!(field.color_at(GridCell::new(0, 0)), Some([255, 255, 255]));
    assert_eq!(field.color_at(GridCell::new(40, 40)), Some([128, 128, 128]));

    // mean = (256 * 255 + 3840 * 128) / 4096 ~= 135.94; white cells are
    // ~206 away from it, which saturates the 110 scale.
    let hot = field.intensity_at(GridCell::new(5, 5)).unwrap();
    assert!((hot - 1.0).abs() < 1e-6);

    let cold = field.intensity_at(GridCell::new(40, 40)).unwrap();
    let expected = (3.0f32).sqrt() * (135.9375 - 128.0) / 110.0;
    assert!((cold - expected).abs() < 1e-3, "got {cold}, expected {expected}");

    assert_eq!(field.hot_cell_count(), 16 * 16);
}

#[test]
fn test_mean_color_is_grid_average() {
    let frame = frame_with_patch(64, 64, 32, [0.0, 0.0, 0.0]);
    let field = build_saliency(&frame, &SaliencyConfig::default()).unwrap();
    // a quarter of the cells are black, the rest 128
    let expected = 128.0 * 0.75;
    for c in field.mean_color() {
        assert!((c - expected).abs() < 1e-3);
    }
}

#[test]
fn test_downsampling_averages_source_pixels() {
    // 128x128 checkerboard of black/white averages to mid gray per cell.
    let data = Array2::from_shape_fn((128, 128), |(r, c)| if (r + c) % 2 == 0 { 1.0 } else { 0.0 });
    let frame = ColorFrame::new(data.clone(), data.clone(), data);
    let field = build_saliency(&frame, &SaliencyConfig::default()).unwrap();
    for px in field.color_grid().iter() {
        assert_eq!(*px, [128, 128, 128]);
    }
}

#[test]
fn test_build_is_deterministic() {
    let frame = ramp_frame(300, 200);
    let config = SaliencyConfig::default();
    let a = build_saliency(&frame, &config).unwrap();
    let b = build_saliency(&frame, &config).unwrap();
    assert_eq!(a.intensity_grid(), b.intensity_grid());
    assert_eq!(a.color_grid(), b.color_grid());
    assert_eq!(a.heat_image(), b.heat_image());
}

#[test]
fn test_intensities_are_clamped() {
    let frame = ramp_frame(90, 70);
    let config = SaliencyConfig {
        intensity_scale: 5.0,
        ..Default::default()
    };
    let field = build_saliency(&frame, &config).unwrap();
    for &v in field.intensity_grid().iter() {
        assert!((0.0..=1.0).contains(&v));
    }
}

#[test]
fn test_heat_image_matches_colormap() {
    let frame = ramp_frame(120, 120);
    let config = SaliencyConfig::default();
    let field = build_saliency(&frame, &config).unwrap();
    let heat = field.heat_image();
    assert_eq!(heat.dimensions(), (64, 64));
    for (x, y, px) in heat.enumerate_pixels() {
        let v = field.intensity_grid()[[y as usize, x as usize]];
        let rgb = map_intensity(v);
        assert_eq!(&px.0[..3], &rgb.0[..]);
        assert_eq!(px.0[3], 180);
    }
}

#[test]
fn test_custom_grid_size() {
    let frame = ramp_frame(50, 40);
    let config = SaliencyConfig {
        grid_width: 16,
        grid_height: 8,
        ..Default::default()
    };
    let field = build_saliency(&frame, &config).unwrap();
    assert_eq!(field.grid_size(), (16, 8));
    assert_eq!(field.intensity_grid().dim(), (8, 16));
    assert!(field.intensity_at(GridCell::new(15, 7)).is_some());
    assert!(field.intensity_at(GridCell::new(16, 0)).is_none());
    assert!(field.intensity_at(GridCell::new(0, 8)).is_none());
}

#[test]
fn test_small_source_is_upsampled_to_grid() {
    let frame = frame_with_patch(8, 8, 4, [1.0, 0.0, 0.0]);
    let field = build_saliency(&frame, &SaliencyConfig::default()).unwrap();
    assert_eq!(field.grid_size(), (64, 64));
    assert_eq!(field.color_at(GridCell::new(0, 0)), Some([255, 0, 0]));
    assert_eq!(field.color_at(GridCell::new(63, 63)), Some([128, 128, 128]));
}

#[test]
fn test_empty_image_is_decode_error() {
    let frame = uniform_frame(0, 0, [0.0, 0.0, 0.0]);
    let err = build_saliency(&frame, &SaliencyConfig::default()).unwrap_err();
    assert!(matches!(err, FundusError::ImageDecode(_)), "got {err:?}");
}

#[test]
fn test_invalid_config_is_rejected() {
    let frame = uniform_frame(10, 10, [0.5, 0.5, 0.5]);
    let config = SaliencyConfig {
        grid_width: 0,
        ..Default::default()
    };
    assert!(matches!(
        build_saliency(&frame, &config),
        Err(FundusError::Config(_))
    ));
}

#[test]
fn test_from_grids_clamps_and_checks_shape() {
    let field = SaliencyField::from_grids(
        Array2::from_elem((2, 2), 1.5),
        Array2::from_elem((2, 2), [0u8, 0, 0]),
        180,
    )
    .unwrap();
    assert!(field.intensity_grid().iter().all(|&v| v == 1.0));

    let mismatch = SaliencyField::from_grids(
        Array2::zeros((2, 2)),
        Array2::from_elem((3, 2), [0u8, 0, 0]),
        180,
    );
    assert!(mismatch.is_err());
}

#[test]
fn test_histogram_counts_every_cell() {
    let frame = frame_with_patch(64, 64, 16, [1.0, 1.0, 1.0]);
    let field = build_saliency(&frame, &SaliencyConfig::default()).unwrap();
    let hist = field.histogram(10);
    assert_eq!(hist.iter().sum::<usize>(), 64 * 64);
    assert_eq!(hist[9], 256);
}
