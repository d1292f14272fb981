pub mod gaussian_blur;
pub mod levels;
pub mod resample;
