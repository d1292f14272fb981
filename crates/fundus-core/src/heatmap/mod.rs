//! Synthetic saliency heatmap: color mapping, saliency field, overlay compositing.

pub mod colormap;
pub mod overlay;
pub mod saliency;
pub mod scale;

pub use colormap::map_intensity;
pub use overlay::{
    blend_pixel, composite, flatten, flatten_for_export, render_overlay, BlendMode,
    OverlayComposite,
};
pub use saliency::{build_saliency, SaliencyField};
pub use scale::{GridCell, GridScale};
