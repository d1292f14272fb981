pub mod consts;
pub mod error;
pub mod filters;
pub mod frame;
pub mod heatmap;
pub mod interact;
pub mod io;
pub mod pipeline;
pub mod preprocess;
pub mod report;
