//! Interactive inspection: viewport transform, hotspot labels, session state.

pub mod hotspot;
pub mod session;
pub mod viewport;

pub use hotspot::{classify, inspect, Hotspot, HotspotLabel, Tooltip};
pub use session::{BuildOutcome, BuildTicket, HeatmapSession, HeatmapStatus};
pub use viewport::{Point, Viewport, ViewportMode};
