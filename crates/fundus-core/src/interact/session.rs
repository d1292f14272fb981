use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::frame::{ColorFrame, ImageId};
use crate::heatmap::saliency::{build_saliency, SaliencyField};
use crate::pipeline::config::SaliencyConfig;

use super::hotspot::{inspect, Tooltip};
use super::viewport::{Point, Viewport};

/// Availability of the heatmap for the displayed image.
#[derive(Clone, Debug, PartialEq)]
pub enum HeatmapStatus {
    NoImage,
    /// A build for the active image has been requested but not applied.
    Pending,
    Ready,
    /// The build failed; the base image is still shown.
    Unavailable(String),
}

impl std::fmt::Display for HeatmapStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoImage => write!(f, "No image"),
            Self::Pending => write!(f, "Building heatmap"),
            Self::Ready => write!(f, "Ready"),
            Self::Unavailable(reason) => write!(f, "Heatmap unavailable: {reason}"),
        }
    }
}

/// Handle for one saliency build. Only the ticket of the latest
/// [`HeatmapSession::show_image`] call can apply its result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildTicket {
    pub image_id: ImageId,
    pub generation: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildOutcome {
    Applied,
    /// The ticket was superseded; the result was dropped.
    Stale,
    /// The build failed for the active image; heatmap marked unavailable.
    Failed,
}

/// Viewer state for one displayed image: its saliency grid, the viewport,
/// the report findings and the current tooltip.
///
/// All mutations go through named transitions. Grids are kept per image id
/// and only for the active image.
#[derive(Debug)]
pub struct HeatmapSession {
    active: Option<ImageId>,
    generation: u64,
    fields: HashMap<ImageId, Arc<SaliencyField>>,
    status: HeatmapStatus,
    viewport: Viewport,
    findings: Vec<String>,
    tooltip: Option<Tooltip>,
}

impl Default for HeatmapSession {
    fn default() -> Self {
        Self {
            active: None,
            generation: 0,
            fields: HashMap::new(),
            status: HeatmapStatus::NoImage,
            viewport: Viewport::default(),
            findings: Vec::new(),
            tooltip: None,
        }
    }
}

impl HeatmapSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `id` the displayed image and return the ticket its build must carry.
    ///
    /// Switching images resets the viewport and tooltip, drops other images'
    /// grids and invalidates every earlier ticket. Re-showing the active
    /// image keeps its state.
    pub fn show_image(&mut self, id: ImageId) -> BuildTicket {
        if self.active == Some(id) {
            return self.ticket_for(id);
        }

        self.generation += 1;
        self.active = Some(id);
        self.fields.retain(|k, _| *k == id);
        self.viewport.reset();
        self.tooltip = None;
        self.status = if self.fields.contains_key(&id) {
            HeatmapStatus::Ready
        } else {
            HeatmapStatus::Pending
        };
        debug!(image = %id, generation = self.generation, "Active image changed");
        self.ticket_for(id)
    }

    /// Forget the displayed image entirely.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.active = None;
        self.fields.clear();
        self.viewport.reset();
        self.tooltip = None;
        self.status = HeatmapStatus::NoImage;
    }

    fn ticket_for(&self, id: ImageId) -> BuildTicket {
        BuildTicket {
            image_id: id,
            generation: self.generation,
        }
    }

    pub fn active_image(&self) -> Option<ImageId> {
        self.active
    }

    pub fn current_ticket(&self) -> Option<BuildTicket> {
        self.active.map(|id| self.ticket_for(id))
    }

    pub fn is_current(&self, ticket: &BuildTicket) -> bool {
        self.current_ticket() == Some(*ticket)
    }

    /// Apply a finished build. Results for superseded tickets are discarded.
    pub fn complete_build(
        &mut self,
        ticket: BuildTicket,
        result: Result<SaliencyField>,
    ) -> BuildOutcome {
        if !self.is_current(&ticket) {
            debug!(
                image = %ticket.image_id,
                generation = ticket.generation,
                "Discarding stale saliency build"
            );
            return BuildOutcome::Stale;
        }

        match result {
            Ok(field) => {
                info!(
                    image = %ticket.image_id,
                    hot_cells = field.hot_cell_count(),
                    "Saliency field ready"
                );
                self.fields.insert(ticket.image_id, Arc::new(field));
                self.status = HeatmapStatus::Ready;
                BuildOutcome::Applied
            }
            Err(e) => {
                warn!(image = %ticket.image_id, error = %e, "Saliency build failed");
                self.fields.remove(&ticket.image_id);
                self.tooltip = None;
                self.status = HeatmapStatus::Unavailable(e.to_string());
                BuildOutcome::Failed
            }
        }
    }

    /// Mark the heatmap of the active image unavailable without a build result,
    /// e.g. when the image itself failed to decode.
    pub fn mark_unavailable(&mut self, ticket: BuildTicket, reason: impl Into<String>) -> bool {
        if !self.is_current(&ticket) {
            return false;
        }
        self.fields.remove(&ticket.image_id);
        self.tooltip = None;
        self.status = HeatmapStatus::Unavailable(reason.into());
        true
    }

    /// Show `id` and build its grid synchronously, reusing an existing grid
    /// for the same image.
    pub fn build_saliency(
        &mut self,
        id: ImageId,
        frame: &ColorFrame,
        config: &SaliencyConfig,
    ) -> Result<Arc<SaliencyField>> {
        let ticket = self.show_image(id);
        if let Some(field) = self.fields.get(&id) {
            return Ok(Arc::clone(field));
        }
        match build_saliency(frame, config) {
            Ok(field) => {
                let field = Arc::new(field);
                self.fields.insert(id, Arc::clone(&field));
                self.status = HeatmapStatus::Ready;
                debug!(image = %id, generation = ticket.generation, "Saliency built in place");
                Ok(field)
            }
            Err(e) => {
                self.status = HeatmapStatus::Unavailable(e.to_string());
                Err(e)
            }
        }
    }

    /// Grid of the active image, if built.
    pub fn field(&self) -> Option<&Arc<SaliencyField>> {
        self.active.and_then(|id| self.fields.get(&id))
    }

    pub fn status(&self) -> &HeatmapStatus {
        &self.status
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn findings(&self) -> &[String] {
        &self.findings
    }

    pub fn set_findings(&mut self, findings: Vec<String>) {
        self.findings = findings;
        self.tooltip = None;
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    pub fn hide_tooltip(&mut self) {
        self.tooltip = None;
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    pub fn reset_view(&mut self) {
        self.viewport.reset();
        self.tooltip = None;
    }

    pub fn pan_start(&mut self, pointer: Point) -> bool {
        let started = self.viewport.pan_start(pointer);
        if started {
            self.tooltip = None;
        }
        started
    }

    pub fn pan_move(&mut self, pointer: Point) -> bool {
        let moved = self.viewport.pan_move(pointer);
        if moved {
            self.tooltip = None;
        }
        moved
    }

    pub fn pan_end(&mut self) {
        self.viewport.pan_end();
    }

    /// Tooltip for the pointer at `screen`, relative to a view rectangle of
    /// `(view_w, view_h)`. Hidden while panning, outside the grid, over cold
    /// cells, and while no grid is available.
    pub fn inspect_hotspot(&mut self, screen: Point, view_w: f32, view_h: f32) -> Option<Tooltip> {
        self.tooltip = self.compute_tooltip(screen, view_w, view_h);
        self.tooltip.clone()
    }

    fn compute_tooltip(&self, screen: Point, view_w: f32, view_h: f32) -> Option<Tooltip> {
        if self.viewport.is_panning() {
            return None;
        }
        let field = self.field()?;
        let cell = self
            .viewport
            .grid_cell(screen, view_w, view_h, field.grid_size())?;
        let hotspot = inspect(cell, field, &self.findings)?;
        Some(Tooltip::at(screen, &hotspot))
    }
}
