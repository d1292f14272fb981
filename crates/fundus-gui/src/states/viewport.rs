use fundus_core::interact::HeatmapStatus;

/// Which raster the viewport shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewTab {
    #[default]
    Original,
    Heatmap,
}

impl std::fmt::Display for ViewTab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Original => write!(f, "Original"),
            Self::Heatmap => write!(f, "Heatmap"),
        }
    }
}

impl ViewTab {
    /// Caption drawn over the viewport. The heatmap tab reports the build
    /// status until the heatmap is ready.
    pub fn caption(self, status: &HeatmapStatus) -> String {
        match (self, status) {
            (Self::Heatmap, HeatmapStatus::Pending | HeatmapStatus::Unavailable(_)) => {
                status.to_string()
            }
            _ => self.to_string(),
        }
    }
}

/// Viewport display state. Zoom and pan live in the heatmap session.
#[derive(Default)]
pub struct ViewportState {
    pub tab: ViewTab,
    pub original: Option<egui::TextureHandle>,
    /// Base image with the overlay flattened in.
    pub heatmap: Option<egui::TextureHandle>,
    /// Size of the displayed image in pixels.
    pub image_size: Option<[usize; 2]>,
}

impl ViewportState {
    /// Texture for the selected tab. The heatmap tab falls back to the
    /// original while the heatmap is unavailable.
    pub fn active_texture(&self) -> Option<&egui::TextureHandle> {
        match self.tab {
            ViewTab::Original => self.original.as_ref(),
            ViewTab::Heatmap => self.heatmap.as_ref().or(self.original.as_ref()),
        }
    }

    pub fn clear(&mut self) {
        self.original = None;
        self.heatmap = None;
        self.image_size = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heatmap_caption_follows_status() {
        let unavailable = HeatmapStatus::Unavailable("Image could not be decoded".into());
        assert_eq!(ViewTab::Heatmap.caption(&HeatmapStatus::Ready), "Heatmap");
        assert_eq!(ViewTab::Heatmap.caption(&HeatmapStatus::Pending), "Building heatmap");
        assert_eq!(
            ViewTab::Heatmap.caption(&unavailable),
            "Heatmap unavailable: Image could not be decoded"
        );
    }

    #[test]
    fn original_caption_ignores_status() {
        assert_eq!(ViewTab::Original.caption(&HeatmapStatus::Pending), "Original");
    }
}
