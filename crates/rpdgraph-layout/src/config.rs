//! Layout tuning values.
//!
//! Every geometric constant of the layout lives here so integrations can restyle the diagram
//! without touching the algorithm. None of these values carry business meaning; in particular
//! the literature caps and the shade divisor are presentation choices.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeSize {
    pub width: f64,
    pub height: f64,
}

impl NodeSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub super_root_size: NodeSize,
    pub direction_size: NodeSize,
    pub discipline_size: NodeSize,
    pub section_size: NodeSize,
    pub software_size: NodeSize,
    pub literature_size: NodeSize,

    pub discipline_label_chars: usize,
    pub section_label_chars: usize,
    pub software_label_chars: usize,
    pub literature_label_chars: usize,
    pub direction_label_chars: usize,

    /// Total arc covered by sections, centered on "down".
    pub section_arc_span_deg: f64,
    pub section_min_radius: f64,
    pub section_base_radius: f64,
    pub section_radius_growth: f64,

    /// Distance from a section to the software anchored on it, along the outward direction.
    pub software_offset: f64,
    /// Perpendicular step between software nodes sharing an anchor section.
    pub software_spread: f64,
    /// Horizontal gap between the section arc and the column of general tools.
    pub software_column_gap: f64,
    pub software_row_spacing: f64,

    /// Main literature entries shown per discipline. Entries past the cap are dropped from the
    /// layout without an error.
    pub main_literature_cap: usize,
    /// Additional literature entries shown per discipline; the rest are dropped like main ones.
    pub additional_literature_cap: usize,
    /// Vertical gap between the lowest point of the section arc and the literature grid.
    pub literature_top_gap: f64,
    pub literature_column_spacing: f64,
    pub literature_row_spacing: f64,

    pub shade_count: usize,
    pub shade_divisor: f64,

    pub direction_row_y: f64,
    pub direction_spacing: f64,
    pub discipline_row_offset: f64,
    /// Minimum distance between neighbouring disciplines in multi mode.
    pub discipline_spacing: f64,
    /// Clearance kept between the branches of neighbouring disciplines.
    pub discipline_gap: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            super_root_size: NodeSize::new(220.0, 64.0),
            direction_size: NodeSize::new(240.0, 60.0),
            discipline_size: NodeSize::new(260.0, 84.0),
            section_size: NodeSize::new(200.0, 56.0),
            software_size: NodeSize::new(150.0, 40.0),
            literature_size: NodeSize::new(230.0, 48.0),

            discipline_label_chars: 60,
            section_label_chars: 48,
            software_label_chars: 28,
            literature_label_chars: 44,
            direction_label_chars: 40,

            section_arc_span_deg: 160.0,
            section_min_radius: 280.0,
            section_base_radius: 220.0,
            section_radius_growth: 24.0,

            software_offset: 170.0,
            software_spread: 70.0,
            software_column_gap: 420.0,
            software_row_spacing: 60.0,

            main_literature_cap: 6,
            additional_literature_cap: 5,
            literature_top_gap: 300.0,
            literature_column_spacing: 260.0,
            literature_row_spacing: 70.0,

            shade_count: 7,
            shade_divisor: 1.5,

            direction_row_y: 220.0,
            direction_spacing: 1400.0,
            discipline_row_offset: 260.0,
            discipline_spacing: 1300.0,
            discipline_gap: 120.0,
        }
    }
}

impl LayoutConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Loads a config file, picking the format from the extension (`.json`, `.yaml`, `.yml`).
    /// Keys missing from the file keep their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Self::from_json_str(&text),
            Some("yaml" | "yml") => Self::from_yaml_str(&text),
            _ => Err(Error::UnsupportedConfigFormat {
                path: path.display().to_string(),
            }),
        }
    }

    /// Radius of the section arc for `n` sections.
    pub fn section_radius(&self, n: usize) -> f64 {
        let grown = self.section_base_radius + n as f64 * self.section_radius_growth;
        grown.max(self.section_min_radius)
    }
}
