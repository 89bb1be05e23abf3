use serde::{Deserialize, Serialize};
use uuid::Uuid;

use presslane_catalog::Sides;

/// The trim size the customer picked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SizeSelection {
    /// One of the size group's named presets, e.g. "8.5x11".
    Preset { name: String },
    /// A custom trim size, only valid when the size group allows it.
    Custom { width_in: f64, height_in: f64 },
}

/// Everything the customer chose in the product configurator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSelections {
    pub quantity: u32,
    pub size: SizeSelection,
    pub paper_stock_id: Uuid,
    /// Coating code offered by the chosen stock. `None` is only valid for
    /// stocks with no coating options.
    pub coating_code: Option<String>,
    pub sides: Sides,
    #[serde(default)]
    pub addon_ids: Vec<Uuid>,
    /// Defaults to the product's default turnaround when omitted.
    pub turnaround_id: Option<Uuid>,
}
