//! BOM data types.

use df_core::EntityId;
use df_model::{CrossSection, Material};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BomCategory {
    Duct,
    Fitting,
    Equipment,
}

/// One row of the BOM: identical parts counted together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub category: BomCategory,
    /// Fitting type or equipment kind; "duct" for straight duct.
    pub item: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<Material>,
    pub size: String,
    pub quantity: u32,
    /// Straight duct only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_length_ft: Option<f64>,
    #[serde(default)]
    pub auto_inserted: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extended_price: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum ExclusionReason {
    /// Never validated, or invalidated since.
    Unchecked,
    BlockingViolations { count: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exclusion {
    pub entity_id: EntityId,
    #[serde(flatten)]
    pub reason: ExclusionReason,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BomReport {
    pub line_items: Vec<LineItem>,
    pub excluded: Vec<Exclusion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_price: Option<f64>,
    /// SHA-256 over the line items; equal content gives equal fingerprints.
    pub fingerprint: String,
}

impl BomReport {
    pub fn total_duct_length_ft(&self) -> f64 {
        self.line_items
            .iter()
            .filter_map(|l| l.total_length_ft)
            .sum()
    }

    pub fn auto_inserted_count(&self) -> u32 {
        self.line_items.iter().map(|l| l.auto_inserted).sum()
    }
}

/// Unit prices. Straight duct is priced per foot, everything else per piece.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceBook {
    #[serde(default)]
    pub entries: Vec<PriceEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceEntry {
    pub category: BomCategory,
    pub item: String,
    /// `None` prices every material.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<Material>,
    pub unit_price: f64,
}

impl PriceBook {
    /// Most specific entry wins: an exact material match before a
    /// material-agnostic one.
    pub fn lookup(
        &self,
        category: BomCategory,
        item: &str,
        material: Option<Material>,
    ) -> Option<f64> {
        let matching = |e: &&PriceEntry| e.category == category && e.item == item;
        self.entries
            .iter()
            .filter(matching)
            .find(|e| e.material.is_some() && e.material == material)
            .or_else(|| {
                self.entries
                    .iter()
                    .filter(matching)
                    .find(|e| e.material.is_none())
            })
            .map(|e| e.unit_price)
    }
}

/// Display size used to group identical parts, e.g. `12" round`, `16x8`.
pub fn size_label(section: &CrossSection) -> String {
    match *section {
        CrossSection::Round { diameter_in } => format!("{}\" round", trim(diameter_in)),
        CrossSection::Rectangular {
            width_in,
            height_in,
        } => format!("{}x{}", trim(width_in), trim(height_in)),
    }
}

fn trim(value: f64) -> String {
    let s = format!("{value:.2}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
