//! Type definitions for `blend_core`.
//!
//! Inputs, outputs and catalog records shared by the blend engine, the
//! vessel calculator and the container catalog.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ID newtypes
// ---------------------------------------------------------------------------

macro_rules! string_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

string_id!(ComponentId);
string_id!(ContainerId);

// ---------------------------------------------------------------------------
// Blend inputs and outputs
// ---------------------------------------------------------------------------

/// One fragrance or scent in a requested blend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScentComponent {
    pub id: ComponentId,
    /// Display label; also what the preference hint is matched against.
    pub name: String,
}

impl ScentComponent {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ComponentId(id.into()),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlendProportion {
    pub id: ComponentId,
    pub name: String,
    /// Whole percent. Always at least 1 for a component present in the blend.
    pub proportion_percent: u32,
}

/// Grams of one component in a batch of known weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentWeight {
    pub id: ComponentId,
    pub name: String,
    pub proportion_percent: u32,
    pub weight_g: f64,
}

/// Product the blend is destined for. Unrecognized names map to `Generic`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    Candle,
    WaxMelt,
    Soap,
    RoomSpray,
    ReedDiffuser,
    Generic,
}

impl ProductType {
    /// Lenient parse used for free-form caller input.
    pub fn from_hint(raw: &str) -> Self {
        let normalized: String = raw
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == '-' || c == ' ' { '_' } else { c })
            .collect();
        match normalized.as_str() {
            "candle" | "candles" | "container_candle" => Self::Candle,
            "wax_melt" | "wax_melts" | "melt" | "melts" => Self::WaxMelt,
            "soap" | "soaps" => Self::Soap,
            "room_spray" | "spray" => Self::RoomSpray,
            "reed_diffuser" | "diffuser" => Self::ReedDiffuser,
            _ => Self::Generic,
        }
    }

    /// Typical fragrance load for this product, in percent by weight.
    pub fn typical_fragrance_load_percent(self) -> f64 {
        match self {
            Self::Candle | Self::Generic => 10.0,
            Self::WaxMelt => 12.0,
            Self::Soap => 3.0,
            Self::RoomSpray => 8.0,
            Self::ReedDiffuser => 25.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerDef {
    pub id: ContainerId,
    pub name: String,
    pub capacity_oz: f64,
    /// Informational only; does not affect any calculation.
    pub material: String,
}

/// Capacities up to and including `max_capacity_oz` burn best with `wick`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WickBracket {
    pub max_capacity_oz: f64,
    pub wick: String,
}

/// Physical and tuning constants shared by every calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConstants {
    /// Specific gravity of container wax (soy and paraffin blends sit near 0.86).
    pub wax_density_g_per_ml: f64,
    pub ml_per_fl_oz: f64,
    pub default_fragrance_load_percent: f64,
    /// Percentage points added or removed per bias cue.
    pub bias_step_percent: u32,
    /// Smallest share a component present in a blend may hold.
    pub min_proportion_percent: u32,
}

impl CatalogConstants {
    /// Grams of fill (wax plus fragrance) per fluid ounce of vessel capacity.
    pub fn fill_grams_per_oz(&self) -> f64 {
        self.ml_per_fl_oz * self.wax_density_g_per_ml
    }
}

impl Default for CatalogConstants {
    fn default() -> Self {
        Self {
            wax_density_g_per_ml: 0.86,
            ml_per_fl_oz: 29.5735,
            default_fragrance_load_percent: 10.0,
            bias_step_percent: 5,
            min_proportion_percent: 1,
        }
    }
}

// ---------------------------------------------------------------------------
// Vessel calculation output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaxCalculation {
    /// Set when the capacity was resolved from the catalog.
    pub container_id: Option<ContainerId>,
    pub container_name: Option<String>,
    pub capacity_oz: f64,
    pub fragrance_load_percent: f64,
    /// Total fill weight: wax plus fragrance oil.
    pub total_wax_weight_g: f64,
    pub fragrance_weight_g: f64,
    /// `total_wax_weight_g - fragrance_weight_g`.
    pub net_wax_weight_g: f64,
    pub recommended_wick: String,
}
