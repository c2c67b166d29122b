//! Tool-call surface for the chat assistant.
//!
//! Arguments arrive as JSON produced by a language model, so they are checked
//! against the tool schema ranges before reaching the engine.

use blend_core::{
    calculate_wax_for_vessel, list_containers, BlendEngine, BlendProportion, BlendSettings,
    Catalog, ContainerDef, InvalidInputError, ScentComponent, WaxCalculation, MAX_COMPONENTS,
    MIN_COMPONENTS,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub const TOOL_NAMES: &[&str] = &[
    "calculate_blend_proportions",
    "calculate_wax_for_vessel",
    "list_containers",
];

pub const MIN_CAPACITY_OZ: f64 = 1.0;
pub const MAX_CAPACITY_OZ: f64 = 32.0;
pub const MIN_LOAD_PERCENT: f64 = 5.0;
pub const MAX_LOAD_PERCENT: f64 = 15.0;

pub const CONTAINER_NOT_FOUND: &str = "container not found, try list_containers";

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("unknown tool '{0}'")]
    UnknownTool(String),
    #[error("invalid arguments: {0}")]
    Arguments(#[from] serde_json::Error),
    #[error("{0}")]
    Schema(String),
    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlendToolArgs {
    pub components: Vec<ScentComponent>,
    #[serde(default)]
    pub preference_hint: Option<String>,
    #[serde(default)]
    pub product_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WaxToolArgs {
    #[serde(default)]
    pub container_id: Option<String>,
    #[serde(default)]
    pub capacity_oz: Option<f64>,
    #[serde(default)]
    pub fragrance_load_percent: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListToolArgs {
    #[serde(default)]
    pub capacity_oz: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct BlendToolResult {
    pub proportions: Vec<BlendProportion>,
}

/// `found: false` carries a message instead of weights; never read it as zero grams.
#[derive(Debug, Serialize)]
pub struct WaxToolResult {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    #[serde(flatten)]
    pub calculation: Option<WaxCalculation>,
}

#[derive(Debug, Serialize)]
pub struct ListToolResult {
    pub containers: Vec<ContainerDef>,
}

/// Runs the named tool against `catalog` and returns its JSON result.
pub fn dispatch(catalog: &Catalog, name: &str, args: Value) -> Result<Value, ToolError> {
    let args = if args.is_null() {
        Value::Object(serde_json::Map::new())
    } else {
        args
    };
    let result = match name {
        "calculate_blend_proportions" => {
            serde_json::to_value(blend_tool(catalog, &serde_json::from_value(args)?)?)?
        }
        "calculate_wax_for_vessel" => {
            serde_json::to_value(wax_tool(catalog, &serde_json::from_value(args)?)?)?
        }
        "list_containers" => {
            serde_json::to_value(list_tool(catalog, &serde_json::from_value(args)?)?)?
        }
        other => return Err(ToolError::UnknownTool(other.to_string())),
    };
    Ok(result)
}

pub fn blend_tool(catalog: &Catalog, args: &BlendToolArgs) -> Result<BlendToolResult, ToolError> {
    let count = args.components.len();
    if !(MIN_COMPONENTS..=MAX_COMPONENTS).contains(&count) {
        return Err(ToolError::Schema(format!(
            "components must hold {MIN_COMPONENTS} to {MAX_COMPONENTS} entries, got {count}"
        )));
    }
    let engine = BlendEngine::with_settings(BlendSettings::from(catalog.constants()));
    let proportions = engine.calculate(
        &args.components,
        args.preference_hint.as_deref(),
        args.product_type.as_deref(),
    )?;
    Ok(BlendToolResult { proportions })
}

pub fn wax_tool(catalog: &Catalog, args: &WaxToolArgs) -> Result<WaxToolResult, ToolError> {
    if args.container_id.is_none() && args.capacity_oz.is_none() {
        return Err(ToolError::Schema("provide container_id or capacity_oz".to_string()));
    }
    if let Some(oz) = args.capacity_oz {
        check_range("capacity_oz", oz, MIN_CAPACITY_OZ, MAX_CAPACITY_OZ)?;
    }
    if let Some(load) = args.fragrance_load_percent {
        check_range("fragrance_load_percent", load, MIN_LOAD_PERCENT, MAX_LOAD_PERCENT)?;
    }
    let result = calculate_wax_for_vessel(
        catalog,
        args.container_id.as_deref(),
        args.capacity_oz,
        args.fragrance_load_percent,
    );
    Ok(WaxToolResult {
        found: result.is_some(),
        message: result.is_none().then_some(CONTAINER_NOT_FOUND),
        calculation: result,
    })
}

pub fn list_tool(catalog: &Catalog, args: &ListToolArgs) -> Result<ListToolResult, ToolError> {
    if let Some(oz) = args.capacity_oz {
        check_range("capacity_oz", oz, MIN_CAPACITY_OZ, MAX_CAPACITY_OZ)?;
    }
    Ok(ListToolResult {
        containers: list_containers(catalog, args.capacity_oz),
    })
}

fn check_range(field: &str, value: f64, min: f64, max: f64) -> Result<(), ToolError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ToolError::Schema(format!(
            "{field} must be between {min} and {max}, got {value}"
        )))
    }
}
