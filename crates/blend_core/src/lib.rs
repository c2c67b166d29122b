//! `blend_core`: fragrance blend proportions and vessel sizing.
//!
//! No IO, no network. Every operation is a pure function over its inputs and
//! an immutable [`Catalog`].

mod bias;
mod blend;
mod catalog;
mod error;
mod rounding;
mod types;
mod vessel;
mod weights;

#[cfg(any(test, feature = "test-support"))]
pub mod test_fixtures;

pub use bias::{infer_bias_from_hint, BiasInference, KeywordBias};
pub use blend::{
    calculate_blend_proportions, BlendEngine, BlendSettings, MAX_COMPONENTS, MIN_COMPONENTS,
};
pub use catalog::{list_containers, Catalog};
pub use error::{CatalogError, InvalidInputError};
pub use rounding::TOTAL_PERCENT;
pub use types::*;
pub use vessel::calculate_wax_for_vessel;
pub use weights::{blend_weights, validate_proportions};

#[cfg(test)]
mod tests;
