use thiserror::Error;

use crate::{ComponentId, ContainerId};

/// Caller handed the engine something it cannot blend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInputError {
    #[error("a blend needs 1 to 4 components, got {0}")]
    ComponentCount(usize),
    #[error("component id '{0}' appears more than once")]
    DuplicateComponentId(ComponentId),
    #[error("proportions sum to {0}%, expected 100%")]
    ProportionSum(u32),
    #[error("component '{0}' has a 0% proportion")]
    ZeroProportion(ComponentId),
}

/// Authoring mistake in catalog content.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("container id '{0}' is defined more than once")]
    DuplicateContainerId(ContainerId),
    #[error("container '{id}' has non-positive capacity: {capacity_oz}")]
    NonPositiveCapacity { id: ContainerId, capacity_oz: f64 },
    #[error("container with empty id")]
    EmptyContainerId,
    #[error("wick table has no brackets")]
    EmptyWickTable,
    #[error("wick bracket {index} ({max_capacity_oz} oz) is not above the previous bracket")]
    WickBracketsNotAscending { index: usize, max_capacity_oz: f64 },
    #[error("wick bracket {0} has an empty label")]
    EmptyWickLabel(usize),
    #[error("constant '{name}' is out of range: {value}")]
    InvalidConstant { name: &'static str, value: f64 },
}
