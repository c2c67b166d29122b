//! Container catalog and wick table.
//!
//! A [`Catalog`] is immutable once built. The compiled-in table is available
//! process-wide through [`Catalog::builtin`]; content loaded from disk goes
//! through [`Catalog::new`], which rejects authoring mistakes.

use std::collections::HashSet;
use std::sync::LazyLock;

use serde::Serialize;

use crate::{CatalogConstants, CatalogError, ContainerDef, ContainerId, WickBracket};

/// Capacities within this distance are treated as equal.
const CAPACITY_EPSILON_OZ: f64 = 1e-6;

const BUILTIN_CONTENT_VERSION: &str = "builtin-1";

/// `(id, name, capacity_oz, material)`
const BUILTIN_CONTAINERS: &[(&str, &str, f64, &str)] = &[
    ("c-001", "3oz votive", 3.0, "glass"),
    ("c-002", "4oz travel tin", 4.0, "tin"),
    ("c-003", "8oz tumbler", 8.0, "glass"),
    ("c-004", "8oz tin", 8.0, "tin"),
    ("c-005", "6oz amber jar", 6.0, "glass"),
    ("c-006", "10oz ceramic cup", 10.0, "ceramic"),
    ("c-007", "12oz apothecary jar", 12.0, "glass"),
    ("c-008", "16oz double-wick jar", 16.0, "glass"),
];

/// `(max_capacity_oz, wick)`, ascending.
const BUILTIN_WICKS: &[(f64, &str)] = &[
    (4.0, "ECO 2"),
    (6.0, "ECO 4"),
    (8.0, "ECO 6"),
    (10.0, "ECO 8"),
    (12.0, "ECO 10"),
    (16.0, "ECO 14"),
    (32.0, "2x ECO 10"),
];

static BUILTIN: LazyLock<Catalog> = LazyLock::new(|| Catalog {
    content_version: BUILTIN_CONTENT_VERSION.to_string(),
    constants: CatalogConstants::default(),
    containers: builtin_containers(),
    wick_brackets: builtin_wick_brackets(),
});

pub(crate) fn builtin_containers() -> Vec<ContainerDef> {
    BUILTIN_CONTAINERS
        .iter()
        .map(|&(id, name, capacity_oz, material)| ContainerDef {
            id: ContainerId::from(id),
            name: name.to_string(),
            capacity_oz,
            material: material.to_string(),
        })
        .collect()
}

pub(crate) fn builtin_wick_brackets() -> Vec<WickBracket> {
    BUILTIN_WICKS
        .iter()
        .map(|&(max_capacity_oz, wick)| WickBracket {
            max_capacity_oz,
            wick: wick.to_string(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalog {
    content_version: String,
    constants: CatalogConstants,
    containers: Vec<ContainerDef>,
    wick_brackets: Vec<WickBracket>,
}

impl Catalog {
    /// Builds a catalog from loaded content after validating it.
    pub fn new(
        content_version: String,
        constants: CatalogConstants,
        containers: Vec<ContainerDef>,
        wick_brackets: Vec<WickBracket>,
    ) -> Result<Self, CatalogError> {
        validate_constants(&constants)?;
        validate_containers(&containers)?;
        validate_wick_brackets(&wick_brackets)?;
        Ok(Self {
            content_version,
            constants,
            containers,
            wick_brackets,
        })
    }

    /// The compiled-in catalog, initialized once per process.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    pub fn content_version(&self) -> &str {
        &self.content_version
    }

    pub fn constants(&self) -> &CatalogConstants {
        &self.constants
    }

    pub fn containers(&self) -> &[ContainerDef] {
        &self.containers
    }

    pub fn wick_brackets(&self) -> &[WickBracket] {
        &self.wick_brackets
    }

    pub fn find_container(&self, id: &str) -> Option<&ContainerDef> {
        self.containers.iter().find(|c| c.id.0 == id)
    }

    /// Wick for the first bracket that holds `capacity_oz`. Capacities past the
    /// largest bracket get the largest bracket's wick.
    pub fn wick_for_capacity(&self, capacity_oz: f64) -> &str {
        self.wick_brackets
            .iter()
            .find(|b| capacity_oz <= b.max_capacity_oz + CAPACITY_EPSILON_OZ)
            .or_else(|| self.wick_brackets.last())
            .map_or("", |b| b.wick.as_str())
    }
}

/// Containers in catalog order, optionally restricted to an exact capacity.
pub fn list_containers(catalog: &Catalog, capacity_oz_filter: Option<f64>) -> Vec<ContainerDef> {
    catalog
        .containers()
        .iter()
        .filter(|c| {
            capacity_oz_filter.map_or(true, |oz| (c.capacity_oz - oz).abs() < CAPACITY_EPSILON_OZ)
        })
        .cloned()
        .collect()
}

fn validate_constants(constants: &CatalogConstants) -> Result<(), CatalogError> {
    let positive = [
        ("wax_density_g_per_ml", constants.wax_density_g_per_ml),
        ("ml_per_fl_oz", constants.ml_per_fl_oz),
    ];
    for (name, value) in positive {
        if !value.is_finite() || value <= 0.0 {
            return Err(CatalogError::InvalidConstant { name, value });
        }
    }
    let load = constants.default_fragrance_load_percent;
    if !load.is_finite() || !(0.0..=100.0).contains(&load) {
        return Err(CatalogError::InvalidConstant {
            name: "default_fragrance_load_percent",
            value: load,
        });
    }
    // Four components must fit above the floor.
    if !(1..=25).contains(&constants.min_proportion_percent) {
        return Err(CatalogError::InvalidConstant {
            name: "min_proportion_percent",
            value: f64::from(constants.min_proportion_percent),
        });
    }
    if constants.bias_step_percent > 50 {
        return Err(CatalogError::InvalidConstant {
            name: "bias_step_percent",
            value: f64::from(constants.bias_step_percent),
        });
    }
    Ok(())
}

fn validate_containers(containers: &[ContainerDef]) -> Result<(), CatalogError> {
    let mut seen: HashSet<&ContainerId> = HashSet::new();
    for container in containers {
        if container.id.0.is_empty() {
            return Err(CatalogError::EmptyContainerId);
        }
        if !seen.insert(&container.id) {
            return Err(CatalogError::DuplicateContainerId(container.id.clone()));
        }
        if !container.capacity_oz.is_finite() || container.capacity_oz <= 0.0 {
            return Err(CatalogError::NonPositiveCapacity {
                id: container.id.clone(),
                capacity_oz: container.capacity_oz,
            });
        }
    }
    Ok(())
}

fn validate_wick_brackets(brackets: &[WickBracket]) -> Result<(), CatalogError> {
    if brackets.is_empty() {
        return Err(CatalogError::EmptyWickTable);
    }
    let mut previous = 0.0;
    for (index, bracket) in brackets.iter().enumerate() {
        if bracket.wick.trim().is_empty() {
            return Err(CatalogError::EmptyWickLabel(index));
        }
        if !bracket.max_capacity_oz.is_finite() || bracket.max_capacity_oz <= previous {
            return Err(CatalogError::WickBracketsNotAscending {
                index,
                max_capacity_oz: bracket.max_capacity_oz,
            });
        }
        previous = bracket.max_capacity_oz;
    }
    Ok(())
}
