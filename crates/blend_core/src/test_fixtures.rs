//! Shared test fixtures for blend_core and downstream crates.
//!
//! `components()` builds a request from `(id, name)` pairs. `make_rng()` is
//! the seeded RNG used by the invariant sweeps. `small_catalog()` is a
//! three-container catalog with a two-bracket wick table.

use crate::{Catalog, CatalogConstants, ContainerDef, ContainerId, ScentComponent, WickBracket};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub fn components(pairs: &[(&str, &str)]) -> Vec<ScentComponent> {
    pairs
        .iter()
        .map(|(id, name)| ScentComponent::new(*id, *name))
        .collect()
}

pub fn make_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(42)
}

/// Scent names the sweeps draw from.
pub const SCENT_NAMES: &[&str] = &[
    "Leather",
    "Citrus",
    "Vanilla",
    "Sea Salt",
    "Black Pepper",
    "Amber",
    "Tonka Bean",
    "Vanilla Bean",
    "Rose",
    "Oud",
];

const HINT_WORDS: &[&str] = &[
    "more", "less", "extra", "subtle", "forward", "light", "and", "but", ",", "heavy", "sweeter",
    "please", "no", "!!", "leather", "citrus", "vanilla", "salt", "pepper", "bean", "rose",
];

/// A blend of 1–4 distinct components drawn from [`SCENT_NAMES`].
pub fn random_components(rng: &mut impl Rng) -> Vec<ScentComponent> {
    let count = rng.gen_range(1..=4);
    SCENT_NAMES
        .choose_multiple(rng, count)
        .enumerate()
        .map(|(i, name)| ScentComponent::new(format!("f{i}"), *name))
        .collect()
}

/// Word salad built from cue words and scent names, sometimes empty.
pub fn random_hint(rng: &mut impl Rng) -> String {
    let len = rng.gen_range(0..12);
    (0..len)
        .filter_map(|_| HINT_WORDS.choose(rng).copied())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn small_catalog() -> Catalog {
    let container = |id: &str, name: &str, capacity_oz: f64| ContainerDef {
        id: ContainerId::from(id),
        name: name.to_string(),
        capacity_oz,
        material: "glass".to_string(),
    };
    Catalog::new(
        "test".to_string(),
        CatalogConstants::default(),
        vec![
            container("t-001", "4oz jar", 4.0),
            container("t-002", "8oz jar", 8.0),
            container("t-003", "8oz tin", 8.0),
        ],
        vec![
            WickBracket {
                max_capacity_oz: 6.0,
                wick: "small".to_string(),
            },
            WickBracket {
                max_capacity_oz: 12.0,
                wick: "large".to_string(),
            },
        ],
    )
    .expect("small_catalog is valid")
}
