use super::*;
use crate::test_fixtures::{components, make_rng, random_components, random_hint};

mod wire;

// --- Shared test helpers ------------------------------------------------

fn sum(result: &[BlendProportion]) -> u32 {
    result.iter().map(|p| p.proportion_percent).sum()
}

fn leather_citrus() -> Vec<ScentComponent> {
    components(&[("l", "Leather"), ("c", "Citrus")])
}
