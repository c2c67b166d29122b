//! Blend percentages to grams, for a batch of known weight.

use crate::rounding::{round_to, TOTAL_PERCENT};
use crate::{BlendProportion, ComponentWeight, InvalidInputError};

const GRAM_DECIMALS: i32 = 2;

/// Checks a hand-entered blend: every share above zero, total exactly 100.
pub fn validate_proportions(proportions: &[BlendProportion]) -> Result<(), InvalidInputError> {
    if !(crate::MIN_COMPONENTS..=crate::MAX_COMPONENTS).contains(&proportions.len()) {
        return Err(InvalidInputError::ComponentCount(proportions.len()));
    }
    if let Some(zero) = proportions.iter().find(|p| p.proportion_percent == 0) {
        return Err(InvalidInputError::ZeroProportion(zero.id.clone()));
    }
    let total: u32 = proportions.iter().map(|p| p.proportion_percent).sum();
    if total != TOTAL_PERCENT {
        return Err(InvalidInputError::ProportionSum(total));
    }
    Ok(())
}

/// Splits `batch_weight_g` across the blend by share. The last component takes
/// the rounding residue so the grams add back up to the batch.
pub fn blend_weights(proportions: &[BlendProportion], batch_weight_g: f64) -> Vec<ComponentWeight> {
    let batch = if batch_weight_g.is_finite() {
        batch_weight_g.max(0.0)
    } else {
        0.0
    };
    let total: u32 = proportions.iter().map(|p| p.proportion_percent).sum();
    let mut assigned = 0.0;
    let last_idx = proportions.len().saturating_sub(1);

    proportions
        .iter()
        .enumerate()
        .map(|(idx, p)| {
            let weight_g = if total == 0 {
                0.0
            } else if idx == last_idx {
                round_to(batch - assigned, GRAM_DECIMALS)
            } else {
                round_to(
                    batch * f64::from(p.proportion_percent) / f64::from(total),
                    GRAM_DECIMALS,
                )
            };
            assigned += weight_g;
            ComponentWeight {
                id: p.id.clone(),
                name: p.name.clone(),
                proportion_percent: p.proportion_percent,
                weight_g,
            }
        })
        .collect()
}
