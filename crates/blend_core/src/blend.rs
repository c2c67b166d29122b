//! Blend proportion engine.
//!
//! Baseline split, bias pass, renormalization. Output always sums to 100 and
//! keeps input order.

use std::collections::HashSet;

use crate::bias::{BiasInference, KeywordBias};
use crate::rounding::{even_split, renormalize};
use crate::{BlendProportion, CatalogConstants, InvalidInputError, ProductType, ScentComponent};

pub const MIN_COMPONENTS: usize = 1;
pub const MAX_COMPONENTS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlendSettings {
    pub bias_step_percent: u32,
    pub min_proportion_percent: u32,
}

impl Default for BlendSettings {
    fn default() -> Self {
        Self::from(&CatalogConstants::default())
    }
}

impl From<&CatalogConstants> for BlendSettings {
    fn from(constants: &CatalogConstants) -> Self {
        Self {
            bias_step_percent: constants.bias_step_percent,
            // Four components must always fit above the floor.
            min_proportion_percent: constants.min_proportion_percent.clamp(1, 25),
        }
    }
}

pub struct BlendEngine<B = KeywordBias> {
    settings: BlendSettings,
    bias: B,
}

impl BlendEngine<KeywordBias> {
    pub fn with_settings(settings: BlendSettings) -> Self {
        Self::new(settings, KeywordBias::new(settings.bias_step_percent))
    }
}

impl Default for BlendEngine<KeywordBias> {
    fn default() -> Self {
        Self::with_settings(BlendSettings::default())
    }
}

impl<B: BiasInference> BlendEngine<B> {
    pub fn new(settings: BlendSettings, bias: B) -> Self {
        Self { settings, bias }
    }

    pub fn settings(&self) -> BlendSettings {
        self.settings
    }

    pub fn calculate(
        &self,
        components: &[ScentComponent],
        preference_hint: Option<&str>,
        product_type: Option<&str>,
    ) -> Result<Vec<BlendProportion>, InvalidInputError> {
        validate_components(components)?;
        let product = product_type.map_or(ProductType::Generic, ProductType::from_hint);
        let baseline = baseline_split(product, components.len());

        if components.len() == 1 {
            return Ok(pair(components, &baseline));
        }

        let hint = preference_hint.map(str::trim).unwrap_or_default();
        if hint.is_empty() {
            return Ok(pair(components, &baseline));
        }
        let deltas = self.bias.infer(hint, components);
        if deltas.is_empty() {
            return Ok(pair(components, &baseline));
        }

        let min = self.settings.min_proportion_percent;
        let adjusted: Vec<u32> = components
            .iter()
            .zip(&baseline)
            .map(|(component, &base)| {
                let delta = deltas.get(&component.id).copied().unwrap_or(0);
                let value = i64::from(base) + i64::from(delta);
                u32::try_from(value.max(i64::from(min))).unwrap_or(min)
            })
            .collect();

        Ok(pair(components, &renormalize(&adjusted, min)))
    }
}

/// One-shot blend with the default settings and keyword heuristic.
pub fn calculate_blend_proportions(
    components: &[ScentComponent],
    preference_hint: Option<&str>,
    product_type: Option<&str>,
) -> Result<Vec<BlendProportion>, InvalidInputError> {
    BlendEngine::default().calculate(components, preference_hint, product_type)
}

fn validate_components(components: &[ScentComponent]) -> Result<(), InvalidInputError> {
    if !(MIN_COMPONENTS..=MAX_COMPONENTS).contains(&components.len()) {
        return Err(InvalidInputError::ComponentCount(components.len()));
    }
    let mut seen = HashSet::new();
    for component in components {
        if !seen.insert(&component.id) {
            return Err(InvalidInputError::DuplicateComponentId(component.id.clone()));
        }
    }
    Ok(())
}

/// Starting allocation before any hint is applied.
// Every product type shares the even table today; a product-specific skew
// slots in here.
fn baseline_split(_product: ProductType, count: usize) -> Vec<u32> {
    even_split(count)
}

fn pair(components: &[ScentComponent], shares: &[u32]) -> Vec<BlendProportion> {
    components
        .iter()
        .zip(shares)
        .map(|(component, &proportion_percent)| BlendProportion {
            id: component.id.clone(),
            name: component.name.clone(),
            proportion_percent,
        })
        .collect()
}
