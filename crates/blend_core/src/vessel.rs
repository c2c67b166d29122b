//! Vessel wax and fragrance calculator.

use crate::rounding::round_to;
use crate::{Catalog, ContainerDef, WaxCalculation};

/// Total fill weight is reported to a tenth of a gram.
const WEIGHT_DECIMALS: i32 = 1;

/// Sizes wax, fragrance oil and wick for a vessel.
///
/// The capacity comes from `container_id` when given, else `capacity_oz`.
/// Returns `None` when the container is not in the catalog, when neither
/// input is given, or when a direct capacity is not a positive number.
/// `fragrance_load_percent` defaults to the catalog default (10) and is
/// clamped to 0–100.
pub fn calculate_wax_for_vessel(
    catalog: &Catalog,
    container_id: Option<&str>,
    capacity_oz: Option<f64>,
    fragrance_load_percent: Option<f64>,
) -> Option<WaxCalculation> {
    let (container, capacity_oz) = resolve_capacity(catalog, container_id, capacity_oz)?;
    let constants = catalog.constants();
    let load = resolve_load(
        fragrance_load_percent,
        constants.default_fragrance_load_percent,
    );

    // Only the total is rounded; fragrance stays exactly `load` percent of it.
    let total_wax_weight_g =
        round_to(capacity_oz * constants.fill_grams_per_oz(), WEIGHT_DECIMALS);
    let fragrance_weight_g = total_wax_weight_g * load / 100.0;
    let net_wax_weight_g = total_wax_weight_g - fragrance_weight_g;

    Some(WaxCalculation {
        container_id: container.map(|c| c.id.clone()),
        container_name: container.map(|c| c.name.clone()),
        capacity_oz,
        fragrance_load_percent: load,
        total_wax_weight_g,
        fragrance_weight_g,
        net_wax_weight_g,
        recommended_wick: catalog.wick_for_capacity(capacity_oz).to_string(),
    })
}

fn resolve_capacity<'a>(
    catalog: &'a Catalog,
    container_id: Option<&str>,
    capacity_oz: Option<f64>,
) -> Option<(Option<&'a ContainerDef>, f64)> {
    match (container_id, capacity_oz) {
        (Some(id), _) => {
            let container = catalog.find_container(id)?;
            Some((Some(container), container.capacity_oz))
        }
        (None, Some(oz)) if oz.is_finite() && oz > 0.0 => Some((None, oz)),
        _ => None,
    }
}

fn resolve_load(requested: Option<f64>, default: f64) -> f64 {
    match requested {
        Some(load) if load.is_finite() => load.clamp(0.0, 100.0),
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin() -> &'static Catalog {
        Catalog::builtin()
    }

    #[test]
    fn tumbler_weights() {
        let result = calculate_wax_for_vessel(builtin(), Some("c-003"), None, Some(10.0)).unwrap();
        // 8 oz × 29.5735 ml × 0.86 g/ml = 203.47 g
        assert!((result.total_wax_weight_g - 203.5).abs() < 1e-9);
        assert!((result.fragrance_weight_g - 20.35).abs() < 1e-9);
        assert!(
            (result.net_wax_weight_g + result.fragrance_weight_g - result.total_wax_weight_g).abs()
                < 1e-9
        );
        assert_eq!(result.recommended_wick, "ECO 6");
        assert_eq!(result.container_name.as_deref(), Some("8oz tumbler"));
    }

    #[test]
    fn load_defaults_to_ten_percent() {
        let explicit = calculate_wax_for_vessel(builtin(), None, Some(12.0), Some(10.0)).unwrap();
        let defaulted = calculate_wax_for_vessel(builtin(), None, Some(12.0), None).unwrap();
        assert_eq!(explicit, defaulted);
        assert!((defaulted.fragrance_load_percent - 10.0).abs() < 1e-9);
    }

    #[test]
    fn container_id_takes_precedence_over_capacity() {
        let result =
            calculate_wax_for_vessel(builtin(), Some("c-002"), Some(16.0), None).unwrap();
        assert!((result.capacity_oz - 4.0).abs() < 1e-9);
    }

    #[test]
    fn missing_inputs_return_none() {
        assert!(calculate_wax_for_vessel(builtin(), None, None, None).is_none());
    }

    #[test]
    fn non_positive_direct_capacity_returns_none() {
        assert!(calculate_wax_for_vessel(builtin(), None, Some(0.0), None).is_none());
        assert!(calculate_wax_for_vessel(builtin(), None, Some(-4.0), None).is_none());
        assert!(calculate_wax_for_vessel(builtin(), None, Some(f64::NAN), None).is_none());
    }

    #[test]
    fn out_of_range_load_is_clamped() {
        let zero = calculate_wax_for_vessel(builtin(), None, Some(8.0), Some(-5.0)).unwrap();
        assert!(zero.fragrance_weight_g.abs() < 1e-9);
        assert!((zero.net_wax_weight_g - zero.total_wax_weight_g).abs() < 1e-9);

        let nan = calculate_wax_for_vessel(builtin(), None, Some(8.0), Some(f64::NAN)).unwrap();
        assert!((nan.fragrance_load_percent - 10.0).abs() < 1e-9);
    }

    #[test]
    fn fragrance_is_exact_share_of_total() {
        for oz in 1..=32 {
            let oz = f64::from(oz);
            let result = calculate_wax_for_vessel(builtin(), None, Some(oz), Some(10.0)).unwrap();
            let expected = result.total_wax_weight_g * 0.10;
            assert!(
                (result.fragrance_weight_g - expected).abs() < 1e-9,
                "{oz} oz: fragrance {} vs {expected}",
                result.fragrance_weight_g
            );
        }
    }

    #[test]
    fn direct_capacity_has_no_container_echo() {
        let result = calculate_wax_for_vessel(builtin(), None, Some(5.0), None).unwrap();
        assert!(result.container_id.is_none());
        assert!((result.capacity_oz - 5.0).abs() < 1e-9);
        assert_eq!(result.recommended_wick, "ECO 4");
    }
}
