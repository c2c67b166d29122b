use super::*;
use serde_json::json;

#[test]
fn blend_output_uses_plain_string_ids() {
    let blend =
        calculate_blend_proportions(&leather_citrus(), Some("more leather, less citrus"), None)
            .unwrap();
    let value = serde_json::to_value(&blend).unwrap();
    assert_eq!(
        value,
        json!([
            {"id": "l", "name": "Leather", "proportion_percent": 55},
            {"id": "c", "name": "Citrus", "proportion_percent": 45}
        ])
    );
    let back: Vec<BlendProportion> = serde_json::from_value(value).unwrap();
    assert_eq!(back, blend);
}

#[test]
fn wax_calculation_survives_json() {
    let wax = calculate_wax_for_vessel(Catalog::builtin(), Some("c-003"), None, Some(10.0))
        .expect("c-003 is in the built-in catalog");
    let text = serde_json::to_string(&wax).unwrap();
    let back: WaxCalculation = serde_json::from_str(&text).unwrap();
    assert_eq!(back, wax);

    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["container_id"], "c-003");
    assert_eq!(value["recommended_wick"], "ECO 6");
}

#[test]
fn direct_capacity_serializes_null_container() {
    let wax = calculate_wax_for_vessel(Catalog::builtin(), None, Some(5.0), None).unwrap();
    let value = serde_json::to_value(&wax).unwrap();
    assert!(value["container_id"].is_null());
    assert!(value["container_name"].is_null());
}
