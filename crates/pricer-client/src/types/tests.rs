//! Unit tests for types module.

use super::*;

// ============================================================================
// Enum Tests
// ============================================================================

#[test]
fn test_option_type_display() {
    assert_eq!(format!("{}", OptionType::Call), "call");
    assert_eq!(format!("{}", OptionType::Put), "put");
}

#[test]
fn test_exercise_style_serialization() {
    assert_eq!(
        serde_json::to_string(&ExerciseStyle::American).unwrap(),
        "\"american\""
    );
    let style: ExerciseStyle = serde_json::from_str("\"european\"").unwrap();
    assert_eq!(style, ExerciseStyle::European);
}

#[test]
fn test_pricing_model_serialization() {
    assert_eq!(
        serde_json::to_string(&PricingModel::BlackScholes).unwrap(),
        "\"black-scholes\""
    );
    assert_eq!(format!("{}", PricingModel::Binomial), "binomial");
}

// ============================================================================
// PriceRequest Tests
// ============================================================================

#[test]
fn test_price_request_skips_unset_fields() {
    let request = PriceRequest::new(100.0, 95.0, 0.5, 0.05, 0.2, OptionType::Put);
    let json = serde_json::to_string(&request).unwrap();

    assert!(json.contains("\"spotPrice\":100.0"));
    assert!(json.contains("\"optionType\":\"put\""));
    assert!(!json.contains("optionStyle"));
    assert!(!json.contains("steps"));
    assert!(!json.contains("compare"));
}

#[test]
fn test_price_request_builders() {
    let request = PriceRequest::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Put)
        .american()
        .with_steps(150)
        .compared();
    let json = serde_json::to_string(&request).unwrap();

    assert!(json.contains("\"optionStyle\":\"american\""));
    assert!(json.contains("\"steps\":150"));
    assert!(json.contains("\"compare\":true"));
}

// ============================================================================
// PriceResponse Tests
// ============================================================================

#[test]
fn test_analytic_response_deserialization() {
    let json = r#"{
        "price": 10.4506,
        "greeks": {"delta": 0.6368, "gamma": 0.0188, "theta": -6.414, "vega": 37.52, "rho": 53.23},
        "optionStyle": "european",
        "model": "black-scholes"
    }"#;

    let response: PriceResponse = serde_json::from_str(json).unwrap();
    let priced = response.priced().unwrap();
    assert_eq!(priced.price, 10.4506);
    assert_eq!(priced.model, Some(PricingModel::BlackScholes));
    assert!(priced.steps.is_none());
    assert!(response.comparison().is_none());
}

#[test]
fn test_comparison_response_deserialization() {
    let leg = |style: &str, price: f64| {
        format!(
            r#"{{"price": {price}, "greeks": {{"delta": -0.4, "gamma": 0.02, "theta": -2.0, "vega": 37.0, "rho": -40.0}},
                "optionStyle": "{style}", "steps": 100}}"#
        )
    };
    let json = format!(
        r#"{{"american": {}, "european": {}, "earlyExercisePremium": 0.5,
             "earlyExercisePremiumPercent": 9.0, "model": "binomial", "note": "n"}}"#,
        leg("american", 6.08),
        leg("european", 5.57)
    );

    let response: PriceResponse = serde_json::from_str(&json).unwrap();
    let comparison = response.comparison().unwrap();
    assert_eq!(comparison.american.option_style, ExerciseStyle::American);
    assert_eq!(comparison.european.steps, Some(100));
    assert_eq!(comparison.early_exercise_premium, 0.5);
}

// ============================================================================
// Chain and Error Tests
// ============================================================================

#[test]
fn test_option_chain_deserialization() {
    let json = r#"{
        "spotPrice": 102.0, "atmStrike": 100.0, "strikeInterval": 5.0,
        "rows": [{
            "strike": 100.0,
            "call": {"price": 5.0, "greeks": {"delta": 0.6, "gamma": 0.04, "theta": -10.0, "vega": 19.0, "rho": 13.0}},
            "put": {"price": 1.8, "greeks": {"delta": -0.4, "gamma": 0.04, "theta": -5.0, "vega": 19.0, "rho": -11.0}}
        }]
    }"#;

    let chain: OptionChain = serde_json::from_str(json).unwrap();
    assert_eq!(chain.atm_strike, 100.0);
    assert_eq!(chain.rows.len(), 1);
    assert!(chain.rows[0].put.greeks.delta < 0.0);
}

#[test]
fn test_error_body_without_field() {
    let body: ErrorBody =
        serde_json::from_str(r#"{"error": "bad", "code": "INVALID_REQUEST"}"#).unwrap();
    assert_eq!(body.code, "INVALID_REQUEST");
    assert!(body.field.is_none());
}
