//! Integration tests for attribute resolution

use serde_json::{Value, json};
use vitrine::attributes::{Resolved, resolve};

const FALLBACKS: [&str; 2] = ["en-GB", "de-DE"];

#[test]
fn resolution_is_total() {
    let inputs: [Value; 10] = [
        json!({ "de-DE": "Rot", "en-GB": "Red" }),
        json!({ "key": "red", "label": "Red" }),
        json!({ "key": "red", "label": { "de-DE": "Rot" } }),
        json!({ "centAmount": 1250, "currencyCode": "EUR" }),
        json!([1, 2, 3]),
        json!(["a", { "en-GB": "b" }]),
        json!([1, "two", null, [3]]),
        json!("plain"),
        json!(42.5),
        json!({ "weird": { "nested": true } }),
    ];

    for input in &inputs {
        let resolved = resolve("de-DE", input, &FALLBACKS);

        assert_ne!(resolved, Resolved::Empty, "{input} should resolve to a value");
    }
}

#[test]
fn localized_values_follow_locale_then_fallbacks() {
    let value = json!({ "fr-FR": "Rouge", "en-GB": "Red" });

    assert_eq!(resolve("de-DE", &value, &FALLBACKS).display(), "Red");
    assert_eq!(resolve("fr-FR", &value, &FALLBACKS).display(), "Rouge");
}

#[test]
fn money_and_mixed_lists_render_as_text() {
    let money = json!({ "centAmount": 1250, "currencyCode": "EUR" });
    assert_eq!(resolve("en-GB", &money, &FALLBACKS).display(), "12.50 EUR");

    let mixed = resolve("en-GB", &json!([1, "two"]), &FALLBACKS);
    assert_eq!(mixed, Resolved::Texts(vec!["1".to_string(), "two".to_string()]));
}
