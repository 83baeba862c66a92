//! Integration tests for scoped price selection

use vitrine::{
    prices::{Amount, PriceView, ScopedPrice},
    pricing::{PriceContext, select_price},
};

fn price(currency: &str, cents: i64) -> ScopedPrice {
    ScopedPrice::new(Amount::new(currency, cents))
}

#[test]
fn country_scoped_price_wins_in_its_country_only() {
    let prices = [price("EUR", 999).with_country("DE"), price("EUR", 899)];

    let germany = select_price(&prices, &PriceContext::new("EUR").with_country("DE"));
    let britain = select_price(&prices, &PriceContext::new("EUR").with_country("GB"));

    assert_eq!(germany.map(|p| p.value.cent_amount), Some(999));
    assert_eq!(britain.map(|p| p.value.cent_amount), Some(899));
}

#[test]
fn exact_match_beats_more_specific_mismatch() {
    let prices = [
        price("EUR", 500)
            .with_country("DE")
            .with_customer_group("b2b")
            .with_channel("store"),
        price("EUR", 700).with_country("DE").with_channel("web"),
        price("EUR", 900),
    ];

    let ctx = PriceContext::new("EUR")
        .with_country("DE")
        .with_channel("web");

    assert_eq!(
        select_price(&prices, &ctx).map(|p| p.value.cent_amount),
        Some(700)
    );
}

#[test]
fn same_currency_list_always_yields_a_price() {
    let lists: [Vec<ScopedPrice>; 4] = [
        vec![price("GBP", 100)],
        vec![price("GBP", 100).with_country("DE")],
        vec![
            price("GBP", 100).with_customer_group("vip"),
            price("GBP", 90).with_channel("app"),
        ],
        vec![price("EUR", 1), price("GBP", 2).with_country("FR")],
    ];

    let ctx = PriceContext::new("GBP").with_country("GB");

    for prices in &lists {
        let selected = select_price(prices, &ctx);

        assert!(selected.is_some(), "{prices:?} should yield a price");
        assert!(selected.is_some_and(|p| p.currency_code() == "GBP"));
    }
}

#[test]
fn foreign_currencies_leave_the_variant_unpriced() {
    let prices = [price("EUR", 999).with_country("DE")];

    assert!(select_price(&prices, &PriceContext::new("GBP")).is_none());
    assert!(select_price(&[], &PriceContext::new("EUR")).is_none());
}

#[test]
fn price_view_reports_discounts() {
    let discounted = price("EUR", 1000).with_discounted(Amount::new("EUR", 800));

    let view = PriceView::from(&discounted);

    assert!(view.discounted);
    assert_eq!(view.discounted_cent_amount, Some(800));
    assert_eq!(view.effective_cent_amount(), 800);
    assert_eq!(Amount::new("EUR", 1299).format(), "12.99 EUR");
}
