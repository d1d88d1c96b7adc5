use invoicer_core::stored::{bill_totals_from_stored, StoredBillTotals, StoredLineItem};
use invoicer_core::*;
use proptest::prelude::*;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn scenario_rounding_reference_values() {
    assert_eq!(round(10.005), 10.01);
    assert_eq!(round(12.344), 12.34);
    assert_eq!(round(12.345), 12.35);
    assert_eq!(round(0.1 + 0.2), 0.3);
    assert_eq!(round(99.999), 100.0);
}

#[test]
fn scenario_discount_applies_before_tax() {
    init_tracing();
    let result = calculate_item_totals(&LineItemInput::new(1000.0, 2.0, 50.0, 19.0));

    // 19% of the 1000 left after discount, not of the original 2000
    assert_eq!(result.discount_amount, 1000.0);
    assert_eq!(result.tax_amount, 190.0);
    assert_eq!(result.total, 1190.0);
}

#[test]
fn scenario_zero_tax_item() {
    let result = calculate_item_totals(&LineItemInput::new(500.0, 4.0, 0.0, 0.0));
    assert_eq!(result.tax_amount, 0.0);
    assert_eq!(result.total, 2000.0);
}

#[test]
fn scenario_multi_item_bill() {
    init_tracing();
    let totals = calculate_bill_totals(&[
        LineItemInput::new(1000.0, 2.0, 10.0, 19.0),
        LineItemInput::new(500.5, 3.0, 0.0, 5.0),
    ]);

    assert_eq!(totals.tax_total, 417.08);
    assert_eq!(totals.discount_total, 200.0);
    assert_eq!(totals.subtotal, 3301.5);
    assert_eq!(totals.total, 3718.58);
}

#[test]
fn scenario_float_drift_never_reaches_totals() {
    let totals = calculate_bill_totals(&[
        LineItemInput::new(0.1, 1.0, 0.0, 0.0),
        LineItemInput::new(0.2, 1.0, 0.0, 0.0),
    ]);

    assert_eq!(totals.subtotal, 0.3);
    assert_eq!(totals.total, 0.3);
    assert_ne!(totals.total, 0.1 + 0.2);
}

#[test]
fn scenario_empty_bill_is_zero() {
    let totals = calculate_bill_totals(&[]);
    assert_eq!(
        totals,
        BillTotals {
            subtotal: 0.0,
            discount_total: 0.0,
            tax_total: 0.0,
            total: 0.0,
        }
    );
}

#[test]
fn scenario_bill_keeps_line_positions() {
    let items = [
        LineItemInput::new(500.5, 3.0, 0.0, 5.0),
        LineItemInput::new(1000.0, 2.0, 10.0, 19.0),
    ];
    let bill = calculate_bill(&items);

    assert_eq!(bill.items[0].total, 1576.58);
    assert_eq!(bill.items[1].total, 2142.0);
    assert_eq!(bill.totals.total, 3718.58);
}

#[test]
fn scenario_web_payload_to_stored_totals() {
    init_tracing();
    let payload = r#"[
        {"price": "1000.00", "quantity": "2", "discountPercentage": "10.00", "taxRate": "19.00"},
        {"price": 500.5, "quantity": 3, "discountPercentage": 0, "taxRate": 5}
    ]"#;
    let stored: Vec<StoredLineItem> = serde_json::from_str(payload).unwrap();

    let totals = bill_totals_from_stored(&stored).unwrap();
    let row = StoredBillTotals::try_from(&totals).unwrap();

    assert_eq!(row.subtotal, "3301.50");
    assert_eq!(row.discount_total, "200.00");
    assert_eq!(row.tax_total, "417.08");
    assert_eq!(row.total, "3718.58");
}

#[test]
fn scenario_validation_is_opt_in() {
    let items = [LineItemInput::new(100.0, 1.0, 150.0, 10.0)];

    // The engine computes whatever it is given
    let totals = calculate_bill_totals(&items);
    assert_eq!(totals.total, -55.0);

    // A caller asking for validation gets the rule violation instead
    let err = validation::calculate_validated_bill(&items, &BillingConfig::default())
        .unwrap_err();
    assert_eq!(err.line_index(), Some(0));
    assert!(err.to_string().contains("discountPercentage"));
}

#[test]
fn scenario_cent_view_of_totals() {
    let totals = calculate_bill_totals(&[
        LineItemInput::new(1000.0, 2.0, 10.0, 19.0),
        LineItemInput::new(500.5, 3.0, 0.0, 5.0),
    ]);
    let cents = totals.as_money().unwrap();

    assert_eq!(cents.subtotal, Money::from_cents(330_150));
    assert_eq!(cents.tax_total, Money::from_cents(41_708));
    assert_eq!(
        cents.subtotal + cents.tax_total,
        cents.total,
        "net + tax must equal gross"
    );
}

fn line_item() -> impl Strategy<Value = LineItemInput> {
    (0u32..1_000_000, 0u32..100, 0u32..=100, 0u32..=30).prop_map(
        |(price_cents, quantity, discount, tax)| {
            LineItemInput::new(
                price_cents as f64 / 100.0,
                quantity as f64,
                discount as f64,
                tax as f64,
            )
        },
    )
}

proptest! {
    #[test]
    fn prop_round_is_idempotent(x in -1e9f64..1e9f64) {
        let once = round(x);
        prop_assert_eq!(round(once), once);
    }

    #[test]
    fn prop_plain_item_total_is_rounded_product(
        price in 0f64..1e6,
        quantity in 0f64..1e4,
    ) {
        let result = calculate_item_totals(&LineItemInput::plain(price, quantity));
        prop_assert_eq!(result.total, round(price * quantity));
        prop_assert_eq!(result.tax_amount, 0.0);
        prop_assert_eq!(result.discount_amount, 0.0);
    }

    #[test]
    fn prop_discount_never_exceeds_base(item in line_item()) {
        let result = calculate_item_totals(&item);
        prop_assert!(result.discount_amount >= 0.0);
        prop_assert!(result.discount_amount <= result.base_subtotal);
        prop_assert!(result.taxable_subtotal <= result.total);
    }

    #[test]
    fn prop_bill_order_does_not_change_totals(
        items in prop::collection::vec(line_item(), 0..20),
    ) {
        let forward = calculate_bill_totals(&items);
        let mut reversed = items.clone();
        reversed.reverse();
        prop_assert_eq!(calculate_bill_totals(&reversed), forward);
    }
}
