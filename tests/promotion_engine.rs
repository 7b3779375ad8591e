//! Integration tests for evaluating carts against the production promotions.

use std::fs;

use rusty_money::{Money, iso::BRL};
use testresult::TestResult;

use plie_discounts::{
    cart::{Cart, CartLine, RunInput},
    config::{PromotionConfig, PromotionRuleConfig, RuleConfig},
    engine::PromotionEngine,
    output::{DiscountApplicationStrategy, FunctionRunResult, Target},
};

const CUECA: &str = "gid://shopify/Collection/477972005161";
const SELF: &str = "gid://shopify/Collection/484968694057";
const BASIC: &str = "gid://shopify/Collection/484968431913";
const AMAZONIA: &str = "gid://shopify/Collection/485639684393";

fn engine() -> Result<PromotionEngine, plie_discounts::config::ConfigError> {
    PromotionEngine::new(&PromotionConfig::default())
}

fn input(lines: impl Into<Vec<CartLine>>) -> RunInput {
    RunInput::new(Cart::with_lines(lines))
}

fn amount(result: &FunctionRunResult) -> Option<&str> {
    result.discounts.first().and_then(|discount| discount.fixed_amount())
}

#[test]
fn cueca_trio_costs_the_bundle_price() -> TestResult {
    let result = engine()?.evaluate(&input([
        CartLine::variant("v1", "100.00", 1).with_collections(&[CUECA]),
        CartLine::variant("v2", "150.00", 1).with_collections(&[CUECA]),
        CartLine::variant("v3", "200.00", 1).with_collections(&[CUECA]),
    ]));

    assert_eq!(result.discount_application_strategy, DiscountApplicationStrategy::First);
    assert_eq!(result.discounts.len(), 1);
    assert_eq!(amount(&result), Some("270.10"));

    Ok(())
}

#[test]
fn two_self_units_get_no_discount() -> TestResult {
    let result = engine()?.evaluate(&input([
        CartLine::variant("v1", "199.90", 2).with_collections(&[SELF]),
    ]));

    assert_eq!(result, FunctionRunResult::empty());

    Ok(())
}

#[test]
fn cheapest_of_four_amazonia_units_is_free() -> TestResult {
    let result = engine()?.evaluate(&input([
        CartLine::variant("v1", "50.00", 1).with_collections(&[AMAZONIA]),
        CartLine::variant("v2", "60.00", 1).with_collections(&[AMAZONIA]),
        CartLine::variant("v3", "70.00", 1).with_collections(&[AMAZONIA]),
        CartLine::variant("v4", "80.00", 1).with_collections(&[AMAZONIA]),
    ]));

    assert_eq!(amount(&result), Some("50.00"));

    Ok(())
}

#[test]
fn eight_amazonia_units_free_first_and_fifth_cheapest() -> TestResult {
    let lines: Vec<CartLine> = [80, 10, 70, 20, 60, 30, 50, 40]
        .into_iter()
        .enumerate()
        .map(|(i, price)| {
            CartLine::variant(format!("v{i}"), format!("{price}.00"), 1)
                .with_collections(&[AMAZONIA])
        })
        .collect();

    let result = engine()?.evaluate(&input(lines));

    assert_eq!(amount(&result), Some("60.00"));

    Ok(())
}

#[test]
fn cart_without_tracked_collections_gets_the_empty_result() -> TestResult {
    let result = engine()?.evaluate(&input([
        CartLine::variant("v1", "129.90", 6).with_collections(&["gid://shopify/Collection/1"]),
        CartLine::other("50.00", 4),
    ]));

    assert!(result.is_empty());
    assert_eq!(result.discount_application_strategy, DiscountApplicationStrategy::First);

    Ok(())
}

#[test]
fn zero_total_discount_is_the_empty_result() -> TestResult {
    // 59.90 + 59.90 + 60.10 is exactly the 179.90 bundle price.
    let result = engine()?.evaluate(&input([
        CartLine::variant("v1", "59.90", 2).with_collections(&[CUECA]),
        CartLine::variant("v2", "60.10", 1).with_collections(&[CUECA]),
    ]));

    assert_eq!(result, FunctionRunResult::empty());

    Ok(())
}

#[test]
fn empty_cart_gets_the_empty_result() -> TestResult {
    assert_eq!(engine()?.evaluate(&RunInput::default()), FunctionRunResult::empty());

    Ok(())
}

#[test]
fn quantity_is_expanded_into_units() -> TestResult {
    // A single line of three units forms a trio: 3 * 79.90 - 179.90.
    let result = engine()?.evaluate(&input([
        CartLine::variant("v1", "79.90", 3).with_collections(&[SELF]),
    ]));

    assert_eq!(amount(&result), Some("59.80"));

    Ok(())
}

#[test]
fn basic_and_amazonia_units_are_priced_by_both_rules() -> TestResult {
    let evaluation = engine()?.evaluate_with_breakdown(&input([
        CartLine::variant("both", "59.90", 4).with_collections(&[BASIC, AMAZONIA]),
    ]));

    let discounts: Vec<(&str, i64)> = evaluation
        .outcomes
        .iter()
        .map(|outcome| (outcome.name.as_str(), outcome.discount.to_minor_units()))
        .collect();

    // basic: one trio, 3 * 59.90 - 139.90; combined: one free unit.
    assert_eq!(
        discounts,
        vec![
            ("cueca", 0),
            ("self", 0),
            ("basic", 3980),
            ("basicAmazoniaCombined", 5990),
        ]
    );
    assert_eq!(evaluation.total, Money::from_minor(9970, BRL));
    assert_eq!(amount(&evaluation.result), Some("99.70"));

    Ok(())
}

#[test]
fn discounts_from_every_bucket_are_summed() -> TestResult {
    let result = engine()?.evaluate(&input([
        CartLine::variant("c", "100.00", 3).with_collections(&[CUECA]),
        CartLine::variant("s", "100.00", 3).with_collections(&[SELF]),
        CartLine::variant("b", "50.00", 3).with_collections(&[BASIC]),
        CartLine::variant("a", "25.00", 4).with_collections(&[AMAZONIA]),
    ]));

    // 120.10 + 120.10 + 10.10 + 25.00
    assert_eq!(amount(&result), Some("275.30"));

    Ok(())
}

#[test]
fn discount_targets_subtotal_without_excluded_variants() -> TestResult {
    let result = engine()?.evaluate(&input([
        CartLine::variant("v1", "100.00", 3).with_collections(&[CUECA]),
    ]));

    let discount = result.discounts.first().ok_or("expected a discount")?;

    assert_eq!(discount.message, "Promoções Especiais Pliê");

    let [Target::OrderSubtotal { excluded_variant_ids }] = discount.targets.as_slice() else {
        panic!("expected a single order subtotal target");
    };

    assert_eq!(excluded_variant_ids.len(), 7);
    assert!(
        excluded_variant_ids
            .iter()
            .any(|id| id == "gid://shopify/ProductVariant/50166839673129")
    );

    Ok(())
}

#[test]
fn evaluation_is_idempotent() -> TestResult {
    let engine = engine()?;
    let input = input([
        CartLine::variant("v1", "89.90", 4).with_collections(&[BASIC, AMAZONIA]),
        CartLine::variant("v2", "120.00", 3).with_collections(&[CUECA]),
    ]);

    let first = engine.evaluate_with_breakdown(&input);
    let second = engine.evaluate_with_breakdown(&input);

    assert_eq!(first, second);

    Ok(())
}

#[test]
fn line_order_does_not_change_the_discount() -> TestResult {
    let engine = engine()?;
    let lines = vec![
        CartLine::variant("v1", "45.00", 1).with_collections(&[AMAZONIA]),
        CartLine::variant("v2", "99.90", 2).with_collections(&[CUECA]),
        CartLine::variant("v3", "65.00", 2).with_collections(&[BASIC, AMAZONIA]),
        CartLine::variant("v4", "110.00", 1).with_collections(&[CUECA]),
        CartLine::other("30.00", 1),
        CartLine::variant("v5", "72.50", 3).with_collections(&[BASIC]),
    ];

    let expected = engine.evaluate(&input(lines.clone()));

    let mut reversed = lines.clone();
    reversed.reverse();

    let mut rotated = lines;
    rotated.rotate_left(2);

    assert!(!expected.is_empty());
    assert_eq!(engine.evaluate(&input(reversed)), expected);
    assert_eq!(engine.evaluate(&input(rotated)), expected);

    Ok(())
}

#[test]
fn malformed_lines_contribute_nothing() -> TestResult {
    let result = engine()?.evaluate(&input([
        CartLine::variant("bad", "R$ 10", 3).with_collections(&[CUECA]),
        CartLine::variant("negative", "-10.00", 3).with_collections(&[CUECA]),
        CartLine::variant("zero", "100.00", 0).with_collections(&[CUECA]),
        CartLine::variant("ok", "100.00", 2).with_collections(&[CUECA]),
    ]));

    assert!(result.is_empty());

    Ok(())
}

#[test]
fn repeated_collection_membership_counts_units_once() -> TestResult {
    // Two units listing cueca twice are still two units, not a trio.
    let evaluation = engine()?.evaluate_with_breakdown(&input([
        CartLine::variant("v1", "100.00", 2).with_collections(&[CUECA, CUECA]),
    ]));

    let cueca = evaluation
        .outcomes
        .iter()
        .find(|outcome| outcome.name == "cueca")
        .ok_or("expected a cueca outcome")?;

    assert_eq!(cueca.units, 2);
    assert_eq!(evaluation.result, FunctionRunResult::empty());

    Ok(())
}

#[test]
fn maximum_host_quantity_is_priced_without_expanding_units() -> TestResult {
    let json = r#"{
      "cart": {
        "lines": [
          {
            "quantity": 9223372036854775807,
            "cost": { "amountPerQuantity": { "amount": "100.00" } },
            "merchandise": {
              "__typename": "ProductVariant",
              "id": "gid://shopify/ProductVariant/1",
              "product": {
                "inCollections": [
                  { "collectionId": "gid://shopify/Collection/477972005161", "isMember": true }
                ]
              }
            }
          }
        ]
      }
    }"#;

    let evaluation = engine()?.evaluate_with_breakdown(&RunInput::from_json(json)?);

    let cueca = evaluation
        .outcomes
        .iter()
        .find(|outcome| outcome.name == "cueca")
        .ok_or("expected a cueca outcome")?;

    assert_eq!(cueca.units, usize::try_from(i64::MAX)?);
    assert_eq!(evaluation.total, Money::from_minor(i64::MAX, BRL));
    assert_eq!(amount(&evaluation.result), Some("92233720368547758.07"));

    Ok(())
}

#[test]
fn injected_configuration_replaces_production_values() -> TestResult {
    let mut config = PromotionConfig::default();

    config.message = "Leve 2".to_string();
    config.excluded_variant_ids.clear();
    config.promotions = vec![PromotionRuleConfig {
        name: "pairs".to_string(),
        collections: vec!["self".to_string()],
        rule: RuleConfig::BundlePrice {
            size: 2,
            price: "100.00".to_string(),
        },
    }];

    let result = PromotionEngine::new(&config)?.evaluate(&input([
        CartLine::variant("v1", "60.00", 2).with_collections(&[SELF]),
        CartLine::variant("v2", "60.00", 3).with_collections(&[CUECA]),
    ]));

    let discount = result.discounts.first().ok_or("expected a discount")?;

    assert_eq!(discount.fixed_amount(), Some("20.00"));
    assert_eq!(discount.message, "Leve 2");
    assert_eq!(
        discount.targets,
        vec![Target::OrderSubtotal {
            excluded_variant_ids: Vec::new()
        }]
    );

    Ok(())
}

#[test]
fn host_json_round_trip() -> TestResult {
    let json = fs::read_to_string("fixtures/json/scenario_a.json")?;
    let result = engine()?.evaluate(&RunInput::from_json(&json)?);

    let output = serde_json::to_value(&result)?;

    assert_eq!(output["discountApplicationStrategy"], "FIRST");
    assert_eq!(output["discounts"][0]["value"]["fixedAmount"]["amount"], "270.10");
    assert_eq!(
        output["discounts"][0]["targets"][0]["orderSubtotal"]["excludedVariantIds"]
            .as_array()
            .map(Vec::len),
        Some(7)
    );

    Ok(())
}
