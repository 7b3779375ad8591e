//! Engine
//!
//! Evaluates a cart snapshot against the configured promotions: expand the
//! cart into one price bucket per promotion, price each bucket with its tier
//! rule and fold the savings into a single fixed-amount order discount.
//!
//! Evaluation is a pure function of the input and the engine's configuration
//! and never fails; a cart with nothing to discount yields
//! [`FunctionRunResult::empty`].

use rustc_hash::FxHashSet;
use rusty_money::{Money, iso::Currency};
use slotmap::{SecondaryMap, SlotMap};
use tracing::{debug, info};

use crate::{
    buckets::{PriceBucket, expand},
    cart::RunInput,
    config::{ConfigError, PromotionConfig},
    items::priced_items,
    output::{Discount, FunctionRunResult},
    pricing::format_amount,
    promotions::{Promotion, PromotionKey, PromotionMeta},
};

/// Promotion Engine
#[derive(Debug, Clone)]
pub struct PromotionEngine {
    currency: &'static Currency,
    message: String,
    excluded_variant_ids: Vec<String>,
    promotions: SlotMap<PromotionKey, Promotion<'static>>,
    promotion_meta: SecondaryMap<PromotionKey, PromotionMeta>,
}

/// The discount one promotion produced during an evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct PromotionOutcome {
    /// Key of the promotion
    pub promotion_key: PromotionKey,

    /// Bucket name
    pub name: String,

    /// Units in the bucket
    pub units: usize,

    /// Discount granted on the bucket
    pub discount: Money<'static, Currency>,
}

/// A full evaluation: the result for the host plus how it was reached.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Per-promotion outcomes, in configuration order
    pub outcomes: Vec<PromotionOutcome>,

    /// Sum of all promotion discounts
    pub total: Money<'static, Currency>,

    /// Result handed back to the host
    pub result: FunctionRunResult,
}

impl PromotionEngine {
    /// Build an engine from configuration, validating every promotion.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the currency is unsupported, a promotion
    /// name repeats, or a promotion cannot be resolved.
    pub fn new(config: &PromotionConfig) -> Result<Self, ConfigError> {
        let currency = config.currency()?;

        let mut promotions = SlotMap::with_capacity_and_key(config.promotions.len());
        let mut promotion_meta = SecondaryMap::with_capacity(config.promotions.len());
        let mut names = FxHashSet::default();

        for rule in &config.promotions {
            if !names.insert(rule.name.as_str()) {
                return Err(ConfigError::DuplicatePromotion(rule.name.clone()));
            }

            let key = promotions.try_insert_with_key(|key| {
                rule.try_into_promotion(key, &config.collections, currency)
            })?;

            promotion_meta.insert(
                key,
                PromotionMeta {
                    name: rule.name.clone(),
                },
            );
        }

        Ok(Self {
            currency,
            message: config.message.clone(),
            excluded_variant_ids: config.excluded_variant_ids.clone(),
            promotions,
            promotion_meta,
        })
    }

    /// Evaluate a cart and return the result for the host.
    pub fn evaluate(&self, input: &RunInput) -> FunctionRunResult {
        self.evaluate_with_breakdown(input).result
    }

    /// Evaluate a cart, keeping the per-promotion outcomes.
    #[tracing::instrument(skip_all, fields(lines = input.cart.lines.len()))]
    pub fn evaluate_with_breakdown(&self, input: &RunInput) -> Evaluation {
        let items = priced_items(&input.cart, self.currency);
        let buckets = expand(&items, &self.promotions);

        let outcomes: Vec<PromotionOutcome> = self
            .promotions
            .iter()
            .map(|(key, promotion)| {
                let bucket = buckets.get(key);
                let units = bucket.map_or(0, PriceBucket::len);
                let discount = promotion.discount(bucket.map_or(&[][..], PriceBucket::runs));
                let name = self
                    .promotion_meta
                    .get(key)
                    .map_or_else(String::new, |meta| meta.name.clone());

                debug!(
                    promotion = %name,
                    units,
                    discount = %format_amount(&discount),
                    "priced bucket"
                );

                PromotionOutcome {
                    promotion_key: key,
                    name,
                    units,
                    discount,
                }
            })
            .collect();

        let total_minor = outcomes
            .iter()
            .map(|outcome| outcome.discount.to_minor_units())
            .fold(0, i64::saturating_add);

        let total = Money::from_minor(total_minor, self.currency);

        let result = if total_minor > 0 {
            let amount = format_amount(&total);

            info!(%amount, "applying order discount");

            FunctionRunResult::single(Discount::fixed_amount_off_subtotal(
                amount,
                self.message.clone(),
                self.excluded_variant_ids.clone(),
            ))
        } else {
            info!("no discount");

            FunctionRunResult::empty()
        };

        Evaluation {
            outcomes,
            total,
            result,
        }
    }

    /// The currency every amount is expressed in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// The configured promotions.
    pub fn promotions(&self) -> &SlotMap<PromotionKey, Promotion<'static>> {
        &self.promotions
    }

    /// Metadata for a promotion.
    pub fn promotion_meta(&self, key: PromotionKey) -> Option<&PromotionMeta> {
        self.promotion_meta.get(key)
    }
}

/// Evaluate a cart with the default production configuration.
///
/// # Errors
///
/// Returns a [`ConfigError`] only if the built-in configuration is invalid.
pub fn run(input: &RunInput) -> Result<FunctionRunResult, ConfigError> {
    Ok(PromotionEngine::new(&PromotionConfig::default())?.evaluate(input))
}
