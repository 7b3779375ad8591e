//! Promotions
//!
//! Tier rules that price a single bucket of unit prices.

use rusty_money::{Money, iso::Currency};
use slotmap::new_key_type;

use crate::{
    buckets::PriceRun,
    collections::CollectionSet,
    promotions::{bundle_price::BundlePricePromotion, cheapest_free::CheapestFreePromotion},
};

pub mod bundle_price;
pub mod cheapest_free;

new_key_type! {
    /// Promotion Key
    pub struct PromotionKey;
}

/// Promotion metadata
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromotionMeta {
    /// Bucket name, e.g. `basicAmazoniaCombined`.
    pub name: String,
}

/// Promotion enum
#[derive(Debug, Clone)]
pub enum Promotion<'a> {
    /// Every `size` units cost a fixed bundle price.
    BundlePrice(BundlePricePromotion<'a>),

    /// The cheapest unit of every `size` is free.
    CheapestFree(CheapestFreePromotion<'a>),
}

impl<'a> Promotion<'a> {
    /// Return the promotion key.
    pub fn key(&self) -> PromotionKey {
        match self {
            Promotion::BundlePrice(bundle_price) => bundle_price.key(),
            Promotion::CheapestFree(cheapest_free) => cheapest_free.key(),
        }
    }

    /// Return the collections whose units feed this promotion's bucket.
    pub fn collections(&self) -> &CollectionSet {
        match self {
            Promotion::BundlePrice(bundle_price) => bundle_price.collections(),
            Promotion::CheapestFree(cheapest_free) => cheapest_free.collections(),
        }
    }

    /// Return the currency the promotion is priced in.
    pub fn currency(&self) -> &'a Currency {
        match self {
            Promotion::BundlePrice(bundle_price) => bundle_price.price().currency(),
            Promotion::CheapestFree(cheapest_free) => cheapest_free.currency(),
        }
    }

    /// Calculate the discount this promotion grants on a bucket of unit prices.
    pub fn discount(&self, runs: &[PriceRun<'a>]) -> Money<'a, Currency> {
        match self {
            Promotion::BundlePrice(bundle_price) => bundle_price.discount(runs),
            Promotion::CheapestFree(cheapest_free) => cheapest_free.discount(runs),
        }
    }
}

/// Runs as `(minor units per unit, units)`, cheapest first.
pub(crate) fn sorted_runs(runs: &[PriceRun<'_>]) -> Vec<(i64, usize)> {
    let mut sorted: Vec<(i64, usize)> = runs
        .iter()
        .map(|run| (run.price().to_minor_units(), run.units()))
        .collect();

    sorted.sort_unstable();

    sorted
}

/// Price of `units` units at `minor_units` each.
pub(crate) fn run_total(minor_units: i64, units: usize) -> i128 {
    i128::try_from(units)
        .unwrap_or(i128::MAX)
        .saturating_mul(i128::from(minor_units))
}

/// Narrow a minor-unit amount to `i64`, saturating at the bounds.
pub(crate) fn saturate_minor(amount: i128) -> i64 {
    i64::try_from(amount).unwrap_or(if amount < 0 { i64::MIN } else { i64::MAX })
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::BRL;
    use slotmap::SlotMap;

    use super::*;

    fn runs(minor_units: &[i64]) -> Vec<PriceRun<'static>> {
        minor_units
            .iter()
            .map(|minor| PriceRun::new(Money::from_minor(*minor, BRL), 1))
            .collect()
    }

    #[test]
    fn key_delegates_to_inner_promotion_key() {
        // Generate non-default keys so returning `Default::default()` is detectable.
        let mut keys = SlotMap::<PromotionKey, ()>::with_key();
        let bundle_key = keys.insert(());
        let free_key = keys.insert(());

        let bundle = Promotion::BundlePrice(BundlePricePromotion::new(
            bundle_key,
            CollectionSet::from_strs(&["cueca"]),
            3,
            Money::from_minor(17990, BRL),
        ));

        let free = Promotion::CheapestFree(CheapestFreePromotion::new(
            free_key,
            CollectionSet::from_strs(&["amazonia"]),
            4,
            BRL,
        ));

        assert_eq!(bundle.key(), bundle_key);
        assert_eq!(free.key(), free_key);
        assert_ne!(bundle.key(), PromotionKey::default());
    }

    #[test]
    fn collections_and_currency_delegate_to_inner_promotion() {
        let free = Promotion::CheapestFree(CheapestFreePromotion::new(
            PromotionKey::default(),
            CollectionSet::from_strs(&["amazonia"]),
            4,
            BRL,
        ));

        assert!(free.collections().contains("amazonia"));
        assert_eq!(free.currency(), BRL);
    }

    #[test]
    fn discount_delegates_to_inner_promotion() {
        let bundle = Promotion::BundlePrice(BundlePricePromotion::new(
            PromotionKey::default(),
            CollectionSet::from_strs(&["cueca"]),
            3,
            Money::from_minor(17990, BRL),
        ));

        let free = Promotion::CheapestFree(CheapestFreePromotion::new(
            PromotionKey::default(),
            CollectionSet::from_strs(&["amazonia"]),
            4,
            BRL,
        ));

        assert_eq!(
            bundle.discount(&runs(&[10000, 15000, 20000])),
            Money::from_minor(27010, BRL)
        );
        assert_eq!(
            free.discount(&runs(&[5000, 6000, 7000, 8000])),
            Money::from_minor(5000, BRL)
        );
    }

    #[test]
    fn sorted_runs_orders_cheapest_first() {
        let runs = [
            PriceRun::new(Money::from_minor(300, BRL), 1),
            PriceRun::new(Money::from_minor(100, BRL), 4),
            PriceRun::new(Money::from_minor(200, BRL), 2),
        ];

        assert_eq!(sorted_runs(&runs), vec![(100, 4), (200, 2), (300, 1)]);
    }

    #[test]
    fn run_totals_saturate_into_minor_units() {
        assert_eq!(run_total(17990, 3), 53970);
        assert_eq!(saturate_minor(run_total(10000, usize::MAX)), i64::MAX);
        assert_eq!(saturate_minor(-run_total(10000, usize::MAX)), i64::MIN);
        assert_eq!(saturate_minor(-5), -5);
    }
}
