//! Bundle Price
//!
//! Promotions that sell every `size` qualifying units for a fixed total,
//! e.g. "any 3 for 179.90". Units are bundled cheapest first; units left over
//! once the bucket no longer fills a whole bundle pay full price.

use rusty_money::{Money, iso::Currency};

use crate::{
    buckets::{PriceRun, total_units},
    collections::CollectionSet,
    promotions::{PromotionKey, run_total, saturate_minor, sorted_runs},
};

/// A Bundle Price Promotion
#[derive(Debug, Clone)]
pub struct BundlePricePromotion<'a> {
    key: PromotionKey,
    collections: CollectionSet,
    size: usize,
    price: Money<'a, Currency>,
}

impl<'a> BundlePricePromotion<'a> {
    /// Create a new bundle price promotion.
    pub fn new(
        key: PromotionKey,
        collections: CollectionSet,
        size: usize,
        price: Money<'a, Currency>,
    ) -> Self {
        Self {
            key,
            collections,
            size,
            price,
        }
    }

    /// Return the promotion key
    pub fn key(&self) -> PromotionKey {
        self.key
    }

    /// Return the collections feeding the bucket
    pub fn collections(&self) -> &CollectionSet {
        &self.collections
    }

    /// Return the bundle size
    pub fn size(&self) -> usize {
        self.size
    }

    /// Return the price of one full bundle
    pub fn price(&self) -> &Money<'a, Currency> {
        &self.price
    }

    /// Calculate the discount on a bucket of unit prices.
    pub fn discount(&self, runs: &[PriceRun<'a>]) -> Money<'a, Currency> {
        bundle_discount(runs, self.size, self.price)
    }
}

/// Calculate the saving from selling every `size` units for `bundle_price`.
///
/// Units are taken cheapest first and the cheapest `size * bundles` are
/// bundled, where `bundles = units / size`. The discount is their summed price
/// less `bundles * bundle_price`, floored at zero so a bundle priced above
/// its contents never raises the price. Fewer than `size` units, or a `size`
/// of zero, yields no discount.
pub fn bundle_discount<'a>(
    runs: &[PriceRun<'a>],
    size: usize,
    bundle_price: Money<'a, Currency>,
) -> Money<'a, Currency> {
    let currency = bundle_price.currency();

    let bundles = total_units(runs).checked_div(size).unwrap_or(0);

    if bundles == 0 {
        return Money::from_minor(0, currency);
    }

    let mut remaining = bundles.saturating_mul(size);
    let mut considered: i128 = 0;

    for (minor_units, units) in sorted_runs(runs) {
        if remaining == 0 {
            break;
        }

        let taken = units.min(remaining);

        remaining -= taken;
        considered = considered.saturating_add(run_total(minor_units, taken));
    }

    let bundled = run_total(bundle_price.to_minor_units(), bundles);

    Money::from_minor(
        saturate_minor(considered.saturating_sub(bundled).max(0)),
        currency,
    )
}
