//! Cheapest Free
//!
//! Promotions that give away one unit from every group of `size`, e.g.
//! "buy 4, the cheapest is free".

use rusty_money::{Money, iso::Currency};

use crate::{
    buckets::{PriceRun, total_units},
    collections::CollectionSet,
    promotions::{PromotionKey, run_total, saturate_minor, sorted_runs},
};

/// A Cheapest Free Promotion
#[derive(Debug, Clone)]
pub struct CheapestFreePromotion<'a> {
    key: PromotionKey,
    collections: CollectionSet,
    size: usize,
    currency: &'a Currency,
}

impl<'a> CheapestFreePromotion<'a> {
    /// Create a new cheapest free promotion.
    pub fn new(
        key: PromotionKey,
        collections: CollectionSet,
        size: usize,
        currency: &'a Currency,
    ) -> Self {
        Self {
            key,
            collections,
            size,
            currency,
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

    /// Return the group size
    pub fn size(&self) -> usize {
        self.size
    }

    /// Return the currency
    pub fn currency(&self) -> &'a Currency {
        self.currency
    }

    /// Calculate the discount on a bucket of unit prices.
    pub fn discount(&self, runs: &[PriceRun<'a>]) -> Money<'a, Currency> {
        cheapest_free_discount(runs, self.size, self.currency)
    }
}

/// Calculate the saving from one free unit per group of `size`.
///
/// Units are ordered cheapest first and walked in strides of `size` from the
/// front: the units at positions `0, size, 2 * size, ..` are free, one per
/// complete group. Fewer than `size` units, or a `size` of zero, yields no
/// discount.
pub fn cheapest_free_discount<'a>(
    runs: &[PriceRun<'a>],
    size: usize,
    currency: &'a Currency,
) -> Money<'a, Currency> {
    let groups = total_units(runs).checked_div(size).unwrap_or(0);

    if groups == 0 {
        return Money::from_minor(0, currency);
    }

    let limit = groups.saturating_mul(size);
    let mut start = 0_usize;
    let mut free: i128 = 0;

    for (minor_units, units) in sorted_runs(runs) {
        if start >= limit {
            break;
        }

        // Free positions in [start, end) are the multiples of `size`.
        let end = start.saturating_add(units).min(limit);
        let free_units = end.div_ceil(size) - start.div_ceil(size);

        free = free.saturating_add(run_total(minor_units, free_units));
        start = end;
    }

    Money::from_minor(saturate_minor(free), currency)
}
