//! Buckets
//!
//! Line expansion: every priced cart line contributes its units, once per
//! promotion it qualifies for, to that promotion's price bucket.
//!
//! A unit qualifies for a promotion when its product is a member of any of
//! the promotion's collections. Buckets are independent, so a unit whose
//! product sits in two tracked collections lands in both buckets and is
//! priced by both rules.
//!
//! Units are kept as runs of `(price, units)` rather than one entry per unit,
//! so a bucket's size follows the number of cart lines, not their quantities.

use rusty_money::{Money, iso::Currency};
use slotmap::{SecondaryMap, SlotMap};

use crate::{
    items::Item,
    promotions::{Promotion, PromotionKey},
};

/// A number of units sharing one unit price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRun<'a> {
    price: Money<'a, Currency>,
    units: usize,
}

impl<'a> PriceRun<'a> {
    /// Create a run of `units` units at `price`.
    pub fn new(price: Money<'a, Currency>, units: usize) -> Self {
        Self { price, units }
    }

    /// Price of one unit.
    pub fn price(&self) -> &Money<'a, Currency> {
        &self.price
    }

    /// Number of units in the run.
    pub fn units(&self) -> usize {
        self.units
    }
}

/// The unit prices gathered for one promotion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceBucket<'a> {
    runs: Vec<PriceRun<'a>>,
}

impl<'a> PriceBucket<'a> {
    /// Create an empty bucket.
    pub fn new() -> Self {
        Self { runs: Vec::new() }
    }

    /// Add `quantity` units at `price`.
    pub fn push_units(&mut self, price: Money<'a, Currency>, quantity: usize) {
        if quantity > 0 {
            self.runs.push(PriceRun::new(price, quantity));
        }
    }

    /// The runs of units, in insertion order.
    pub fn runs(&self) -> &[PriceRun<'a>] {
        &self.runs
    }

    /// Number of units in the bucket, saturating at `usize::MAX`.
    pub fn len(&self) -> usize {
        total_units(&self.runs)
    }

    /// Check if the bucket is empty.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

/// Count the units across `runs`, saturating at `usize::MAX`.
pub fn total_units(runs: &[PriceRun<'_>]) -> usize {
    runs.iter()
        .map(PriceRun::units)
        .fold(0, usize::saturating_add)
}

/// Build one price bucket per promotion from the priced cart items.
///
/// Every promotion gets a bucket, empty or not.
pub fn expand<'a>(
    items: &[Item<'a>],
    promotions: &SlotMap<PromotionKey, Promotion<'a>>,
) -> SecondaryMap<PromotionKey, PriceBucket<'a>> {
    let mut buckets = SecondaryMap::with_capacity(promotions.len());

    for (key, promotion) in promotions {
        let mut bucket = PriceBucket::new();

        items
            .iter()
            .filter(|item| item.collections().intersects(promotion.collections()))
            .for_each(|item| bucket.push_units(*item.price(), item.quantity()));

        buckets.insert(key, bucket);
    }

    buckets
}
