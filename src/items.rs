//! Items
//!
//! Priced cart lines: the subset of a cart that can take part in a
//! collection promotion, with the unit price parsed and the product's
//! collection memberships collected into a [`CollectionSet`].

use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use tracing::debug;

use crate::{cart::Cart, collections::CollectionSet, pricing::parse_amount};

/// A priced cart line.
#[derive(Clone, Debug, PartialEq)]
pub struct Item<'a> {
    price: Money<'a, Currency>,
    quantity: usize,
    collections: CollectionSet,
}

impl<'a> Item<'a> {
    /// Creates a new item.
    pub fn new(price: Money<'a, Currency>, quantity: usize, collections: CollectionSet) -> Self {
        Self {
            price,
            quantity,
            collections,
        }
    }

    /// Returns the price of one unit.
    pub fn price(&self) -> &Money<'a, Currency> {
        &self.price
    }

    /// Number of units on the line.
    pub fn quantity(&self) -> usize {
        self.quantity
    }

    /// Collections the product is a member of.
    pub fn collections(&self) -> &CollectionSet {
        &self.collections
    }
}

/// Collect the cart lines that can take part in a collection promotion.
///
/// Lines are dropped (never rejected) when they carry no units, when the
/// merchandise is not a product variant, when the product is a member of no
/// collection, or when the unit price does not parse.
pub fn priced_items<'a>(cart: &Cart, currency: &'a Currency) -> SmallVec<[Item<'a>; 10]> {
    cart.lines
        .iter()
        .enumerate()
        .filter_map(|(line, cart_line)| {
            let quantity = cart_line.units();

            if quantity == 0 {
                debug!(line, quantity = cart_line.quantity, "skipping line without units");
                return None;
            }

            let Some(product) = cart_line.merchandise.product() else {
                debug!(line, "skipping line without a product");
                return None;
            };

            let collections: CollectionSet = product.member_collections().collect();

            if collections.is_empty() {
                return None;
            }

            match parse_amount(cart_line.amount_per_quantity(), currency) {
                Ok(price) => Some(Item::new(price, quantity, collections)),
                Err(error) => {
                    debug!(line, %error, "skipping line with unusable price");
                    None
                }
            }
        })
        .collect()
}
