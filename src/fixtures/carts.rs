//! Cart Fixtures

use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::{
    cart::{Cart, CartLine},
    fixtures::FixtureError,
};

/// Wrapper for a cart in YAML
#[derive(Debug, Deserialize)]
pub struct CartFixture {
    /// Cart lines
    pub lines: Vec<LineFixture>,
}

/// Cart line fixture from YAML
#[derive(Debug, Deserialize)]
pub struct LineFixture {
    /// Variant identifier; lines without one are non-product merchandise
    #[serde(default)]
    pub variant: Option<String>,

    /// Per-unit price (e.g., "59.90")
    pub price: String,

    /// Units on the line
    pub quantity: i64,

    /// Collection aliases the product is a member of
    #[serde(default)]
    pub collections: Vec<String>,
}

impl CartFixture {
    /// Convert to a [`Cart`], resolving collection aliases to identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::CollectionNotFound`] if an alias is not in `aliases`.
    pub fn try_into_cart(self, aliases: &FxHashMap<String, String>) -> Result<Cart, FixtureError> {
        let lines = self
            .lines
            .into_iter()
            .map(|line| line.try_into_line(aliases))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Cart::with_lines(lines))
    }
}

impl LineFixture {
    fn try_into_line(self, aliases: &FxHashMap<String, String>) -> Result<CartLine, FixtureError> {
        let Some(variant) = self.variant else {
            return Ok(CartLine::other(self.price, self.quantity));
        };

        let ids = self
            .collections
            .iter()
            .map(|alias| {
                aliases
                    .get(alias)
                    .map(String::as_str)
                    .ok_or_else(|| FixtureError::CollectionNotFound(alias.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CartLine::variant(variant, self.price, self.quantity).with_collections(&ids))
    }
}
