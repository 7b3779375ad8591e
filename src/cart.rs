//! Cart
//!
//! The cart snapshot handed to a discount evaluation. Field names follow the
//! host's JSON input (`camelCase`, `__typename` on merchandise) so a snapshot
//! deserialises directly. Every field is optional on the wire; anything
//! missing falls back to a value that contributes nothing to a discount.

use serde::Deserialize;

/// Top-level input for one evaluation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RunInput {
    /// The cart being evaluated.
    pub cart: Cart,
}

impl RunInput {
    /// Wrap a cart as evaluation input.
    pub fn new(cart: Cart) -> Self {
        Self { cart }
    }

    /// Parse evaluation input from the host's JSON representation.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if the document is not valid JSON or
    /// does not have the shape of a cart snapshot.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Cart
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Cart {
    /// Cart lines, in host order.
    pub lines: Vec<CartLine>,
}

impl Cart {
    /// Create a cart from its lines.
    pub fn with_lines(lines: impl Into<Vec<CartLine>>) -> Self {
        Self {
            lines: lines.into(),
        }
    }
}

/// A single cart line.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CartLine {
    /// Units on the line. Zero or negative quantities contribute nothing.
    pub quantity: i64,

    /// Line cost.
    pub cost: CartLineCost,

    /// What is being bought.
    pub merchandise: Merchandise,
}

impl CartLine {
    /// Create a product-variant line with a per-unit amount and no collections.
    pub fn variant(
        id: impl Into<String>,
        amount_per_quantity: impl Into<String>,
        quantity: i64,
    ) -> Self {
        Self {
            quantity,
            cost: CartLineCost {
                amount_per_quantity: MoneyV2 {
                    amount: amount_per_quantity.into(),
                },
            },
            merchandise: Merchandise::ProductVariant {
                id: id.into(),
                product: Some(Product::default()),
            },
        }
    }

    /// Create a line whose merchandise is not a product variant.
    pub fn other(amount_per_quantity: impl Into<String>, quantity: i64) -> Self {
        Self {
            quantity,
            cost: CartLineCost {
                amount_per_quantity: MoneyV2 {
                    amount: amount_per_quantity.into(),
                },
            },
            merchandise: Merchandise::Other,
        }
    }

    /// Mark the line's product as a member of the given collections.
    #[must_use]
    pub fn with_collections(mut self, collection_ids: &[&str]) -> Self {
        if let Merchandise::ProductVariant { product, .. } = &mut self.merchandise {
            let product = product.get_or_insert_with(Product::default);

            product.in_collections.extend(
                collection_ids
                    .iter()
                    .map(|id| CollectionMembership::member(*id)),
            );
        }

        self
    }

    /// Record an explicit membership flag for the line's product.
    #[must_use]
    pub fn with_membership(mut self, collection_id: &str, is_member: bool) -> Self {
        if let Merchandise::ProductVariant { product, .. } = &mut self.merchandise {
            product
                .get_or_insert_with(Product::default)
                .in_collections
                .push(CollectionMembership {
                    collection_id: collection_id.to_string(),
                    is_member,
                });
        }

        self
    }

    /// Units on the line, with negative quantities treated as zero.
    pub fn units(&self) -> usize {
        usize::try_from(self.quantity).unwrap_or(0)
    }

    /// The per-unit amount as supplied by the host.
    pub fn amount_per_quantity(&self) -> &str {
        &self.cost.amount_per_quantity.amount
    }
}

/// Line cost
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CartLineCost {
    /// Cost of a single unit on the line.
    pub amount_per_quantity: MoneyV2,
}

/// A monetary amount as a decimal string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MoneyV2 {
    /// Decimal amount, e.g. `"179.90"`.
    pub amount: String,
}

/// The merchandise on a cart line.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(tag = "__typename")]
pub enum Merchandise {
    /// A product variant.
    ProductVariant {
        /// Variant identifier.
        #[serde(default)]
        id: String,

        /// The product the variant belongs to.
        #[serde(default)]
        product: Option<Product>,
    },

    /// Any other merchandise type.
    #[default]
    #[serde(other)]
    Other,
}

impl Merchandise {
    /// The product, when the merchandise is a product variant.
    pub fn product(&self) -> Option<&Product> {
        match self {
            Merchandise::ProductVariant { product, .. } => product.as_ref(),
            Merchandise::Other => None,
        }
    }
}

/// Product
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Product {
    /// Membership flags for the collections the host was asked about.
    pub in_collections: Vec<CollectionMembership>,
}

impl Product {
    /// Collection identifiers the product is actually a member of.
    pub fn member_collections(&self) -> impl Iterator<Item = &str> {
        self.in_collections
            .iter()
            .filter(|membership| membership.is_member)
            .map(|membership| membership.collection_id.as_str())
    }
}

/// Whether a product belongs to a collection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CollectionMembership {
    /// Collection identifier.
    pub collection_id: String,

    /// Membership flag; absent means "not a member".
    pub is_member: bool,
}

impl CollectionMembership {
    /// A positive membership of the given collection.
    pub fn member(collection_id: impl Into<String>) -> Self {
        Self {
            collection_id: collection_id.into(),
            is_member: true,
        }
    }
}
