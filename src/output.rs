//! Output
//!
//! The discount decision handed back to the host, shaped like the host's JSON
//! output (`camelCase` fields, upper-case strategy names).

use serde::Serialize;

/// How the host combines discounts returned by this function.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountApplicationStrategy {
    /// Only the first eligible discount applies.
    #[default]
    First,
}

/// Result of one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionRunResult {
    /// Application strategy; always [`DiscountApplicationStrategy::First`] here.
    pub discount_application_strategy: DiscountApplicationStrategy,

    /// Zero or one discounts.
    pub discounts: Vec<Discount>,
}

impl FunctionRunResult {
    /// The explicit "no discount" result.
    pub fn empty() -> Self {
        Self {
            discount_application_strategy: DiscountApplicationStrategy::First,
            discounts: Vec::new(),
        }
    }

    /// A result carrying a single discount.
    pub fn single(discount: Discount) -> Self {
        Self {
            discount_application_strategy: DiscountApplicationStrategy::First,
            discounts: vec![discount],
        }
    }

    /// Check if no discount is applied.
    pub fn is_empty(&self) -> bool {
        self.discounts.is_empty()
    }
}

/// An order-level discount.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Discount {
    /// How much is taken off.
    pub value: Value,

    /// Message shown to the customer.
    pub message: String,

    /// What the discount applies to.
    pub targets: Vec<Target>,
}

impl Discount {
    /// A fixed-amount discount on the order subtotal, excluding `excluded_variant_ids`.
    pub fn fixed_amount_off_subtotal(
        amount: String,
        message: impl Into<String>,
        excluded_variant_ids: Vec<String>,
    ) -> Self {
        Self {
            value: Value::FixedAmount { amount },
            message: message.into(),
            targets: vec![Target::OrderSubtotal {
                excluded_variant_ids,
            }],
        }
    }

    /// The fixed amount taken off.
    pub fn fixed_amount(&self) -> Option<&str> {
        let Value::FixedAmount { amount } = &self.value;

        Some(amount)
    }
}

/// Discount value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Value {
    /// A fixed amount, as a two-place decimal string.
    FixedAmount {
        /// Decimal amount, e.g. `"270.10"`.
        amount: String,
    },
}

/// Discount target
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Target {
    /// The order subtotal, less the excluded variants.
    #[serde(rename_all = "camelCase")]
    OrderSubtotal {
        /// Variants whose lines never count toward the discounted subtotal.
        excluded_variant_ids: Vec<String>,
    },
}
