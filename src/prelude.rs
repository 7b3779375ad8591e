//! Plie Discounts prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    buckets::{PriceBucket, PriceRun, expand},
    cart::{Cart, CartLine, CollectionMembership, Merchandise, Product, RunInput},
    collections::CollectionSet,
    config::{ConfigError, PromotionConfig, PromotionRuleConfig, RuleConfig},
    engine::{Evaluation, PromotionEngine, PromotionOutcome, run},
    items::Item,
    output::{Discount, DiscountApplicationStrategy, FunctionRunResult, Target, Value},
    pricing::{AmountError, format_amount, parse_amount},
    promotions::{
        Promotion, PromotionKey, PromotionMeta,
        bundle_price::{BundlePricePromotion, bundle_discount},
        cheapest_free::{CheapestFreePromotion, cheapest_free_discount},
    },
};
