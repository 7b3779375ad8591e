//! Plie Discounts
//!
//! Collection-based tiered order discounts for a checkout discount function.
//!
//! A cart snapshot is expanded into per-promotion price buckets (runs of
//! units at one price, grouped by the collections each product belongs to), each
//! bucket is priced by its tier rule, and the results are folded into a single
//! fixed-amount order discount or an explicit "no discount" result.

pub mod buckets;
pub mod cart;
pub mod collections;
pub mod config;
pub mod engine;
pub mod fixtures;
pub mod items;
pub mod output;
pub mod prelude;
pub mod pricing;
pub mod promotions;
pub mod utils;
