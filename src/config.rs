//! Configuration
//!
//! The static data a deployment owns: which collections are tracked, how each
//! collection bucket is priced, the discount message and the variants that
//! never count toward the discounted subtotal.
//!
//! [`PromotionConfig::default`] carries the production values. Alternates are
//! loaded from YAML:
//!
//! ```yaml
//! currency: BRL
//! message: Promoções Especiais Pliê
//! collections:
//!   cueca: gid://shopify/Collection/477972005161
//! promotions:
//!   - name: cueca
//!     collections: [cueca]
//!     rule:
//!       type: bundle_price
//!       size: 3
//!       price: "179.90"
//! excluded_variant_ids: []
//! ```

use std::{fs, path::Path};

use rustc_hash::FxHashMap;
use rusty_money::{
    Money,
    iso::{BRL, Currency, EUR, GBP, USD},
};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    collections::CollectionSet,
    pricing::{AmountError, parse_minor_units},
    promotions::{
        Promotion, PromotionKey, bundle_price::BundlePricePromotion,
        cheapest_free::CheapestFreePromotion,
    },
};

const COLLECTION_CUECA: &str = "gid://shopify/Collection/477972005161";
const COLLECTION_SELF: &str = "gid://shopify/Collection/484968694057";
const COLLECTION_BASIC: &str = "gid://shopify/Collection/484968431913";
const COLLECTION_AMAZONIA: &str = "gid://shopify/Collection/485639684393";

const DISCOUNT_MESSAGE: &str = "Promoções Especiais Pliê";

const EXCLUDED_VARIANT_IDS: [&str; 7] = [
    "gid://shopify/ProductVariant/50166839673129",
    "gid://shopify/ProductVariant/50166839738665",
    "gid://shopify/ProductVariant/50166824698153",
    "gid://shopify/ProductVariant/50166735733033",
    "gid://shopify/ProductVariant/50064207446313",
    "gid://shopify/ProductVariant/50065676796201",
    "gid://shopify/ProductVariant/50065614176553",
];

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading a configuration file
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// A promotion's bundle price is not a valid amount
    #[error("Invalid price for promotion {promotion}: {source}")]
    InvalidPrice {
        /// Promotion name
        promotion: String,

        /// Underlying parse error
        source: AmountError,
    },

    /// A promotion groups units in zero-sized groups
    #[error("Promotion {0} must have a group size of at least 1")]
    InvalidSize(String),

    /// A promotion tracks no collections
    #[error("Promotion {0} does not track any collections")]
    NoCollections(String),

    /// A promotion references a collection alias that is not defined
    #[error("Promotion {promotion} references unknown collection {alias}")]
    UnknownCollection {
        /// Promotion name
        promotion: String,

        /// Undefined alias
        alias: String,
    },

    /// Two promotions share a name
    #[error("Duplicate promotion name: {0}")]
    DuplicatePromotion(String),
}

/// Promotion configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PromotionConfig {
    /// ISO currency code every amount is expressed in
    pub currency: String,

    /// Message attached to the discount
    pub message: String,

    /// Map of collection alias -> collection identifier
    pub collections: FxHashMap<String, String>,

    /// Tier rules, evaluated and summed in order
    pub promotions: Vec<PromotionRuleConfig>,

    /// Variants excluded from the discounted order subtotal
    #[serde(default)]
    pub excluded_variant_ids: Vec<String>,
}

/// One tier rule and the bucket it prices.
#[derive(Debug, Clone, Deserialize)]
pub struct PromotionRuleConfig {
    /// Bucket name
    pub name: String,

    /// Collection aliases whose units feed the bucket
    pub collections: Vec<String>,

    /// How the bucket is priced
    pub rule: RuleConfig,
}

/// Tier rule configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleConfig {
    /// Every `size` units cost `price` in total
    BundlePrice {
        /// Units per bundle
        #[serde(default = "default_bundle_size")]
        size: usize,

        /// Price of a full bundle (e.g. "179.90")
        price: String,
    },

    /// The cheapest unit of every `size` is free
    CheapestFree {
        /// Units per group
        #[serde(default = "default_group_size")]
        size: usize,
    },
}

fn default_bundle_size() -> usize {
    3
}

fn default_group_size() -> usize {
    4
}

impl PromotionConfig {
    /// Parse a configuration from a YAML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the document cannot be parsed.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_norway::from_str(yaml)?)
    }

    /// Load a configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }

    /// Resolve the configured currency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownCurrency`] for unsupported codes.
    pub fn currency(&self) -> Result<&'static Currency, ConfigError> {
        parse_currency(&self.currency)
    }
}

impl Default for PromotionConfig {
    fn default() -> Self {
        let collections = [
            ("cueca", COLLECTION_CUECA),
            ("self", COLLECTION_SELF),
            ("basic", COLLECTION_BASIC),
            ("amazonia", COLLECTION_AMAZONIA),
        ]
        .into_iter()
        .map(|(alias, id)| (alias.to_string(), id.to_string()))
        .collect();

        let bundle = |name: &str, price: &str| PromotionRuleConfig {
            name: name.to_string(),
            collections: vec![name.to_string()],
            rule: RuleConfig::BundlePrice {
                size: default_bundle_size(),
                price: price.to_string(),
            },
        };

        Self {
            currency: BRL.iso_alpha_code.to_string(),
            message: DISCOUNT_MESSAGE.to_string(),
            collections,
            promotions: vec![
                bundle("cueca", "179.90"),
                bundle("self", "179.90"),
                bundle("basic", "139.90"),
                // Only `amazonia` feeds the combined bucket; `basic` units that are
                // also in `amazonia` are priced by both this rule and `basic`.
                PromotionRuleConfig {
                    name: "basicAmazoniaCombined".to_string(),
                    collections: vec!["amazonia".to_string()],
                    rule: RuleConfig::CheapestFree {
                        size: default_group_size(),
                    },
                },
            ],
            excluded_variant_ids: EXCLUDED_VARIANT_IDS
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

impl PromotionRuleConfig {
    /// Resolve the rule into a promotion.
    ///
    /// # Errors
    ///
    /// Returns an error if an alias is undefined, no collections are tracked,
    /// the group size is zero or the bundle price is invalid.
    pub fn try_into_promotion(
        &self,
        key: PromotionKey,
        aliases: &FxHashMap<String, String>,
        currency: &'static Currency,
    ) -> Result<Promotion<'static>, ConfigError> {
        if self.collections.is_empty() {
            return Err(ConfigError::NoCollections(self.name.clone()));
        }

        let collections = self
            .collections
            .iter()
            .map(|alias| {
                aliases
                    .get(alias)
                    .map(String::as_str)
                    .ok_or_else(|| ConfigError::UnknownCollection {
                        promotion: self.name.clone(),
                        alias: alias.clone(),
                    })
            })
            .collect::<Result<CollectionSet, _>>()?;

        match &self.rule {
            RuleConfig::BundlePrice { size, price } => {
                let size = self.checked_size(*size)?;
                let minor_units =
                    parse_minor_units(price).map_err(|source| ConfigError::InvalidPrice {
                        promotion: self.name.clone(),
                        source,
                    })?;

                Ok(Promotion::BundlePrice(BundlePricePromotion::new(
                    key,
                    collections,
                    size,
                    Money::from_minor(minor_units, currency),
                )))
            }
            RuleConfig::CheapestFree { size } => {
                let size = self.checked_size(*size)?;

                Ok(Promotion::CheapestFree(CheapestFreePromotion::new(
                    key,
                    collections,
                    size,
                    currency,
                )))
            }
        }
    }

    fn checked_size(&self, size: usize) -> Result<usize, ConfigError> {
        if size == 0 {
            Err(ConfigError::InvalidSize(self.name.clone()))
        } else {
            Ok(size)
        }
    }
}

/// Parse an ISO currency code.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownCurrency`] for codes other than BRL, USD, EUR and GBP.
pub fn parse_currency(code: &str) -> Result<&'static Currency, ConfigError> {
    match code.trim() {
        "BRL" => Ok(BRL),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        "GBP" => Ok(GBP),
        other => Err(ConfigError::UnknownCurrency(other.to_string())),
    }
}
