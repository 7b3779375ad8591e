//! Fixtures
//!
//! Named YAML fixture sets for tests and demos:
//!
//! - `<base>/config/<name>.yml`: a [`PromotionConfig`]
//! - `<base>/carts/<name>.yml`: a cart whose products reference collections by
//!   the aliases defined in the loaded configuration

use std::{fs, path::PathBuf};

use thiserror::Error;

use crate::{
    cart::RunInput,
    config::{ConfigError, PromotionConfig},
    engine::PromotionEngine,
    fixtures::carts::CartFixture,
};

pub mod carts;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid promotion configuration
    #[error("Invalid promotion configuration: {0}")]
    Config(#[from] ConfigError),

    /// A cart line references a collection alias the configuration does not define
    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    /// No configuration loaded yet
    #[error("No configuration loaded yet; collection aliases unknown")]
    NoConfig,

    /// No cart loaded
    #[error("No cart loaded")]
    NoCart,
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Loaded promotion configuration
    config: Option<PromotionConfig>,

    /// Loaded cart
    input: Option<RunInput>,
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            config: None,
            input: None,
        }
    }

    /// Load a promotion configuration from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_config(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("config").join(format!("{name}.yml"));

        self.config = Some(PromotionConfig::from_path(file_path)?);

        Ok(self)
    }

    /// Use an in-memory configuration instead of a fixture file
    pub fn with_config(&mut self, config: PromotionConfig) -> &mut Self {
        self.config = Some(config);

        self
    }

    /// Load a cart from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if no
    /// configuration has been loaded, or if a line references an unknown
    /// collection alias.
    pub fn load_cart(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let config = self.config.as_ref().ok_or(FixtureError::NoConfig)?;

        let file_path = self.base_path.join("carts").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: CartFixture = serde_norway::from_str(&contents)?;

        self.input = Some(RunInput::new(fixture.try_into_cart(&config.collections)?));

        Ok(self)
    }

    /// Load a complete fixture set (configuration and cart with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_config(name)?.load_cart(name)?;

        Ok(fixture)
    }

    /// Get the loaded configuration
    ///
    /// # Errors
    ///
    /// Returns an error if no configuration has been loaded.
    pub fn config(&self) -> Result<&PromotionConfig, FixtureError> {
        self.config.as_ref().ok_or(FixtureError::NoConfig)
    }

    /// Get the loaded cart as evaluation input
    ///
    /// # Errors
    ///
    /// Returns an error if no cart has been loaded.
    pub fn input(&self) -> Result<&RunInput, FixtureError> {
        self.input.as_ref().ok_or(FixtureError::NoCart)
    }

    /// Build an engine from the loaded configuration
    ///
    /// # Errors
    ///
    /// Returns an error if no configuration has been loaded or it is invalid.
    pub fn engine(&self) -> Result<PromotionEngine, FixtureError> {
        Ok(PromotionEngine::new(self.config()?)?)
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
