//! Fixtures

use std::{fs, path::PathBuf};

use thiserror::Error;

use crate::{page::MemoryPage, quantities::QuantityMap};

pub mod pages;
pub mod quantity_maps;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Selector declared more than once in a page fixture
    #[error("Duplicate selector in page fixture: {0}")]
    DuplicateSelector(String),
}

/// Loads quantity maps and pages from a fixtures directory.
///
/// Quantity maps live in `<base>/quantity_maps/<name>.yml`, pages in
/// `<base>/pages/<name>.yml`.
#[derive(Debug, Clone)]
pub struct Fixture {
    base_path: PathBuf,
}

impl Fixture {
    /// Create a loader with the default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a loader with a custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Load a quantity map by name
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid YAML.
    pub fn quantity_map(&self, name: &str) -> Result<QuantityMap, FixtureError> {
        let contents = self.read("quantity_maps", name)?;

        quantity_maps::parse(&contents)
    }

    /// Load a page by name
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid YAML, or
    /// declares a selector twice.
    pub fn page(&self, name: &str) -> Result<MemoryPage, FixtureError> {
        let contents = self.read("pages", name)?;

        pages::parse(&contents)
    }

    fn read(&self, category: &str, name: &str) -> Result<String, FixtureError> {
        let file_path = self.base_path.join(category).join(format!("{name}.yml"));

        Ok(fs::read_to_string(file_path)?)
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
