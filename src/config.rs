//! Allocation sizes for a [`Shapes`](crate::physics::collidables::shapes::Shapes) registry.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// The common set of allocation sizes for a shape registry.
///
/// Every field has a default, so a TOML document only needs to name the values it overrides:
///
/// ```
/// use bepu_collidables::config::ShapesConfig;
///
/// let config = ShapesConfig::from_toml_str("initial_capacity_per_type_batch = 512").unwrap();
/// assert_eq!(config.initial_capacity_per_type_batch, 512);
/// assert_eq!(config.initial_type_capacity, ShapesConfig::default().initial_type_capacity);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShapesConfig {
    /// Minimum number of shapes to allocate space for in each shape type batch.
    pub initial_capacity_per_type_batch: usize,
    /// Number of type slots to reserve in the registry's sparse batch table.
    /// The table still grows past this if a higher type id is registered.
    pub initial_type_capacity: usize,
    /// Number of returned compound child buffers the registry keeps for reuse before growing.
    pub child_buffer_pool_capacity: usize,
    /// Number of returned mesh triangle buffers the registry keeps for reuse before growing.
    pub triangle_buffer_pool_capacity: usize,
}

impl ShapesConfig {
    /// Constructs a description of registry allocations.
    pub fn new(
        initial_capacity_per_type_batch: usize,
        initial_type_capacity: usize,
        child_buffer_pool_capacity: usize,
        triangle_buffer_pool_capacity: usize,
    ) -> Self {
        Self {
            initial_capacity_per_type_batch,
            initial_type_capacity,
            child_buffer_pool_capacity,
            triangle_buffer_pool_capacity,
        }
    }

    /// Parses a config from a TOML document and validates it.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the sizes are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.child_buffer_pool_capacity == 0 {
            return Err(ConfigError::Invalid(
                "child_buffer_pool_capacity must be at least 1",
            ));
        }
        if self.triangle_buffer_pool_capacity == 0 {
            return Err(ConfigError::Invalid(
                "triangle_buffer_pool_capacity must be at least 1",
            ));
        }
        Ok(())
    }
}

impl Default for ShapesConfig {
    fn default() -> Self {
        Self {
            initial_capacity_per_type_batch: 128,
            initial_type_capacity: 16,
            child_buffer_pool_capacity: 16,
            triangle_buffer_pool_capacity: 16,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config = ShapesConfig::from_toml_str("").unwrap();
        assert_eq!(config, ShapesConfig::default());
    }

    #[test]
    fn overrides_named_fields() {
        let config = ShapesConfig::from_toml_str(
            "initial_type_capacity = 4\nchild_buffer_pool_capacity = 2\n",
        )
        .unwrap();
        assert_eq!(config.initial_type_capacity, 4);
        assert_eq!(config.child_buffer_pool_capacity, 2);
        assert_eq!(config.initial_capacity_per_type_batch, 128);
    }

    #[test]
    fn rejects_unknown_fields() {
        let error = ShapesConfig::from_toml_str("bodies = 10").unwrap_err();
        assert!(matches!(error, ConfigError::Parse(_)));
    }

    #[test]
    fn rejects_empty_pools() {
        let error = ShapesConfig::from_toml_str("triangle_buffer_pool_capacity = 0").unwrap_err();
        assert!(matches!(error, ConfigError::Invalid(_)));
    }
}
