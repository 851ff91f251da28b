//! Error types for the fallible entry points.
//!
//! Misuse detected on the infallible paths (out-of-range handles, double returns, lookups of
//! unregistered types) panics instead; these errors exist for callers validating handles that
//! came from outside the process, such as deserialized scenes.

use thiserror::Error;

/// Errors raised while building or resolving shape handles.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// Type ids must fit in the 7 bits reserved for them.
    #[error("type id {type_id} does not fit in a typed index (maximum {max})", max = crate::physics::collidables::typed_index::MAX_TYPE_ID)]
    TypeIdOutOfRange {
        /// The rejected type id.
        type_id: usize,
    },
    /// Indices must fit in the 24 bits reserved for them.
    #[error("index {index} does not fit in a typed index (maximum {max})", max = crate::physics::collidables::typed_index::MAX_INDEX)]
    IndexOutOfRange {
        /// The rejected index.
        index: usize,
    },
    /// No batch has been registered for the type id.
    #[error("no shape batch is registered for type id {type_id}")]
    UnregisteredType {
        /// The type id that was looked up.
        type_id: usize,
    },
    /// The handle's type id belongs to a different shape type than the one requested.
    #[error("handle refers to shape type {actual}, not {expected}")]
    ShapeTypeMismatch {
        /// Type id of the requested shape type.
        expected: usize,
        /// Type id stored in the handle.
        actual: usize,
    },
    /// The batch registered under the type id stores a different Rust shape type.
    #[error("the batch registered for type id {type_id} stores a different shape type")]
    BatchTypeMismatch {
        /// Type id shared by the conflicting shape types.
        type_id: usize,
    },
    /// The handle's slot lies outside the batch's storage.
    #[error("slot {index} is outside the storage of shape type {type_id} (capacity {capacity})")]
    SlotOutOfRange {
        /// Type id of the batch.
        type_id: usize,
        /// The rejected slot.
        index: usize,
        /// Current capacity of the batch.
        capacity: usize,
    },
    /// The handle does not refer to anything.
    #[error("handle does not refer to a shape")]
    NullHandle,
}

/// Errors raised while loading a [`ShapesConfig`](crate::config::ShapesConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML document could not be parsed.
    #[error("failed to parse shapes config: {0}")]
    Parse(#[from] toml::de::Error),
    /// A field held a value the registry cannot work with.
    #[error("invalid shapes config: {0}")]
    Invalid(&'static str),
}
