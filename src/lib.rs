//! Shape storage and handle management for a rigid-body physics engine.
//!
//! Shapes of each type live densely packed in their own batch, and simulation code refers to
//! them through [`TypedIndex`], a single packed word naming the shape's type and slot. Slots
//! are recycled through [`IdPool`] free lists, and resource buffers owned by shapes are
//! recycled through [`ManagedPool`]s held by the [`Shapes`] registry.
//!
//! ```
//! use bepu_collidables::physics::collidables::{Shapes, Sphere};
//!
//! let mut shapes = Shapes::new(16);
//! let sphere = shapes.add(Sphere::new(0.5));
//! assert!(sphere.exists());
//! assert_eq!(shapes.get_shape::<Sphere>(sphere).radius, 0.5);
//! shapes.recursively_remove_and_dispose(sphere);
//! ```

pub mod config;
pub mod error;
pub mod physics;
pub mod utilities;

pub use config::ShapesConfig;
pub use error::{ConfigError, ShapeError};
pub use physics::collidables::{Shape, ShapeBatch, Shapes, TypedIndex};
pub use utilities::memory::{IdPool, ManagedPool};
