//! Memory management utilities for high-performance physics simulation.
//!
//! Free-list allocators that recycle identifiers and objects so that steady-state simulation
//! does not churn the global allocator.

pub mod id_pool;
pub mod managed_pool;

pub use id_pool::IdPool;
pub use managed_pool::ManagedPool;
