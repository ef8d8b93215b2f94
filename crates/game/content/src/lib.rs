//! Data-driven island content and loaders.
//!
//! This crate reads island content from data files:
//! - Generator configuration (TOML)
//! - Hand-authored island layouts (RON)
//! - Raw feature entries (JSON), normalized leniently
//!
//! The built-in surface layout ships embedded so callers work without a data
//! directory. All loaders use island-core types directly with serde.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, FeatureLoader, LayoutLoader, LoadResult};
