//! Platform handler module
//!
//! Defines the handler trait and the registry that maps platform identifiers
//! to the storefront scrapers.

mod loader;
mod registry;
mod traits;

// Storefront implementations
pub mod amazon;
pub mod ebay;
pub mod flipkart;

pub use loader::PlatformLoader;
pub use registry::PlatformRegistry;
pub use traits::*;
