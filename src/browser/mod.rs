//! Browser module
//!
//! Seams for contexts and pages, the fixed identity applied to each page,
//! the per-request lease, and the Chromium implementation.

mod chromium;
mod identity;
mod lease;
#[cfg(test)]
pub(crate) mod mock;
mod traits;

pub use chromium::ChromiumProvider;
pub use identity::{identity_headers, ACCEPT_LANGUAGE, USER_AGENT, VIEWPORT};
pub use lease::PageLease;
pub use traits::*;
