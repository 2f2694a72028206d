//! URL handling: seed normalization and origin scoping
//!
//! The crawler is bounded to the host of its seed URL. This module turns
//! whatever the operator typed into a usable absolute URL and provides the
//! host comparison that enforces the same-origin policy.

mod domain;
mod normalize;

pub use domain::{extract_host, same_host};
pub use normalize::normalize_seed;
