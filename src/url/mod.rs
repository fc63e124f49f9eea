//! URL handling module for Webmap
//!
//! Pure helpers with no shared state: reference resolution into canonical
//! (absolute, fragment-free) URLs, and host matching used to keep link
//! following on the seed's site.
//!
//! Canonical URLs are compared by their string form everywhere in the crate:
//! two URLs name the same page iff `a.as_str() == b.as_str()`.

mod domain;
mod normalize;

pub use domain::same_host;
pub use normalize::{canonicalize, resolve};
