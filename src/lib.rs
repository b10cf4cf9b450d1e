//! Compile-time-typed, trie-structured HTTP request router.
//!
//! A [`Pattern`] declares a URI shape whose typed captures fix the exact
//! parameter list of its handler; mismatched handlers fail to compile at
//! route construction. Registered routes fold into a decision trie that is
//! immutable after [`Router::new`] and safe to match from any number of
//! concurrent tasks.
//!
//! ```
//! use trellis::{get, root, Method, Router};
//!
//! let product = root()
//!     .seg("product")?
//!     .string()
//!     .end()
//!     .query_int("section")?;
//! let router = Router::new([get(product, |name: String, section: isize| {
//!     format!("{name} in section {section}")
//! })]);
//!
//! assert_eq!(
//!     router.match_route(&Method::Get, "/product/dyson350?section=2"),
//!     Some("dyson350 in section 2".to_string())
//! );
//! assert_eq!(router.match_route(&Method::Get, "/product/dyson350"), None);
//! # Ok::<(), trellis::PatternError>(())
//! ```

pub mod decoder;
mod error;
mod handler;
mod method;
mod pattern;
mod route;
mod router;
mod routing;

pub use decoder::Decoder;
pub use error::PatternError;
pub use handler::{Append, FromCaptures, Handler};
pub use method::Method;
pub use pattern::{root, PathBuilder, Pattern};
pub use route::{get, route, route_value, routes, Route};
pub use router::Router;
