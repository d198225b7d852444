//! # openheart-service
//!
//! Application layer composing the lexicon, a counter store, and
//! per-endpoint policy into the OpenHeart reaction protocol:
//!
//! - [`ReactionRegistry`] - read/react operations over one store + policy.
//! - [`SlugResolver`] - maps (endpoint, route values) to a durable slug,
//!   with custom slug functions and a "not reactable" sentinel.
//! - [`OpenHeart`] - the facade an application embeds; built once, threaded
//!   explicitly to whatever composes routes.

pub mod error;
pub mod openheart;
pub mod registry;
pub mod resolver;

pub use error::{ServiceError, ServiceResult};
pub use openheart::{EndpointOptions, OpenHeart, OpenHeartBuilder, DEFAULT_DATABASE_URI, DEFAULT_NAMESPACE};
pub use registry::ReactionRegistry;
pub use resolver::{RouteValues, SlugFn, SlugResolver};
