//! Errors and warnings reported by the client pipeline.
//!
//! Every failure is a [`RequestError`] tagged with an [`ErrorKind`]. Kinds are
//! grouped into [`Class`]es that overlap: a connect timeout is both a transport
//! failure and a timeout, a malformed proxy url is both a usage error and an
//! invalid url. Catch at the class you care about:
//!
//! ```
//! use micro_client::error::{Class, ErrorKind, RequestError};
//!
//! let error: RequestError = RequestError::new(ErrorKind::ConnectTimeout, "connect timed out");
//!
//! if error.is_a(Class::Transport) {
//!     // safe to retry on another connection
//! }
//! assert!(error.is_timeout());
//! ```
//!
//! Warnings are a separate, non fatal channel, see [`warn`].

mod kind;
pub use kind::Class;
pub use kind::ErrorKind;

mod request_error;
pub use request_error::RequestError;
pub use request_error::RequestErrorBuilder;
pub use request_error::ResponseContext;

mod warning;
pub use warning::WarningKind;
pub use warning::warn;
