//! The error reporting and extension substrate of the micro http client
//!
//! This crate does not talk to the network. It defines the shapes the request
//! pipeline (connection pool, redirect handling, body decoding) builds on:
//!
//! - [`error`]: the error taxonomy, [`error::RequestError`] tagged with an
//!   [`error::ErrorKind`], classified along overlapping [`error::Class`]es, plus
//!   non fatal warnings reported through `tracing`
//! - [`hooks`]: the hook registry and the dispatcher that threads a value
//!   through the registered callbacks
//! - [`text`]: helpers turning header and url bytes into the native string
//!
//! # Example
//!
//! ```
//! use http::{Extensions, Response, StatusCode};
//! use micro_client::error::{Class, ErrorKind, RequestError};
//! use micro_client::hooks::{default_hooks, hook_fn, HookEvent};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Prepared(&'static str);
//!
//! let mut hooks = default_hooks();
//! hooks.register(
//!     HookEvent::Response,
//!     hook_fn(|response: &Response<()>, _: &Extensions| {
//!         let mut replaced = Response::new(());
//!         *replaced.status_mut() = StatusCode::BAD_GATEWAY;
//!         replaced.extensions_mut().insert(response.extensions().get::<Prepared>()?.clone());
//!         Some(replaced)
//!     }),
//! );
//!
//! let mut response = Response::new(());
//! response.extensions_mut().insert(Prepared("GET /"));
//!
//! let response = hooks.dispatch(HookEvent::Response, response, &Extensions::new()).unwrap();
//! assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
//!
//! let error = RequestError::<Prepared, _>::builder(ErrorKind::Http).message("502 Bad Gateway").response(&response).build();
//! assert_eq!(error.request(), Some(&Prepared("GET /")));
//! assert!(!error.is_a(Class::Transport));
//! ```
//!
//! # Concurrency
//!
//! [`error::RequestError`] is immutable and can be shared between threads.
//! [`hooks::HookRegistry`] is plain owned state of a session or a request: it
//! does no locking, the owner serializes registration against dispatch or gives
//! every request its own clone.

pub mod error;
pub mod hooks;
pub mod text;
