//! Hooks let callers observe and replace values at fixed points of the request
//! pipeline.
//!
//! A [`HookRegistry`] maps each [`HookEvent`] to an ordered list of [`Hook`]s.
//! The pipeline calls [`dispatch`] at every extension point, currently once per
//! response with the response as the value. Hooks run in registration order and
//! each one may hand a replacement value to the next.
//!
//! ```
//! use http::Extensions;
//! use micro_client::hooks::{default_hooks, dispatch, hook_fn, HookEvent};
//!
//! let mut registry = default_hooks();
//! registry
//!     .register(HookEvent::Response, hook_fn(|status: &u16, _: &Extensions| Some(status + 1)))
//!     .register(HookEvent::Response, hook_fn(|_: &u16, _: &Extensions| None));
//!
//! let status = dispatch(HookEvent::Response, &registry, 200, &Extensions::new()).unwrap();
//! assert_eq!(status, 201);
//! ```

mod event;
pub use event::HookEvent;
pub use event::ParseEventError;

mod hook;
pub use hook::Hook;
pub use hook::HookError;
pub use hook::HookFn;
pub use hook::IntoHooks;
pub use hook::TryHookFn;
pub use hook::hook_fn;
pub use hook::try_hook_fn;

mod registry;
pub use registry::HookRegistry;
pub use registry::default_hooks;
pub use registry::dispatch;
