use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use http::Extensions;
use tracing::trace;

use super::{Hook, HookError, HookEvent, IntoHooks};

/// Ordered hooks per [`HookEvent`], owned by a session or a request.
///
/// Cloning a registry shares the hook objects but not the lists, so a request
/// can take a copy of its session's hooks and register more without touching
/// the session. Appending to a registry shared between threads has to be
/// serialized by the owner.
pub struct HookRegistry<T> {
    hooks: HashMap<HookEvent, Vec<Arc<dyn Hook<T>>>>,
}

/// Returns a registry with an empty hook list for every known event.
pub fn default_hooks<T>() -> HookRegistry<T> {
    HookRegistry { hooks: HookEvent::ALL.into_iter().map(|event| (event, Vec::new())).collect() }
}

/// Runs the hooks registered for `event` on `value`, see [`HookRegistry::dispatch`].
pub fn dispatch<T>(event: HookEvent, registry: &HookRegistry<T>, value: T, extra: &Extensions) -> Result<T, HookError> {
    registry.dispatch(event, value, extra)
}

impl<T> HookRegistry<T> {
    /// Creates a registry without any event entry.
    pub fn new() -> Self {
        Self { hooks: HashMap::new() }
    }

    /// Appends `hooks` to the list of `event`, keeping insertion order.
    pub fn register<H: IntoHooks<T>>(&mut self, event: HookEvent, hooks: H) -> &mut Self {
        hooks.into_hooks(self.hooks.entry(event).or_default());
        self
    }

    /// Removes the first registration of `hook` for `event`.
    ///
    /// Hooks are compared by identity. Returns false when the hook was not registered.
    pub fn deregister(&mut self, event: HookEvent, hook: &Arc<dyn Hook<T>>) -> bool {
        let Some(hooks) = self.hooks.get_mut(&event) else {
            return false;
        };

        match hooks.iter().position(|registered| Arc::ptr_eq(registered, hook)) {
            Some(index) => {
                hooks.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn hooks(&self, event: HookEvent) -> &[Arc<dyn Hook<T>>] {
        self.hooks.get(&event).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn clear(&mut self, event: HookEvent) {
        if let Some(hooks) = self.hooks.get_mut(&event) {
            hooks.clear();
        }
    }

    /// Returns true if no hook is registered for any event.
    pub fn is_empty(&self) -> bool {
        self.hooks.values().all(Vec::is_empty)
    }

    /// Combines session level and request level hooks.
    ///
    /// For each event the request hooks are used when there are any, otherwise
    /// the session hooks are kept.
    pub fn merge(session: &Self, request: &Self) -> Self {
        let hooks = HookEvent::ALL
            .into_iter()
            .map(|event| {
                let request_hooks = request.hooks(event);
                let hooks = if request_hooks.is_empty() { session.hooks(event) } else { request_hooks };
                (event, hooks.to_vec())
            })
            .collect();

        Self { hooks }
    }

    /// Runs the hooks of `event` in registration order.
    ///
    /// Each hook receives the current value, a hook returning `Some` replaces
    /// it for the following hooks. Without hooks `value` is returned as is. The
    /// first hook error stops the dispatch and is returned unchanged.
    pub fn dispatch(&self, event: HookEvent, mut value: T, extra: &Extensions) -> Result<T, HookError> {
        let hooks = self.hooks(event);
        if hooks.is_empty() {
            return Ok(value);
        }

        trace!(event = %event, hooks = hooks.len(), "dispatching hooks");
        for hook in hooks {
            if let Some(replaced) = hook.call(&value, extra)? {
                value = replaced;
            }
        }

        Ok(value)
    }
}

impl<T> Default for HookRegistry<T> {
    fn default() -> Self {
        default_hooks()
    }
}

impl<T> Clone for HookRegistry<T> {
    fn clone(&self) -> Self {
        Self { hooks: self.hooks.clone() }
    }
}

impl<T> fmt::Debug for HookRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.hooks.iter().map(|(event, hooks)| (event, hooks.len()))).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::{hook_fn, try_hook_fn};
    use std::io;

    fn plus(n: i32) -> impl Hook<i32> + IntoHooks<i32> {
        hook_fn(move |value: &i32, _: &Extensions| Some(value + n))
    }

    fn keep() -> impl Hook<i32> + IntoHooks<i32> {
        hook_fn(|_: &i32, _: &Extensions| None)
    }

    #[test]
    fn default_hooks_has_every_event() {
        let registry = default_hooks::<i32>();

        for event in HookEvent::ALL {
            assert!(registry.hooks.contains_key(&event));
            assert!(registry.hooks(event).is_empty());
        }
        assert!(registry.is_empty());
    }

    #[test]
    fn dispatch_without_hooks_is_identity() {
        let extra = Extensions::new();

        assert_eq!(dispatch(HookEvent::Response, &HookRegistry::new(), 7, &extra).unwrap(), 7);
        assert_eq!(dispatch(HookEvent::Response, &default_hooks(), "same", &extra).unwrap(), "same");
    }

    #[test]
    fn none_keeps_previous_value() {
        let mut registry = default_hooks();
        registry.register(HookEvent::Response, plus(1)).register(HookEvent::Response, keep());

        assert_eq!(registry.dispatch(HookEvent::Response, 5, &Extensions::new()).unwrap(), 6);
    }

    #[test]
    fn hooks_run_in_insertion_order() {
        let mut registry = HookRegistry::new();
        registry.register(
            HookEvent::Response,
            (
                hook_fn(|value: &String, _: &Extensions| Some(format!("{value}1"))),
                hook_fn(|value: &String, _: &Extensions| Some(format!("{value}2"))),
            ),
        );
        registry.register(HookEvent::Response, hook_fn(|value: &String, _: &Extensions| Some(format!("{value}3"))));

        let value = registry.dispatch(HookEvent::Response, String::from("0"), &Extensions::new()).unwrap();
        assert_eq!(value, "0123");
    }

    #[test]
    fn single_hook_equals_one_element_sequence() {
        let mut single = default_hooks();
        single.register(HookEvent::Response, plus(3));

        let mut sequence = default_hooks();
        sequence.register(HookEvent::Response, vec![plus(3)]);

        let extra = Extensions::new();
        assert_eq!(single.hooks(HookEvent::Response).len(), sequence.hooks(HookEvent::Response).len());
        assert_eq!(
            single.dispatch(HookEvent::Response, 1, &extra).unwrap(),
            sequence.dispatch(HookEvent::Response, 1, &extra).unwrap()
        );
    }

    #[test]
    fn error_stops_dispatch() {
        let mut registry = default_hooks();
        registry
            .register(HookEvent::Response, plus(1))
            .register(HookEvent::Response, try_hook_fn(|_: &i32, _: &Extensions| Err::<Option<i32>, _>(io::Error::other("boom"))))
            .register(HookEvent::Response, hook_fn(|_: &i32, _: &Extensions| -> Option<i32> { panic!("must not run") }));

        let error = registry.dispatch(HookEvent::Response, 1, &Extensions::new()).unwrap_err();

        let io_error = error.downcast_ref::<io::Error>().expect("hook error should pass through unchanged");
        assert_eq!(io_error.to_string(), "boom");
    }

    #[test]
    fn deregister_by_identity() {
        let first: Arc<dyn Hook<i32>> = Arc::new(plus(1));
        let second: Arc<dyn Hook<i32>> = Arc::new(plus(10));

        let mut registry = default_hooks();
        registry.register(HookEvent::Response, vec![Arc::clone(&first), Arc::clone(&second)]);

        assert!(registry.deregister(HookEvent::Response, &first));
        assert!(!registry.deregister(HookEvent::Response, &first));
        assert_eq!(registry.dispatch(HookEvent::Response, 0, &Extensions::new()).unwrap(), 10);
    }

    #[test]
    fn clear_event() {
        let mut registry = default_hooks();
        registry.register(HookEvent::Response, [plus(1), plus(2)]);
        assert!(!registry.is_empty());

        registry.clear(HookEvent::Response);
        assert!(registry.is_empty());
        assert_eq!(registry.dispatch(HookEvent::Response, 0, &Extensions::new()).unwrap(), 0);
    }

    #[test]
    fn clone_does_not_share_lists() {
        let mut session = default_hooks();
        session.register(HookEvent::Response, plus(1));

        let mut request = session.clone();
        request.register(HookEvent::Response, plus(100));

        assert_eq!(session.hooks(HookEvent::Response).len(), 1);
        assert_eq!(request.hooks(HookEvent::Response).len(), 2);
    }

    #[test]
    fn merge_prefers_request_hooks() {
        let mut session = default_hooks();
        session.register(HookEvent::Response, plus(1));

        let mut request = default_hooks();
        request.register(HookEvent::Response, plus(100));

        let extra = Extensions::new();
        let merged = HookRegistry::merge(&session, &request);
        assert_eq!(merged.dispatch(HookEvent::Response, 0, &extra).unwrap(), 100);

        let merged = HookRegistry::merge(&session, &default_hooks());
        assert_eq!(merged.dispatch(HookEvent::Response, 0, &extra).unwrap(), 1);
    }

    #[test]
    fn debug_shows_counts() {
        let mut registry = default_hooks();
        registry.register(HookEvent::Response, [plus(1), plus(2)]);

        assert_eq!(format!("{registry:?}"), "{Response: 2}");
    }
}
