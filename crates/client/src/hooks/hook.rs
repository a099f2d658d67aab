use std::error::Error;
use std::sync::Arc;

use http::Extensions;

/// Error returned by a failing hook, passed through dispatch untouched.
pub type HookError = Box<dyn Error + Send + Sync>;

/// A callback invoked at a [`HookEvent`](super::HookEvent).
///
/// The hook sees the current value together with the extra arguments of the
/// dispatch. Returning `Ok(Some(value))` replaces the value handed to the next
/// hook, `Ok(None)` keeps the current one.
pub trait Hook<T>: Send + Sync {
    fn call(&self, value: &T, extra: &Extensions) -> Result<Option<T>, HookError>;
}

/// Hook made from an infallible function, see [`hook_fn`].
#[derive(Debug, Copy, Clone)]
pub struct HookFn<F> {
    f: F,
}

/// Hook made from a fallible function, see [`try_hook_fn`].
#[derive(Debug, Copy, Clone)]
pub struct TryHookFn<F> {
    f: F,
}

/// Wraps a function as a hook.
///
/// ```
/// use http::Extensions;
/// use micro_client::hooks::{hook_fn, Hook};
///
/// let hook = hook_fn(|value: &i32, _extra: &Extensions| Some(value + 1));
/// assert_eq!(hook.call(&1, &Extensions::new()).unwrap(), Some(2));
/// ```
pub fn hook_fn<T, F>(f: F) -> HookFn<F>
where
    F: Fn(&T, &Extensions) -> Option<T> + Send + Sync,
{
    HookFn { f }
}

/// Wraps a fallible function as a hook, its error stops the dispatch.
pub fn try_hook_fn<T, E, F>(f: F) -> TryHookFn<F>
where
    F: Fn(&T, &Extensions) -> Result<Option<T>, E> + Send + Sync,
    E: Into<HookError>,
{
    TryHookFn { f }
}

impl<T, F> Hook<T> for HookFn<F>
where
    F: Fn(&T, &Extensions) -> Option<T> + Send + Sync,
{
    #[inline]
    fn call(&self, value: &T, extra: &Extensions) -> Result<Option<T>, HookError> {
        Ok((self.f)(value, extra))
    }
}

impl<T, E, F> Hook<T> for TryHookFn<F>
where
    F: Fn(&T, &Extensions) -> Result<Option<T>, E> + Send + Sync,
    E: Into<HookError>,
{
    #[inline]
    fn call(&self, value: &T, extra: &Extensions) -> Result<Option<T>, HookError> {
        (self.f)(value, extra).map_err(Into::into)
    }
}

/// Values accepted when registering hooks: a single hook or a sequence of hooks.
///
/// Both forms are flattened into the registry's ordered list at registration,
/// so one hook and a one element sequence holding it register the same way.
pub trait IntoHooks<T> {
    fn into_hooks(self, hooks: &mut Vec<Arc<dyn Hook<T>>>);
}

impl<T, F> IntoHooks<T> for HookFn<F>
where
    HookFn<F>: Hook<T> + 'static,
{
    fn into_hooks(self, hooks: &mut Vec<Arc<dyn Hook<T>>>) {
        hooks.push(Arc::new(self));
    }
}

impl<T, F> IntoHooks<T> for TryHookFn<F>
where
    TryHookFn<F>: Hook<T> + 'static,
{
    fn into_hooks(self, hooks: &mut Vec<Arc<dyn Hook<T>>>) {
        hooks.push(Arc::new(self));
    }
}

impl<T> IntoHooks<T> for Arc<dyn Hook<T>> {
    fn into_hooks(self, hooks: &mut Vec<Arc<dyn Hook<T>>>) {
        hooks.push(self);
    }
}

impl<T> IntoHooks<T> for Box<dyn Hook<T>> {
    fn into_hooks(self, hooks: &mut Vec<Arc<dyn Hook<T>>>) {
        hooks.push(Arc::from(self));
    }
}

impl<T, H: IntoHooks<T>> IntoHooks<T> for Vec<H> {
    fn into_hooks(self, hooks: &mut Vec<Arc<dyn Hook<T>>>) {
        for hook in self {
            hook.into_hooks(hooks);
        }
    }
}

impl<T, H: IntoHooks<T>, const N: usize> IntoHooks<T> for [H; N] {
    fn into_hooks(self, hooks: &mut Vec<Arc<dyn Hook<T>>>) {
        for hook in self {
            hook.into_hooks(hooks);
        }
    }
}

/// impl `IntoHooks` for tuples, so hooks of different types register in one call
///
/// for example, it will impl (A, B) like this:
///```ignore
/// impl<T, A, B> IntoHooks<T> for (A, B)
///    where
///        A: IntoHooks<T>,
///        B: IntoHooks<T>,
/// {
///    fn into_hooks(self, hooks: &mut Vec<Arc<dyn Hook<T>>>) {
///        let (A, B) = self;
///        A.into_hooks(hooks);
///        B.into_hooks(hooks);
///    }
/// }
///```
macro_rules! impl_into_hooks_for_tuple ({ $($param:ident)* } => {
    impl<T, $($param,)*> IntoHooks<T> for ($($param,)*)
    where
        $($param: IntoHooks<T>,)*
    {
        #[allow(non_snake_case, reason = "tuple elements are named after their type parameters")]
        fn into_hooks(self, hooks: &mut Vec<Arc<dyn Hook<T>>>) {
            let ($($param,)*) = self;
            $($param.into_hooks(hooks);)*
        }
    }
});

impl_into_hooks_for_tuple! { A }
impl_into_hooks_for_tuple! { A B }
impl_into_hooks_for_tuple! { A B C }
impl_into_hooks_for_tuple! { A B C D }
impl_into_hooks_for_tuple! { A B C D E }
impl_into_hooks_for_tuple! { A B C D E F }
impl_into_hooks_for_tuple! { A B C D E F G }
impl_into_hooks_for_tuple! { A B C D E F G H }

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn collect<T, H: IntoHooks<T>>(hooks: H) -> Vec<Arc<dyn Hook<T>>> {
        let mut collected = vec![];
        hooks.into_hooks(&mut collected);
        collected
    }

    #[test]
    fn hook_fn_keeps_or_replaces() {
        let keep = hook_fn(|_: &i32, _: &Extensions| None);
        let double = hook_fn(|value: &i32, _: &Extensions| Some(value * 2));

        assert_eq!(keep.call(&3, &Extensions::new()).unwrap(), None);
        assert_eq!(double.call(&3, &Extensions::new()).unwrap(), Some(6));
    }

    #[test]
    fn try_hook_fn_returns_error() {
        let failing = try_hook_fn(|_: &i32, _: &Extensions| Err::<Option<i32>, _>(io::Error::other("hook failed")));

        let error = failing.call(&1, &Extensions::new()).unwrap_err();
        assert_eq!(error.to_string(), "hook failed");
    }

    #[test]
    fn hook_reads_extra() {
        #[derive(Clone)]
        struct Offset(i32);

        let mut extra = Extensions::new();
        extra.insert(Offset(10));

        let hook = hook_fn(|value: &i32, extra: &Extensions| extra.get::<Offset>().map(|offset| value + offset.0));

        assert_eq!(hook.call(&1, &extra).unwrap(), Some(11));
        assert_eq!(hook.call(&1, &Extensions::new()).unwrap(), None);
    }

    #[test]
    fn single_and_sequence_flatten_the_same() {
        let single: Vec<Arc<dyn Hook<i32>>> = collect(hook_fn(|value: &i32, _: &Extensions| Some(value + 1)));
        let sequence: Vec<Arc<dyn Hook<i32>>> = collect(vec![hook_fn(|value: &i32, _: &Extensions| Some(value + 1))]);

        assert_eq!(single.len(), 1);
        assert_eq!(sequence.len(), 1);
        assert_eq!(single[0].call(&1, &Extensions::new()).unwrap(), sequence[0].call(&1, &Extensions::new()).unwrap());
    }

    #[test]
    fn tuples_keep_order() {
        let hooks: Vec<Arc<dyn Hook<String>>> = collect((
            hook_fn(|value: &String, _: &Extensions| Some(format!("{value}a"))),
            try_hook_fn(|value: &String, _: &Extensions| Ok::<_, io::Error>(Some(format!("{value}b")))),
            [hook_fn(|value: &String, _: &Extensions| Some(format!("{value}c")))],
        ));

        assert_eq!(hooks.len(), 3);

        let mut value = String::new();
        for hook in &hooks {
            if let Some(next) = hook.call(&value, &Extensions::new()).unwrap() {
                value = next;
            }
        }
        assert_eq!(value, "abc");
    }

    #[test]
    fn boxed_hook() {
        let boxed: Box<dyn Hook<i32>> = Box::new(hook_fn(|value: &i32, _: &Extensions| Some(-value)));

        let hooks = collect(boxed);
        assert_eq!(hooks[0].call(&4, &Extensions::new()).unwrap(), Some(-4));
    }
}
