// Copyright 2025 the Plumbers Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named host callbacks.
//!
//! Behaviors resolve hooks by name (`dismissed`, `contentLoaded`, ...) and by
//! dotted path (`visibility.isVisible`). A [`Callbacks`] registry stores them
//! in nested scopes; a missing name is not an error, the behavior just skips
//! the hook.
//!
//! A [`Callback`] may answer synchronously or with a future. Both shapes are
//! awaited the same way through [`Callback::invoke`].

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::{String, ToString};
use core::fmt;
use core::future::Future;

use futures::future::LocalBoxFuture;
use hashbrown::HashMap;

use crate::event::Detail;

/// Arguments passed to a host callback.
#[derive(Clone, Debug, PartialEq)]
pub struct CallbackArgs<E> {
    /// The element the hook concerns, when there is one.
    pub target: Option<E>,
    /// Event-specific payload.
    pub detail: Detail,
}

impl<E> Default for CallbackArgs<E> {
    fn default() -> Self {
        Self {
            target: None,
            detail: Detail::None,
        }
    }
}

impl<E> CallbackArgs<E> {
    /// Arguments carrying only a target.
    pub fn target(target: Option<E>) -> Self {
        Self {
            target,
            detail: Detail::None,
        }
    }

    /// Arguments carrying only a payload.
    pub fn detail(detail: Detail) -> Self {
        Self {
            target: None,
            detail,
        }
    }
}

/// Value produced by a host callback.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Reply {
    /// The callback returned nothing.
    #[default]
    Unit,
    /// A yes/no answer.
    Bool(bool),
    /// Produced content.
    Content(String),
}

impl Reply {
    /// Truthiness of the reply: `Unit` and empty content are false.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Unit => false,
            Self::Bool(value) => *value,
            Self::Content(content) => !content.is_empty(),
        }
    }

    /// The produced content, if the reply carries any.
    pub fn into_content(self) -> Option<String> {
        match self {
            Self::Content(content) => Some(content),
            _ => None,
        }
    }
}

impl From<()> for Reply {
    fn from((): ()) -> Self {
        Self::Unit
    }
}

impl From<bool> for Reply {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<String> for Reply {
    fn from(value: String) -> Self {
        Self::Content(value)
    }
}

impl From<&str> for Reply {
    fn from(value: &str) -> Self {
        Self::Content(value.to_string())
    }
}

/// A synchronous element predicate, used for visibility checks.
pub type Predicate<E> = Rc<dyn Fn(&E) -> bool>;

/// A host callback, either synchronous or asynchronous.
pub enum Callback<E> {
    /// Answers immediately.
    Sync(Rc<dyn Fn(CallbackArgs<E>) -> Reply>),
    /// Answers with a future.
    Async(Rc<dyn Fn(CallbackArgs<E>) -> LocalBoxFuture<'static, Reply>>),
}

impl<E: 'static> Callback<E> {
    /// Wrap a synchronous closure.
    pub fn sync<R: Into<Reply>>(f: impl Fn(CallbackArgs<E>) -> R + 'static) -> Self {
        Self::Sync(Rc::new(move |args| f(args).into()))
    }

    /// Wrap a closure returning a future.
    pub fn future<Fut, R>(f: impl Fn(CallbackArgs<E>) -> Fut + 'static) -> Self
    where
        Fut: Future<Output = R> + 'static,
        R: Into<Reply>,
    {
        Self::Async(Rc::new(move |args| {
            let fut = f(args);
            Box::pin(async move { fut.await.into() })
        }))
    }

    /// Call the hook and wait for its reply.
    pub async fn invoke(&self, args: CallbackArgs<E>) -> Reply {
        match self {
            Self::Sync(f) => f(args),
            Self::Async(f) => f(args).await,
        }
    }
}

impl<E> Clone for Callback<E> {
    fn clone(&self) -> Self {
        match self {
            Self::Sync(f) => Self::Sync(Rc::clone(f)),
            Self::Async(f) => Self::Async(Rc::clone(f)),
        }
    }
}

impl<E> fmt::Debug for Callback<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sync(_) => f.write_str("Callback::Sync"),
            Self::Async(_) => f.write_str("Callback::Async"),
        }
    }
}

/// Anything a name can resolve to.
pub enum Handler<E> {
    /// A hook invoked with [`CallbackArgs`].
    Callback(Callback<E>),
    /// An element predicate.
    Predicate(Predicate<E>),
}

impl<E: 'static> Handler<E> {
    /// Wrap a predicate closure.
    pub fn predicate(f: impl Fn(&E) -> bool + 'static) -> Self {
        Self::Predicate(Rc::new(f))
    }
}

impl<E> Clone for Handler<E> {
    fn clone(&self) -> Self {
        match self {
            Self::Callback(callback) => Self::Callback(callback.clone()),
            Self::Predicate(predicate) => Self::Predicate(Rc::clone(predicate)),
        }
    }
}

impl<E> fmt::Debug for Handler<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Callback(callback) => f.debug_tuple("Handler::Callback").field(callback).finish(),
            Self::Predicate(_) => f.write_str("Handler::Predicate"),
        }
    }
}

impl<E> From<Callback<E>> for Handler<E> {
    fn from(callback: Callback<E>) -> Self {
        Self::Callback(callback)
    }
}

impl<E> From<Predicate<E>> for Handler<E> {
    fn from(predicate: Predicate<E>) -> Self {
        Self::Predicate(predicate)
    }
}

enum Entry<E> {
    Handler(Handler<E>),
    Scope(Callbacks<E>),
}

/// A registry of named handlers with dotted-path scopes.
///
/// ```
/// use plumbers_core::{Callback, Callbacks, Handler};
///
/// let mut callbacks: Callbacks<u32> = Callbacks::new();
/// callbacks.insert("dismissed", Callback::sync(|_| ()));
/// callbacks.insert("visibility.isVisible", Handler::predicate(|n: &u32| *n > 1));
///
/// assert!(callbacks.find("dismissed").is_some());
/// assert!(matches!(
///     callbacks.find("visibility.isVisible"),
///     Some(Handler::Predicate(_))
/// ));
/// assert!(callbacks.find("visibility").is_none());
/// assert!(callbacks.find("missing.path").is_none());
/// ```
pub struct Callbacks<E> {
    entries: HashMap<String, Entry<E>>,
}

impl<E> Default for Callbacks<E> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<E> fmt::Debug for Callbacks<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.entries.keys()).finish()
    }
}

impl<E> Callbacks<E> {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Register `handler` at a dotted `path`, creating intermediate scopes.
    ///
    /// A handler sitting where a scope is needed is replaced by that scope.
    pub fn insert(&mut self, path: &str, handler: impl Into<Handler<E>>) -> &mut Self {
        self.insert_handler(path, handler.into());
        self
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, path: &str, handler: impl Into<Handler<E>>) -> Self {
        self.insert_handler(path, handler.into());
        self
    }

    fn insert_handler(&mut self, path: &str, handler: Handler<E>) {
        match path.split_once('.') {
            None => {
                self.entries
                    .insert(path.to_string(), Entry::Handler(handler));
            }
            Some((head, rest)) => {
                let entry = self
                    .entries
                    .entry(head.to_string())
                    .or_insert_with(|| Entry::Scope(Self::new()));
                if let Entry::Handler(_) = entry {
                    *entry = Entry::Scope(Self::new());
                }
                if let Entry::Scope(scope) = entry {
                    scope.insert_handler(rest, handler);
                }
            }
        }
    }

    /// Resolve a dotted `path` to a handler.
    ///
    /// Returns `None` when any segment is missing, when an intermediate
    /// segment is a handler, or when the path ends at a scope.
    pub fn find(&self, path: &str) -> Option<Handler<E>> {
        match path.split_once('.') {
            None => match self.entries.get(path)? {
                Entry::Handler(handler) => Some(handler.clone()),
                Entry::Scope(_) => None,
            },
            Some((head, rest)) => match self.entries.get(head)? {
                Entry::Scope(scope) => scope.find(rest),
                Entry::Handler(_) => None,
            },
        }
    }

    /// Remove the handler at `path`, returning it.
    pub fn remove(&mut self, path: &str) -> Option<Handler<E>> {
        match path.split_once('.') {
            None => match self.entries.remove(path)? {
                Entry::Handler(handler) => Some(handler),
                scope @ Entry::Scope(_) => {
                    self.entries.insert(path.to_string(), scope);
                    None
                }
            },
            Some((head, rest)) => match self.entries.get_mut(head)? {
                Entry::Scope(scope) => scope.remove(rest),
                Entry::Handler(_) => None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sync_and_async_replies_are_awaited_alike() {
        let sync: Callback<()> = Callback::sync(|_| true);
        let future: Callback<()> = Callback::future(|_| async { "body" });

        let a = pollster::block_on(sync.invoke(CallbackArgs::default()));
        let b = pollster::block_on(future.invoke(CallbackArgs::default()));
        assert_eq!(a, Reply::Bool(true));
        assert_eq!(b, Reply::Content("body".into()));
    }

    #[test]
    fn callbacks_see_their_arguments() {
        let echo: Callback<u8> = Callback::sync(|args: CallbackArgs<u8>| match args.detail {
            Detail::Url { url } => Reply::Content(url),
            _ => Reply::Unit,
        });
        let reply = pollster::block_on(echo.invoke(CallbackArgs::detail(Detail::Url {
            url: "/menu".into(),
        })));
        assert_eq!(reply.into_content().as_deref(), Some("/menu"));
    }

    #[test]
    fn truthiness() {
        assert!(!Reply::Unit.is_truthy());
        assert!(!Reply::Bool(false).is_truthy());
        assert!(Reply::Bool(true).is_truthy());
        assert!(!Reply::Content(String::new()).is_truthy());
        assert!(Reply::from("x").is_truthy());
    }

    #[test]
    fn nested_paths_resolve() {
        let mut callbacks: Callbacks<u8> = Callbacks::new();
        callbacks
            .insert("a.b.c", Callback::sync(|_| ()))
            .insert("a.d", Handler::predicate(|_: &u8| true));

        assert!(matches!(callbacks.find("a.b.c"), Some(Handler::Callback(_))));
        assert!(matches!(callbacks.find("a.d"), Some(Handler::Predicate(_))));
        assert!(callbacks.find("a.b").is_none());
        assert!(callbacks.find("a.b.c.d").is_none());
        assert!(callbacks.find("x").is_none());
    }

    #[test]
    fn scope_replaces_handler_in_the_way() {
        let callbacks: Callbacks<u8> = Callbacks::new()
            .with("visibility", Callback::sync(|_| ()))
            .with("visibility.isVisible", Handler::predicate(|_: &u8| false));
        assert!(callbacks.find("visibility").is_none());
        assert!(callbacks.find("visibility.isVisible").is_some());
    }

    #[test]
    fn remove_only_takes_handlers() {
        let mut callbacks: Callbacks<u8> = Callbacks::new()
            .with("shown", Callback::sync(|_| ()))
            .with("scope.hook", Callback::sync(|_| ()));
        assert!(callbacks.remove("scope").is_none());
        assert!(callbacks.remove("scope.hook").is_some());
        assert!(callbacks.remove("shown").is_some());
        assert!(callbacks.find("shown").is_none());
    }
}
