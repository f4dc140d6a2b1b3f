// Copyright 2025 the Plumbers Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::rc::Rc;
use alloc::string::{String, ToString};
use core::cell::{Cell, RefCell};
use core::fmt;
use core::str::FromStr;

use futures::future::LocalBoxFuture;
use plumbers_core::{
    CallbackArgs, Controller, Detail, ElementOf, Environment, EventInit, Plumber, PlumberOptions,
    Reply,
};

use crate::{FetchError, LoadError, UnknownReloadPolicy};

/// Asynchronous text fetch, injected by the host environment.
pub trait Fetcher {
    /// Fetch the body at `url`.
    fn fetch<'a>(&'a self, url: &'a str) -> LocalBoxFuture<'a, Result<String, FetchError>>;
}

/// When already-loaded content is fetched again.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ReloadPolicy {
    /// Load once.
    #[default]
    Never,
    /// Load on every call.
    Always,
    /// Load again once the content is older than the stale interval.
    Stale,
}

impl ReloadPolicy {
    /// The policy name as used in host attributes.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Never => "never",
            Self::Always => "always",
            Self::Stale => "stale",
        }
    }

    /// Parse a host attribute value. Any name other than `never` or `always`
    /// reloads stale content; unknown names are logged.
    pub fn from_attribute(value: &str) -> Self {
        value.parse().unwrap_or_else(|err: UnknownReloadPolicy| {
            tracing::warn!(%err, "treating as `stale`");
            Self::Stale
        })
    }
}

impl fmt::Display for ReloadPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReloadPolicy {
    type Err = UnknownReloadPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "never" => Ok(Self::Never),
            "always" => Ok(Self::Always),
            "stale" => Ok(Self::Stale),
            other => Err(UnknownReloadPolicy(other.to_string())),
        }
    }
}

/// Options for [`ContentLoader`].
pub struct ContentOptions<E> {
    /// Shared behavior options.
    pub plumber: PlumberOptions<E>,
    /// Content available before the first load.
    pub content: Option<String>,
    /// Source URL; empty means static content.
    pub url: String,
    /// Reload policy.
    pub reload: ReloadPolicy,
    /// Age in seconds after which [`ReloadPolicy::Stale`] content reloads.
    pub stale_after_secs: u64,
    /// Transport used for URL sources.
    pub fetcher: Option<Rc<dyn Fetcher>>,
    /// Decision callback: should this load proceed?
    pub on_load: String,
    /// Content callback that replaces the default fetch.
    pub on_loading: String,
    /// Notification callback with the loaded content.
    pub on_loaded: String,
    /// Static content provider used when there is no URL.
    pub loader: String,
}

impl<E> Default for ContentOptions<E> {
    fn default() -> Self {
        Self {
            plumber: PlumberOptions::default(),
            content: None,
            url: String::new(),
            reload: ReloadPolicy::Never,
            stale_after_secs: 3600,
            fetcher: None,
            on_load: "contentLoad".into(),
            on_loading: "contentLoading".into(),
            on_loaded: "contentLoaded".into(),
            loader: "contentLoader".into(),
        }
    }
}

impl<E: fmt::Debug> fmt::Debug for ContentOptions<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentOptions")
            .field("plumber", &self.plumber)
            .field("content", &self.content)
            .field("url", &self.url)
            .field("reload", &self.reload)
            .field("stale_after_secs", &self.stale_after_secs)
            .field("fetcher", &self.fetcher.is_some())
            .field("on_load", &self.on_load)
            .field("on_loading", &self.on_loading)
            .field("on_loaded", &self.on_loaded)
            .field("loader", &self.loader)
            .finish()
    }
}

impl<E> ContentOptions<E> {
    /// Use `plumber` as the shared behavior options.
    #[must_use]
    pub fn with_plumber(mut self, plumber: PlumberOptions<E>) -> Self {
        self.plumber = plumber;
        self
    }

    /// Load from `url`.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Start with `content`.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Use `reload` as the reload policy.
    #[must_use]
    pub fn with_reload(mut self, reload: ReloadPolicy) -> Self {
        self.reload = reload;
        self
    }

    /// Use the reload policy named by a host attribute value.
    ///
    /// See [`ReloadPolicy::from_attribute`].
    #[must_use]
    pub fn with_reload_attribute(self, value: &str) -> Self {
        self.with_reload(ReloadPolicy::from_attribute(value))
    }

    /// Consider content stale after `secs` seconds.
    #[must_use]
    pub fn with_stale_after(mut self, secs: u64) -> Self {
        self.stale_after_secs = secs;
        self
    }

    /// Fetch URL sources through `fetcher`.
    #[must_use]
    pub fn with_fetcher(mut self, fetcher: Rc<dyn Fetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }
}

/// What a call to [`ContentLoader::load`] did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Content was already loaded and the policy did not ask for a reload.
    Fresh,
    /// The decision callback declined.
    Declined,
    /// The source produced empty content; nothing was recorded.
    Empty,
    /// New content was loaded and recorded.
    Loaded,
}

/// Loads content lazily and caches it.
///
/// A load runs through four steps, each reported on the host's channel:
///
/// 1. `load` is dispatched with `{url}` and the decision callback is asked
///    whether to continue (by default: only when a URL is set).
/// 2. Content is produced by the loading callback if the host provides one,
///    otherwise by the fetcher for URL sources or the static provider
///    callback. A fetch error ends the load here, before `loading`.
/// 3. `loading` is dispatched with `{url}`. Empty content stops the load
///    without marking anything.
/// 4. The loaded callback is awaited with `{url, content}`, the load time is
///    recorded, and `loaded` is dispatched with `{url, content}`.
///
/// Calls made while content is fresh return [`LoadOutcome::Fresh`] without
/// fetching. Overlapping calls issued before the first one records its load
/// time are not merged; each of them fetches.
pub struct ContentLoader<H: Controller> {
    plumber: Plumber<H>,
    url: String,
    reload: ReloadPolicy,
    stale_after_secs: u64,
    fetcher: Option<Rc<dyn Fetcher>>,
    on_load: String,
    on_loading: String,
    on_loaded: String,
    loader: String,
    content: RefCell<Option<String>>,
    loaded_at: Cell<Option<u64>>,
}

impl<H: Controller> fmt::Debug for ContentLoader<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentLoader")
            .field("plumber", &self.plumber)
            .field("url", &self.url)
            .field("reload", &self.reload)
            .field("stale_after_secs", &self.stale_after_secs)
            .field("fetcher", &self.fetcher.is_some())
            .field("on_load", &self.on_load)
            .field("on_loading", &self.on_loading)
            .field("on_loaded", &self.on_loaded)
            .field("loader", &self.loader)
            .field("content", &self.content)
            .field("loaded_at", &self.loaded_at)
            .finish()
    }
}

impl<H: Controller> ContentLoader<H> {
    /// Attach to `host`.
    pub fn attach(host: &Rc<H>, options: ContentOptions<ElementOf<H>>) -> Rc<Self> {
        Rc::new(Self {
            plumber: Plumber::new(host, options.plumber),
            url: options.url,
            reload: options.reload,
            stale_after_secs: options.stale_after_secs,
            fetcher: options.fetcher,
            on_load: options.on_load,
            on_loading: options.on_loading,
            on_loaded: options.on_loaded,
            loader: options.loader,
            content: RefCell::new(options.content),
            loaded_at: Cell::new(None),
        })
    }

    /// The underlying behavior state.
    pub fn plumber(&self) -> &Plumber<H> {
        &self.plumber
    }

    /// Source URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Reload policy.
    pub fn reload(&self) -> ReloadPolicy {
        self.reload
    }

    /// The cached content: the initial content until a load succeeds, then the
    /// latest loaded content.
    pub fn content(&self) -> Option<String> {
        self.content.borrow().clone()
    }

    /// Environment time of the last successful load.
    pub fn loaded_at(&self) -> Option<u64> {
        self.loaded_at.get()
    }

    /// Returns `true` if loaded content should be fetched again.
    pub fn reloadable(&self) -> bool {
        match self.reload {
            ReloadPolicy::Never => false,
            ReloadPolicy::Always => true,
            ReloadPolicy::Stale => self.loaded_at.get().is_some_and(|at| {
                let age = self.plumber.env().now_millis().saturating_sub(at);
                age > self.stale_after_secs.saturating_mul(1000)
            }),
        }
    }

    /// Load the content if needed.
    ///
    /// Fetch failures propagate; nothing is recorded for a failed load.
    pub async fn load(&self) -> Result<LoadOutcome, LoadError> {
        if self.loaded_at.get().is_some() && !self.reloadable() {
            tracing::debug!(url = self.url.as_str(), "content is fresh, not loading");
            return Ok(LoadOutcome::Fresh);
        }

        self.plumber.dispatch("load", EventInit::detail(self.url_detail()));
        if !self.loadable().await {
            return Ok(LoadOutcome::Declined);
        }

        let content = self.produce().await?;
        self.plumber.dispatch("loading", EventInit::detail(self.url_detail()));
        if content.is_empty() {
            return Ok(LoadOutcome::Empty);
        }

        let detail = Detail::Content {
            url: self.url.clone(),
            content: content.clone(),
        };
        self.plumber
            .await_callback(&self.on_loaded, CallbackArgs::detail(detail.clone()))
            .await;
        self.loaded_at.set(Some(self.plumber.env().now_millis()));
        *self.content.borrow_mut() = Some(content);
        self.plumber.dispatch("loaded", EventInit::detail(detail));
        Ok(LoadOutcome::Loaded)
    }

    fn url_detail(&self) -> Detail {
        Detail::Url {
            url: self.url.clone(),
        }
    }

    async fn loadable(&self) -> bool {
        match self
            .plumber
            .await_callback(&self.on_load, CallbackArgs::detail(self.url_detail()))
            .await
        {
            Some(reply) => reply.is_truthy(),
            None => !self.url.is_empty(),
        }
    }

    async fn produce(&self) -> Result<String, FetchError> {
        let args = || CallbackArgs::detail(self.url_detail());
        if let Some(reply) = self.plumber.await_callback(&self.on_loading, args()).await {
            return Ok(reply.into_content().unwrap_or_default());
        }
        if !self.url.is_empty() {
            if let Some(fetcher) = self.fetcher.clone() {
                return fetcher.fetch(&self.url).await;
            }
            tracing::debug!(url = self.url.as_str(), "no fetcher, using static content");
        }
        Ok(self
            .plumber
            .await_callback(&self.loader, args())
            .await
            .and_then(Reply::into_content)
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::boxed::Box;
    use alloc::vec;
    use plumbers_core::Callback;
    use plumbers_core::testing::{TestElement, TestEnv, TestHost};

    struct StubFetcher {
        calls: Cell<usize>,
        body: String,
        fail: bool,
    }

    impl StubFetcher {
        fn new(body: &str) -> Rc<Self> {
            Rc::new(Self {
                calls: Cell::new(0),
                body: body.to_string(),
                fail: false,
            })
        }

        fn failing() -> Rc<Self> {
            Rc::new(Self {
                calls: Cell::new(0),
                body: String::new(),
                fail: true,
            })
        }
    }

    impl Fetcher for StubFetcher {
        fn fetch<'a>(&'a self, url: &'a str) -> LocalBoxFuture<'a, Result<String, FetchError>> {
            self.calls.set(self.calls.get() + 1);
            Box::pin(async move {
                if self.fail {
                    Err(FetchError::Status {
                        url: url.to_string(),
                        status: 503,
                    })
                } else {
                    Ok(self.body.clone())
                }
            })
        }
    }

    fn host() -> (Rc<TestEnv>, Rc<TestHost>) {
        let env = TestEnv::new(800.0, 600.0);
        let host = TestHost::new("panel", Some(TestElement::new("panel")), env.clone());
        (env, host)
    }

    fn loader(
        host: &Rc<TestHost>,
        fetcher: &Rc<StubFetcher>,
        reload: ReloadPolicy,
    ) -> Rc<ContentLoader<TestHost>> {
        let options = ContentOptions::default()
            .with_url("/fragment")
            .with_reload(reload)
            .with_fetcher(fetcher.clone());
        ContentLoader::attach(host, options)
    }

    #[test]
    fn policy_names() {
        assert_eq!("stale".parse(), Ok(ReloadPolicy::Stale));
        assert_eq!(
            "sometimes".parse::<ReloadPolicy>(),
            Err(UnknownReloadPolicy("sometimes".into()))
        );
        assert_eq!(ReloadPolicy::from_attribute("sometimes"), ReloadPolicy::Stale);
        assert_eq!(ReloadPolicy::from_attribute("never"), ReloadPolicy::Never);
        assert_eq!(ReloadPolicy::Always.to_string(), "always");
    }

    #[test]
    fn never_fetches_once() {
        let (_env, host) = host();
        let fetcher = StubFetcher::new("<li>a</li>");
        let loader = loader(&host, &fetcher, ReloadPolicy::Never);

        assert_eq!(pollster::block_on(loader.load()), Ok(LoadOutcome::Loaded));
        assert_eq!(pollster::block_on(loader.load()), Ok(LoadOutcome::Fresh));
        assert_eq!(fetcher.calls.get(), 1);
        assert_eq!(loader.content().as_deref(), Some("<li>a</li>"));
        assert_eq!(
            host.event_types(),
            vec!["panel:load", "panel:loading", "panel:loaded"]
        );
        assert_eq!(
            host.events()[2].detail,
            Detail::Content {
                url: "/fragment".into(),
                content: "<li>a</li>".into()
            }
        );
    }

    #[test]
    fn always_fetches_every_time() {
        let (_env, host) = host();
        let fetcher = StubFetcher::new("x");
        let loader = loader(&host, &fetcher, ReloadPolicy::Always);
        for _ in 0..3 {
            assert_eq!(pollster::block_on(loader.load()), Ok(LoadOutcome::Loaded));
        }
        assert_eq!(fetcher.calls.get(), 3);
    }

    #[test]
    fn stale_reloads_after_interval() {
        let (env, host) = host();
        env.set_now(1_000);
        let fetcher = StubFetcher::new("x");
        let options = ContentOptions::default()
            .with_url("/fragment")
            .with_reload(ReloadPolicy::Stale)
            .with_stale_after(60)
            .with_fetcher(fetcher.clone());
        let loader = ContentLoader::attach(&host, options);

        assert!(!loader.reloadable());
        assert_eq!(pollster::block_on(loader.load()), Ok(LoadOutcome::Loaded));
        assert_eq!(loader.loaded_at(), Some(1_000));

        env.advance(60_000);
        assert!(!loader.reloadable());
        assert_eq!(pollster::block_on(loader.load()), Ok(LoadOutcome::Fresh));

        env.advance(1);
        assert!(loader.reloadable());
        assert_eq!(pollster::block_on(loader.load()), Ok(LoadOutcome::Loaded));
        assert_eq!(loader.loaded_at(), Some(61_001));
        assert_eq!(fetcher.calls.get(), 2);
    }

    #[test]
    fn empty_content_is_not_recorded() {
        let (_env, host) = host();
        let fetcher = StubFetcher::new("");
        let loader = loader(&host, &fetcher, ReloadPolicy::Never);
        assert_eq!(pollster::block_on(loader.load()), Ok(LoadOutcome::Empty));
        assert_eq!(loader.loaded_at(), None);
        assert_eq!(pollster::block_on(loader.load()), Ok(LoadOutcome::Empty));
        assert_eq!(fetcher.calls.get(), 2);
        assert_eq!(host.event_types().last().map(String::as_str), Some("panel:loading"));
    }

    #[test]
    fn fetch_errors_propagate() {
        let (_env, host) = host();
        let fetcher = StubFetcher::failing();
        let loader = loader(&host, &fetcher, ReloadPolicy::Never);
        let result = pollster::block_on(loader.load());
        assert_eq!(
            result,
            Err(LoadError::Fetch(FetchError::Status {
                url: "/fragment".into(),
                status: 503
            }))
        );
        assert_eq!(loader.loaded_at(), None);
        assert_eq!(loader.content(), None);
    }

    #[test]
    fn failed_fetch_never_reports_loading() {
        let (_env, host) = host();
        let fetcher = StubFetcher::failing();
        let loader = loader(&host, &fetcher, ReloadPolicy::Never);
        assert!(pollster::block_on(loader.load()).is_err());
        assert_eq!(host.event_types(), vec!["panel:load"]);
    }

    #[test]
    fn unknown_reload_attribute_reloads_when_stale() {
        let (env, host) = host();
        let fetcher = StubFetcher::new("x");
        let options = ContentOptions::default()
            .with_url("/fragment")
            .with_reload_attribute("hourly")
            .with_stale_after(1)
            .with_fetcher(fetcher.clone());
        let loader = ContentLoader::attach(&host, options);
        assert_eq!(loader.reload(), ReloadPolicy::Stale);

        assert_eq!(pollster::block_on(loader.load()), Ok(LoadOutcome::Loaded));
        assert_eq!(pollster::block_on(loader.load()), Ok(LoadOutcome::Fresh));
        env.advance(1_001);
        assert_eq!(pollster::block_on(loader.load()), Ok(LoadOutcome::Loaded));
        assert_eq!(fetcher.calls.get(), 2);
    }

    #[test]
    fn no_url_declines_by_default() {
        let (_env, host) = host();
        let loader = ContentLoader::attach(&host, ContentOptions::default());
        assert_eq!(pollster::block_on(loader.load()), Ok(LoadOutcome::Declined));
        assert_eq!(host.event_types(), vec!["panel:load"]);
    }

    #[test]
    fn static_provider_without_url() {
        let (_env, host) = host();
        host.register("contentLoad", Callback::sync(|_: CallbackArgs<TestElement>| true));
        host.register(
            "contentLoader",
            Callback::future(|_: CallbackArgs<TestElement>| async { "<p>static</p>" }),
        );
        let loader = ContentLoader::attach(
            &host,
            ContentOptions::default().with_content("<p>placeholder</p>"),
        );
        assert_eq!(loader.content().as_deref(), Some("<p>placeholder</p>"));
        assert_eq!(pollster::block_on(loader.load()), Ok(LoadOutcome::Loaded));
        assert_eq!(loader.content().as_deref(), Some("<p>static</p>"));
    }

    #[test]
    fn loading_callback_overrides_fetch() {
        let (_env, host) = host();
        host.register(
            "contentLoading",
            Callback::sync(|args: CallbackArgs<TestElement>| match args.detail {
                Detail::Url { url } => Reply::Content(url),
                _ => Reply::Unit,
            }),
        );
        let fetcher = StubFetcher::new("fetched");
        let loader = loader(&host, &fetcher, ReloadPolicy::Never);
        assert_eq!(pollster::block_on(loader.load()), Ok(LoadOutcome::Loaded));
        assert_eq!(fetcher.calls.get(), 0);
        assert_eq!(loader.content().as_deref(), Some("/fragment"));
    }

    #[test]
    fn decision_callback_can_decline() {
        let (_env, host) = host();
        host.register("contentLoad", Callback::sync(|_: CallbackArgs<TestElement>| false));
        let fetcher = StubFetcher::new("x");
        let loader = loader(&host, &fetcher, ReloadPolicy::Always);
        assert_eq!(pollster::block_on(loader.load()), Ok(LoadOutcome::Declined));
        assert_eq!(fetcher.calls.get(), 0);
    }

    #[test]
    fn loaded_callback_runs_before_loaded_event() {
        let (_env, host) = host();
        let probe = host.clone();
        let seen = Rc::new(Cell::new(0));
        let s = seen.clone();
        host.register(
            "contentLoaded",
            Callback::sync(move |_: CallbackArgs<TestElement>| s.set(probe.events().len())),
        );
        let fetcher = StubFetcher::new("x");
        let loader = loader(&host, &fetcher, ReloadPolicy::Never);
        let _ = pollster::block_on(loader.load());
        assert_eq!(seen.get(), 2);
        assert_eq!(host.events().len(), 3);
    }
}
