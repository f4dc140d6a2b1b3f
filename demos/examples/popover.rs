// Copyright 2025 the Plumbers Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A popover composed from every behavior, driven against the in-memory fakes.
//!
//! The popover:
//! - shows and hides through `Visibility`, which also publishes the predicate
//!   the other behaviors use,
//! - loads its body lazily with `ContentLoader`,
//! - flips above its button when there is no room below,
//! - shifts back inside the viewport when it overflows,
//! - hides itself on an outside click through `Dismisser`.
//!
//! Run:
//! - `cargo run -p plumbers_demos --example popover`

use std::rc::Rc;

use futures::future::LocalBoxFuture;
use kurbo::Rect;
use plumbers_content::{ContentLoader, ContentOptions, FetchError, Fetcher};
use plumbers_core::testing::{TestElement, TestEnv, TestHost};
use plumbers_core::{
    Callback, CallbackArgs, DismissOptions, Dismisser, Element, PlumberOptions, VisiblePolicy,
    Visibility, VisibilityOptions,
};
use plumbers_position::{FlipOptions, Flipper, ShiftOptions, Shifter};

/// Serves a fixed fragment for any URL.
#[derive(Debug)]
struct Fragments;

impl Fetcher for Fragments {
    fn fetch<'a>(&'a self, url: &'a str) -> LocalBoxFuture<'a, Result<String, FetchError>> {
        Box::pin(async move { Ok(format!("<ul><li>Loaded from {url}</li></ul>")) })
    }
}

fn report(host: &TestHost, step: &str) {
    println!("{step}: {:?}", host.event_types());
    host.clear_events();
}

fn main() {
    let env = TestEnv::new(1024.0, 768.0);
    let body = TestElement::new("body");
    let button = TestElement::new("button").with_rect(Rect::new(40.0, 700.0, 140.0, 730.0));
    let popover = TestElement::new("popover").with_rect(Rect::new(0.0, 0.0, 240.0, 160.0));
    popover.set_attribute("hidden", "");
    let host = TestHost::new("popover", Some(popover.clone()), env.clone());

    let visibility = Visibility::attach(&host, VisibilityOptions::default());
    host.register(&visibility.path(), visibility.predicate());
    let gated = || {
        PlumberOptions::default().with_visible(VisiblePolicy::Named(visibility.path()))
    };

    let hide = Rc::clone(&visibility);
    host.register(
        "dismissed",
        Callback::future(move |_: CallbackArgs<TestElement>| {
            let hide = Rc::clone(&hide);
            async move { hide.hide().await }
        }),
    );

    let loader = ContentLoader::attach(
        &host,
        ContentOptions::default()
            .with_url("/menu")
            .with_reload_attribute("stale")
            .with_fetcher(Rc::new(Fragments)),
    );
    let Some(flipper) = Flipper::attach(
        &host,
        FlipOptions::default()
            .with_plumber(gated())
            .with_anchor(button.clone()),
    ) else {
        return;
    };
    let shifter = Shifter::attach(&host, ShiftOptions::default().with_plumber(gated()));
    let _dismisser = Dismisser::attach(
        &host,
        DismissOptions::default()
            .with_plumber(gated())
            .with_trigger(button.clone()),
    );

    pollster::block_on(visibility.show());
    report(&host, "show");

    if let Err(err) = pollster::block_on(loader.load()) {
        println!("load failed: {err}");
    }
    println!("content: {:?}", loader.content());
    report(&host, "load");

    pollster::block_on(flipper.flip());
    println!(
        "placed at top={} left={}",
        popover.style("top"),
        popover.style("left")
    );
    report(&host, "flip");

    popover.set_rect(Rect::new(900.0, 300.0, 1140.0, 460.0));
    pollster::block_on(shifter.shift());
    println!("transform: {}", popover.style("transform"));
    report(&host, "shift");

    pollster::block_on(env.emit("click", Some(&body)));
    println!("hidden after outside click: {}", popover.has_attribute("hidden"));
    report(&host, "dismiss");

    host.disconnect();
    println!(
        "listeners after disconnect: click={} resize={}",
        env.listener_count("click"),
        env.listener_count("resize")
    );
}
