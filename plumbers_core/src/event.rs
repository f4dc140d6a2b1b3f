// Copyright 2025 the Plumbers Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The namespaced event channel behaviors report through.

use alloc::format;
use alloc::string::String;

use plumbers_geometry::{Overflow, Placement};

/// Payload carried by behavior events and passed to host callbacks.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Detail {
    /// No payload.
    #[default]
    None,
    /// A content source about to be loaded.
    Url {
        /// Source URL; empty when content comes from a static provider.
        url: String,
    },
    /// Content that finished loading.
    Content {
        /// Source URL; empty when content came from a static provider.
        url: String,
        /// The loaded content.
        content: String,
    },
    /// Per-side overflow computed by the shift engine.
    Overflow(Overflow),
    /// Position chosen by the flip engine, or `None` when no side had room.
    Placement(Option<Placement>),
    /// A calendar navigation between two ISO dates.
    Navigation {
        /// Anchor date before navigating.
        from: String,
        /// Anchor date after navigating.
        to: String,
    },
}

/// Optional overrides for a single dispatch.
#[derive(Clone, Debug, PartialEq)]
pub struct EventInit<E> {
    /// Event target; defaults to the behavior's element.
    pub target: Option<E>,
    /// Event prefix; defaults to the behavior's prefix.
    pub prefix: Option<String>,
    /// Event payload.
    pub detail: Detail,
}

impl<E> Default for EventInit<E> {
    fn default() -> Self {
        Self {
            target: None,
            prefix: None,
            detail: Detail::None,
        }
    }
}

impl<E> EventInit<E> {
    /// Dispatch with the given payload and default target and prefix.
    pub fn detail(detail: Detail) -> Self {
        Self {
            detail,
            ..Self::default()
        }
    }
}

/// An event emitted on the host's dispatch channel.
#[derive(Clone, Debug, PartialEq)]
pub struct PlumberEvent<E> {
    /// Short event name, for example `dismissed`.
    pub name: String,
    /// Namespace, usually the host's identifier.
    pub prefix: String,
    /// Element the event is dispatched from.
    pub target: Option<E>,
    /// Payload.
    pub detail: Detail,
}

impl<E> PlumberEvent<E> {
    /// Fully qualified event type, `{prefix}:{name}`.
    pub fn event_type(&self) -> String {
        format!("{}:{}", self.prefix, self.name)
    }
}
