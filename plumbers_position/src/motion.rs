// Copyright 2025 the Plumbers Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

use plumbers_core::{Element, Environment};

/// Suppresses CSS transitions on an element while alive.
///
/// On creation the inline `transition` is saved and replaced with `none`; on
/// drop the saved value is written back (an empty value clears the property).
#[derive(Debug)]
#[must_use = "transitions are restored as soon as the guard is dropped"]
pub struct MotionGuard<E: Element> {
    element: E,
    previous: String,
}

impl<E: Element> MotionGuard<E> {
    /// Suppress transitions on `element` unconditionally.
    pub fn suppress(element: &E) -> Self {
        let previous = element.style("transition");
        element.set_style("transition", "none");
        Self {
            element: element.clone(),
            previous,
        }
    }

    /// Suppress transitions when `respect` is set and the environment asks for
    /// reduced motion.
    pub fn for_env<Env>(env: &Env, element: &E, respect: bool) -> Option<Self>
    where
        Env: Environment<Element = E>,
    {
        (respect && env.prefers_reduced_motion()).then(|| Self::suppress(element))
    }
}

impl<E: Element> Drop for MotionGuard<E> {
    fn drop(&mut self) {
        self.element.set_style("transition", &self.previous);
    }
}
