//! tvfocus: remote control focus navigation for TV interfaces.
//!
//! A TV interface has no pointer. One element at a time holds focus, and the
//! directional pad moves it. This crate owns that focus state: it collects
//! the elements eligible for focus from the view layer, resolves directional
//! moves geometrically with a linear fallback, and keeps focus valid as views
//! change and content appears or disappears.
//!
//! # Quick Start
//!
//! The main entry points are:
//! - [`NavigationSession`] - the focus state controller
//! - [`Surface`] - implemented by the view layer
//! - [`Shell`] - implemented by the application
//!
//! # Module Organization
//!
//! - [`registry`] - enumerating focusable elements
//! - [`spatial`] - geometric direction resolution
//! - [`linear`] - wrap-around index navigation
//! - [`policy`] - navigation bar transition rules
//! - [`event`] - remote actions and key code decoding

#![warn(missing_docs)]

/// Engine configuration.
pub mod config;
/// Element model.
mod element;
/// Error types.
pub mod error;
/// Remote input.
pub mod event;
/// Element identity.
mod id;
/// Linear fallback navigation.
pub mod linear;
/// Transition policies.
pub mod policy;
/// Deferred task scheduling.
pub mod poll;
/// Focusable registry.
pub mod registry;
/// Focus state controller.
mod session;
/// Spatial resolution.
pub mod spatial;
/// Collaborator interfaces.
pub mod surface;
/// View change synchronization.
mod sync;
/// Testing utilities.
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use config::Config;
pub use element::{Candidate, Category, ElementClass, FocusableElement};
pub use error::{Error, Result};
pub use event::{RemoteAction, key::KeyMap};
pub use geom::{Direction, Expanse, Rect};
pub use id::ElementId;
pub use registry::Registry;
pub use session::{Handled, Navigation, NavigationSession, SessionState, Via};
pub use surface::{Shell, Surface, TransientKey};
