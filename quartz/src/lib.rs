//! A CoreGraphics-style drawing context over an immediate-mode 2D engine.
//!
//! A [`Context`] exposes the familiar imperative API: paths, transforms,
//! `save`/`restore`, and fill, stroke and shadow attributes. The engine
//! behind it (see [`Engine`]) only knows about geometry and stroke
//! parameters, so the context keeps the remaining attributes in a parallel
//! stack of [`ShadowState`]s and moves both stacks in lock-step.

pub use kurbo;

/// Default values shared by the context and engines.
pub mod defaults;

mod color;
mod context;
mod engine;
mod error;
mod recording;
mod state;
mod style;

pub use crate::color::*;
pub use crate::context::*;
pub use crate::engine::*;
pub use crate::error::*;
pub use crate::recording::*;
pub use crate::state::*;
pub use crate::style::*;
