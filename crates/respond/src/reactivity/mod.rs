//! Reactivity system for tracking dependencies and updates.

pub mod component;
pub(crate) mod render_callbacks;
pub mod signal;
pub mod state;
pub(crate) mod statics;

/// for keeping specific objects alive in memory such as sub component contexts
pub(crate) type KeepAlive = Box<dyn std::any::Any>;
