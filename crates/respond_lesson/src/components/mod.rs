//! The lesson components.
//!
//! Stateless components are plain functions generic over the state of whoever embeds them,
//! stateful ones implement `Component` and are embedded with `SubComponent`.

pub mod alert_button;
pub mod app;
pub mod button;
pub mod counter;
pub mod image_gallery;
pub mod signup;
pub mod toolbar;
