//! DOM-related modules for building and rendering elements.

pub mod attributes;
pub mod classes;
pub mod document;
pub mod element;
pub mod events;
pub mod html_elements;

pub use attributes::ToAttribute;
pub use classes::ToClass;
pub(crate) use document::ListenerFn;
pub use document::{Document, NodeId};
pub use element::{Element, MaybeStaticElement};
pub use events::EventHandler;
pub use html_elements::HtmlElement;
