//! Content, interaction state and view transforms for the paddock page.
//!
//! Renderers only ever see [`paddock_protocol::RenderCommand`]s produced
//! by [`Page::render`] and answer with
//! [`paddock_protocol::Interaction`]s fed to [`Page::dispatch`].

pub mod animation;
pub mod data;
pub mod error;
pub mod geometry;
pub mod model;
pub mod page;
pub mod selection;
pub mod svg;
pub mod views;

pub use error::Error;
pub use page::{Page, SectionId, SectionSlot};
pub use selection::{Keyed, Selection, SelectionPolicy};
