//! UI layer: the pure render step from form + auth state to a displayable view.

pub mod view;

pub use view::{render, FormView};
