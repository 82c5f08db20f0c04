//! Controller layer: UI events, error modeling, and submission orchestration.

pub mod events;
pub mod orchestration;

pub use events::{ToastSeverity, UiEvent};
pub use orchestration::{RegistrationController, SubmitOutcome};

#[cfg(test)]
#[path = "../tests/controller_tests.rs"]
mod tests;
