//! Submission handling: validation, the register call, and what the user sees
//! afterwards.

use client_core::{AuthError, AuthStore};
use crossbeam_channel::{Sender, TrySendError};
use tracing::{debug, info, warn};

use crate::{
    controller::events::{Toast, UiError, UiEvent, REGISTERED_MESSAGE, VERIFY_EMAIL_MESSAGE},
    form::{validate, Field, RegistrationForm, ValidationError},
    routes::Route,
    ui::{self, FormView},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPhase {
    Idle,
    Validating,
    Submitting,
    Succeeded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A registration is already running; nothing was done.
    Busy,
    /// This form already created an account; it is not sent again.
    AlreadyRegistered,
    Rejected(ValidationError),
    Registered(Route),
    Failed(UiError),
}

pub fn dispatch_ui_event(ui_tx: &Sender<UiEvent>, event: UiEvent) {
    let event_name = match &event {
        UiEvent::Toast(_) => "toast",
        UiEvent::Navigate(_) => "navigate",
    };

    match ui_tx.try_send(event) {
        Ok(()) => debug!(event = event_name, "queued controller->ui event"),
        Err(TrySendError::Full(_)) => {
            warn!(event = event_name, "UI event queue is full; event dropped");
        }
        Err(TrySendError::Disconnected(_)) => {
            warn!(event = event_name, "UI event receiver disconnected; event dropped");
        }
    }
}

pub struct RegistrationController {
    form: RegistrationForm,
    store: AuthStore,
    ui_tx: Sender<UiEvent>,
    phase: SubmissionPhase,
}

impl RegistrationController {
    /// Mounting the form discards any error left over from an earlier attempt.
    pub fn new(store: AuthStore, ui_tx: Sender<UiEvent>) -> Self {
        store.clear_error();
        Self {
            form: RegistrationForm::new(),
            store,
            ui_tx,
            phase: SubmissionPhase::Idle,
        }
    }

    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    fn inputs_locked(&self) -> bool {
        self.store.is_loading()
    }

    /// Returns `false` when the edit was ignored because inputs are disabled.
    pub fn edit(&mut self, field: Field, value: impl Into<String>) -> bool {
        if self.inputs_locked() {
            return false;
        }
        self.form.set_field(field, value);
        true
    }

    pub fn set_accept_terms(&mut self, accepted: bool) -> bool {
        if self.inputs_locked() {
            return false;
        }
        self.form.set_accept_terms(accepted);
        true
    }

    pub fn set_marketing_consent(&mut self, consent: bool) -> bool {
        if self.inputs_locked() {
            return false;
        }
        self.form.set_marketing_consent(consent);
        true
    }

    pub fn toggle_visibility(&mut self, field: Field) -> bool {
        if self.inputs_locked() {
            return false;
        }
        self.form.toggle_visibility(field);
        true
    }

    pub fn render(&self) -> FormView {
        ui::render(&self.form, &self.store.snapshot())
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        if self.phase == SubmissionPhase::Succeeded {
            debug!("submit ignored: account already created from this form");
            return SubmitOutcome::AlreadyRegistered;
        }
        if self.inputs_locked() {
            debug!("submit ignored: registration already in flight");
            return SubmitOutcome::Busy;
        }

        self.phase = SubmissionPhase::Validating;
        self.form.clear_error();
        self.store.clear_error();

        if let Err(err) = validate(&self.form) {
            debug!(reason = %err, "registration rejected before submit");
            self.form.set_error(UiError::from_validation(err).message());
            self.phase = SubmissionPhase::Idle;
            return SubmitOutcome::Rejected(err);
        }

        self.phase = SubmissionPhase::Submitting;
        let request = self.form.to_request();

        let result = self.store.register(&request).await;
        match result {
            Ok(_) => {
                // The store decides: no session tokens means the address
                // still has to be confirmed.
                let route = if self.store.tokens().is_none() {
                    self.emit(UiEvent::Toast(Toast::info(VERIFY_EMAIL_MESSAGE)));
                    Route::verify_email(request.email)
                } else {
                    self.emit(UiEvent::Toast(Toast::success(REGISTERED_MESSAGE)));
                    Route::Dashboard
                };
                let account_id = self.store.user().map(|user| user.id);
                info!(route = %route, account_id = ?account_id, "registration completed");
                self.emit(UiEvent::Navigate(route.clone()));
                self.phase = SubmissionPhase::Succeeded;
                SubmitOutcome::Registered(route)
            }
            Err(AuthError::Busy) => {
                self.phase = SubmissionPhase::Idle;
                SubmitOutcome::Busy
            }
            Err(err) => {
                let ui_error = UiError::from_api_error(&err.to_api_error());
                warn!(
                    code = %err.code(),
                    category = ?ui_error.category(),
                    context = ?ui_error.context(),
                    retryable = ui_error.is_retryable(),
                    "registration failed"
                );
                self.emit(UiEvent::Toast(Toast::error(ui_error.message())));
                self.phase = SubmissionPhase::Idle;
                SubmitOutcome::Failed(ui_error)
            }
        }
    }

    fn emit(&self, event: UiEvent) {
        dispatch_ui_event(&self.ui_tx, event);
    }
}
