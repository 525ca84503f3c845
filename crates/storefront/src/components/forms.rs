//! Form validation.
//!
//! Forms marked `.needs-validation` are registered with their fields. Each
//! field carries the browser's native constraints (required, length, input
//! type) plus a custom validity message maintained by the field validators
//! below. Submission is blocked while any field of the form is invalid.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use shopsphere_core::{IndianMobile, check_password_strength, passwords_match};
use tracing::debug;

use crate::presenter::{ElementId, Presenter};

/// Id of the password field that confirmation fields are compared against.
pub const PASSWORD_FIELD_ID: &str = "password";
/// Id of the password confirmation field.
pub const CONFIRM_PASSWORD_FIELD_ID: &str = "confirm_password";
/// Class marking a form whose submission was attempted.
pub const WAS_VALIDATED_CLASS: &str = "was-validated";

/// Input type of a form field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    #[default]
    Text,
    Email,
    /// Phone number; must be an Indian mobile number
    Tel,
    Password,
    /// Password being chosen (registration, reset); strength is enforced
    NewPassword,
}

/// A field as rendered with the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub id: ElementId,
    #[serde(default)]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub min_length: Option<usize>,
    #[serde(default)]
    pub max_length: Option<usize>,
    /// Initial value
    #[serde(default)]
    pub value: String,
}

impl FieldSpec {
    /// An optional text field with no constraints.
    #[must_use]
    pub fn new(id: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            id: ElementId::new(id),
            kind,
            required: false,
            min_length: None,
            max_length: None,
            value: String::new(),
        }
    }

    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub const fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    #[must_use]
    pub const fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }
}

/// A `.needs-validation` form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSpec {
    pub id: ElementId,
    pub fields: Vec<FieldSpec>,
}

/// Outcome of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitDecision {
    /// Let the submission through.
    Proceed,
    /// Prevent the default action and stop propagation.
    Blocked { invalid_fields: Vec<ElementId> },
}

impl SubmitDecision {
    #[must_use]
    pub const fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked { .. })
    }
}

#[derive(Debug)]
struct FieldState {
    spec: FieldSpec,
    value: String,
    custom_error: String,
}

impl FieldState {
    /// The browser's validation message, or `None` when the field is valid.
    fn validation_message(&self) -> Option<String> {
        let value = self.value.as_str();
        if value.is_empty() {
            return self
                .spec
                .required
                .then(|| "Please fill out this field".to_string())
                .or_else(|| self.custom_message());
        }

        if self.spec.kind == FieldKind::Email && !is_email_shaped(value) {
            return Some("Please enter an email address".to_string());
        }

        let length = value.chars().count();
        if let Some(min) = self.spec.min_length.filter(|min| length < *min) {
            return Some(format!("Please use at least {min} characters"));
        }
        if let Some(max) = self.spec.max_length.filter(|max| length > *max) {
            return Some(format!("Please use no more than {max} characters"));
        }

        self.custom_message()
    }

    fn custom_message(&self) -> Option<String> {
        (!self.custom_error.is_empty()).then(|| self.custom_error.clone())
    }
}

#[derive(Debug)]
struct FormState {
    fields: Vec<FieldState>,
}

impl FormState {
    fn field_mut(&mut self, id: &str) -> Option<&mut FieldState> {
        self.fields.iter_mut().find(|f| f.spec.id.as_str() == id)
    }

    fn value_of(&self, id: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.spec.id.as_str() == id)
            .map(|f| f.value.as_str())
    }
}

#[derive(Debug, Default)]
struct Forms {
    forms: HashMap<ElementId, FormState>,
    /// Field id to the id of the form holding it
    owners: HashMap<ElementId, ElementId>,
}

/// Validates registered forms.
pub struct FormValidator {
    presenter: Arc<dyn Presenter>,
    forms: Mutex<Forms>,
}

impl FormValidator {
    #[must_use]
    pub fn new(presenter: Arc<dyn Presenter>) -> Self {
        Self {
            presenter,
            forms: Mutex::new(Forms::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Forms> {
        self.forms.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register forms; registering a form id again replaces it.
    pub fn register(&self, forms: &[FormSpec]) {
        let mut state = self.lock();
        for form in forms {
            for field in &form.fields {
                state.owners.insert(field.id.clone(), form.id.clone());
            }
            let fields = form
                .fields
                .iter()
                .map(|spec| FieldState {
                    value: spec.value.clone(),
                    spec: spec.clone(),
                    custom_error: String::new(),
                })
                .collect();
            state.forms.insert(form.id.clone(), FormState { fields });
            debug!(form = %form.id, fields = form.fields.len(), "Registered form");
        }
    }

    /// Handle an input event on a field; unknown fields are ignored.
    pub fn on_field_input(&self, field_id: &ElementId, value: &str) {
        let mut state = self.lock();
        let Some(form_id) = state.owners.get(field_id).cloned() else {
            return;
        };
        let Some(form) = state.forms.get_mut(&form_id) else {
            return;
        };
        let Some(field) = form.field_mut(field_id.as_str()) else {
            return;
        };
        field.value = value.to_string();
        let kind = field.spec.kind;

        let message = match kind {
            FieldKind::Tel => Some(phone_message(value)),
            FieldKind::NewPassword => Some(strength_message(value)),
            _ => None,
        };
        if let Some(message) = message {
            self.set_custom(form, field_id.as_str(), message);
        }

        match field_id.as_str() {
            CONFIRM_PASSWORD_FIELD_ID => {
                let password = form.value_of(PASSWORD_FIELD_ID).unwrap_or_default();
                let message = confirmation_message(password, value);
                self.set_custom(form, CONFIRM_PASSWORD_FIELD_ID, message);
            }
            PASSWORD_FIELD_ID => {
                let confirmation = form
                    .value_of(CONFIRM_PASSWORD_FIELD_ID)
                    .filter(|c| !c.is_empty())
                    .map(str::to_string);
                if let Some(confirmation) = confirmation {
                    let message = confirmation_message(value, &confirmation);
                    self.set_custom(form, CONFIRM_PASSWORD_FIELD_ID, message);
                }
            }
            _ => {}
        }
    }

    /// The current validation message of a field, `None` when valid or unknown.
    #[must_use]
    pub fn validation_message(&self, field_id: &ElementId) -> Option<String> {
        let state = self.lock();
        let form = state.forms.get(state.owners.get(field_id)?)?;
        form.fields
            .iter()
            .find(|f| &f.spec.id == field_id)?
            .validation_message()
    }

    /// Handle a submit attempt.
    ///
    /// Registered forms are always marked `was-validated`; forms that were
    /// never registered are not validated.
    pub fn on_form_submit(&self, form_id: &ElementId) -> SubmitDecision {
        let state = self.lock();
        let Some(form) = state.forms.get(form_id) else {
            return SubmitDecision::Proceed;
        };

        let invalid_fields: Vec<ElementId> = form
            .fields
            .iter()
            .filter(|f| f.validation_message().is_some())
            .map(|f| f.spec.id.clone())
            .collect();
        self.presenter.add_class(form_id, WAS_VALIDATED_CLASS);

        if invalid_fields.is_empty() {
            SubmitDecision::Proceed
        } else {
            debug!(form = %form_id, invalid = invalid_fields.len(), "Form submission blocked");
            SubmitDecision::Blocked { invalid_fields }
        }
    }

    fn set_custom(&self, form: &mut FormState, field_id: &str, message: String) {
        if let Some(field) = form.field_mut(field_id) {
            self.presenter.set_custom_validity(&field.spec.id, &message);
            field.custom_error = message;
        }
    }
}

fn phone_message(value: &str) -> String {
    IndianMobile::parse(value).err().map(|e| e.to_string()).unwrap_or_default()
}

fn strength_message(value: &str) -> String {
    check_password_strength(value)
        .err()
        .map(|e| e.to_string())
        .unwrap_or_default()
}

fn confirmation_message(password: &str, confirmation: &str) -> String {
    passwords_match(password, confirmation)
        .err()
        .map(|e| e.to_string())
        .unwrap_or_default()
}

/// Browser `type=email` shape: non-empty local part and domain around one `@`.
fn is_email_shaped(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}
