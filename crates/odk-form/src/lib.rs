//! odk-form
//!
//! Headless sales-order form: catalog-seeded defaults, field validation,
//! derived cost/total, and the submission state machine. Rendering is left
//! to the host (terminal, GUI, test harness); the host feeds edits in and
//! reads errors, status, and totals back out.
//!
//! Typical flow:
//! 1. [`mount`] fetches the catalog and seeds the product selection.
//! 2. The host calls [`OrderForm::edit`] for each input change.
//! 3. [`submit`] validates every field and, when all pass, sends one
//!    create-order request and records the outcome.

pub mod catalog;
pub mod form;
pub mod status;
pub mod submit;
pub mod validate;

pub use catalog::{load_catalog, mount, reload_catalog};
pub use form::{Field, OrderForm, OrderFormState, SubmitError, ValidationErrors};
pub use status::{StatusTone, SubmissionStatus, TransitionError};
pub use submit::{submit, SubmitOutcome};
