//! The order form component.
//!
//! Owns field values, per-field errors, the catalog snapshot, and the
//! submission status. Unit cost and total are derived from
//! `(catalog, selected product, quantity)` on every read and never stored.

use std::collections::BTreeMap;
use std::fmt;

use odk_api::ApiError;
use odk_schemas::{CreateOrderRequest, CreateOrderResponse, Micros, Product, ProductId};
use tracing::{error, info, warn};

use crate::status::{StatusEvent, SubmissionStatus, TransitionError, FAILURE_MESSAGE};
use crate::validate::{
    parse_quantity, validate_customer_id, validate_customer_name, validate_email,
    validate_product, validate_quantity,
};

// ---------------------------------------------------------------------------
// Field
// ---------------------------------------------------------------------------

/// User-editable fields. The unit cost is read-only and has no entry here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    CustomerName,
    CustomerId,
    UserEmail,
    Product,
    Quantity,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::CustomerName,
        Field::CustomerId,
        Field::UserEmail,
        Field::Product,
        Field::Quantity,
    ];

    /// Wire / input name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::CustomerName => "customer_name",
            Field::CustomerId => "customer_id",
            Field::UserEmail => "user_email",
            Field::Product => "product",
            Field::Quantity => "quantity",
        }
    }

    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.as_str() == name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ValidationErrors
// ---------------------------------------------------------------------------

/// Field → message. A missing key means the field is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<Field, &'static str>);

impl ValidationErrors {
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Errors in field order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.0.iter().map(|(f, m)| (*f, *m))
    }

    fn record(&mut self, field: Field, message: Option<&'static str>) {
        if let Some(m) = message {
            self.0.insert(field, m);
        }
    }

    fn clear(&mut self, field: Field) {
        self.0.remove(&field);
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|(k, m)| format!("{k}: {m}")).collect();
        f.write_str(&parts.join("; "))
    }
}

// ---------------------------------------------------------------------------
// OrderFormState
// ---------------------------------------------------------------------------

/// Raw field values as the user entered them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderFormState {
    pub customer_name: String,
    pub customer_id: String,
    pub user_email: String,
    /// Quantity text; parsed on demand.
    pub quantity: String,
    pub product: Option<ProductId>,
}

impl Default for OrderFormState {
    fn default() -> Self {
        Self {
            customer_name: String::new(),
            customer_id: String::new(),
            user_email: String::new(),
            quantity: "1".to_string(),
            product: None,
        }
    }
}

impl OrderFormState {
    /// Blank form with the first catalog entry pre-selected.
    pub fn defaults_for(catalog: &[Product]) -> Self {
        Self {
            product: catalog.first().map(|p| p.id),
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// SubmitError
// ---------------------------------------------------------------------------

/// Why a submit attempt did not reach the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// At least one field failed validation; every failure is listed.
    Invalid(ValidationErrors),
    /// A previous request is still outstanding.
    InFlight,
    /// Completion was reported without a matching begin.
    Transition(TransitionError),
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::Invalid(errors) => write!(f, "validation failed: {errors}"),
            SubmitError::InFlight => write!(f, "an order submission is already in progress"),
            SubmitError::Transition(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SubmitError {}

impl From<TransitionError> for SubmitError {
    fn from(e: TransitionError) -> Self {
        SubmitError::Transition(e)
    }
}

// ---------------------------------------------------------------------------
// OrderForm
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct OrderForm {
    catalog: Vec<Product>,
    state: OrderFormState,
    errors: ValidationErrors,
    status: SubmissionStatus,
    currency_label: String,
    last_order: Option<CreateOrderResponse>,
}

impl OrderForm {
    /// Empty form with no catalog. See [`crate::mount`] for the usual entry point.
    pub fn new(currency_label: impl Into<String>) -> Self {
        Self {
            catalog: Vec::new(),
            state: OrderFormState::default(),
            errors: ValidationErrors::default(),
            status: SubmissionStatus::Idle,
            currency_label: currency_label.into(),
            last_order: None,
        }
    }

    pub fn with_catalog(mut self, catalog: Vec<Product>) -> Self {
        self.set_catalog(catalog);
        self
    }

    /// Replace the catalog. The selection is re-seeded to the first entry
    /// only when it is unset or no longer present.
    pub fn set_catalog(&mut self, catalog: Vec<Product>) {
        self.catalog = catalog;
        let still_listed = self
            .state
            .product
            .map(|id| self.catalog.iter().any(|p| p.id == id))
            .unwrap_or(false);
        if !still_listed {
            self.state.product = self.catalog.first().map(|p| p.id);
        }
    }

    pub fn catalog(&self) -> &[Product] {
        &self.catalog
    }

    pub fn state(&self) -> &OrderFormState {
        &self.state
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    pub fn currency_label(&self) -> &str {
        &self.currency_label
    }

    /// Response of the most recent successful submission.
    pub fn last_order(&self) -> Option<&CreateOrderResponse> {
        self.last_order.as_ref()
    }

    /// Set a field from its input text and clear that field's error.
    ///
    /// For [`Field::Product`] the text is the product id; anything that is
    /// not an integer leaves no selection.
    pub fn edit(&mut self, field: Field, value: &str) {
        match field {
            Field::CustomerName => self.state.customer_name = value.to_string(),
            Field::CustomerId => self.state.customer_id = value.to_string(),
            Field::UserEmail => self.state.user_email = value.to_string(),
            Field::Quantity => self.state.quantity = value.to_string(),
            Field::Product => {
                self.state.product = value.trim().parse::<i64>().ok().map(ProductId)
            }
        }
        self.errors.clear(field);
    }

    pub fn select_product(&mut self, id: ProductId) {
        self.state.product = Some(id);
        self.errors.clear(Field::Product);
    }

    pub fn selected_product(&self) -> Option<&Product> {
        let id = self.state.product?;
        self.catalog.iter().find(|p| p.id == id)
    }

    /// Unit cost of the selected product; zero when nothing valid is selected.
    pub fn product_cost(&self) -> Micros {
        self.selected_product()
            .map(|p| p.cost)
            .unwrap_or(Micros::ZERO)
    }

    pub fn quantity(&self) -> Option<i64> {
        parse_quantity(&self.state.quantity)
    }

    /// `product_cost * quantity`; an unparseable quantity counts as zero.
    /// `None` only on overflow.
    pub fn total(&self) -> Option<Micros> {
        self.product_cost()
            .checked_mul_qty(self.quantity().unwrap_or(0))
    }

    /// Total with the currency label, two decimal places (`"Rs.24.98"`).
    pub fn total_display(&self) -> String {
        match self.total() {
            Some(t) => format!("{}{}", self.currency_label, t.to_fixed_2()),
            None => format!("{}n/a", self.currency_label),
        }
    }

    /// Run every field check; never stops at the first failure.
    pub fn validate(&self) -> ValidationErrors {
        let s = &self.state;
        let mut errors = ValidationErrors::default();
        errors.record(Field::CustomerName, validate_customer_name(&s.customer_name));
        errors.record(Field::CustomerId, validate_customer_id(&s.customer_id));
        errors.record(Field::UserEmail, validate_email(&s.user_email));
        errors.record(Field::Product, validate_product(&self.catalog, s.product));
        errors.record(Field::Quantity, validate_quantity(&s.quantity));
        errors
    }

    /// `false` while a create-order request is outstanding.
    pub fn can_submit(&self) -> bool {
        !self.status.is_in_flight()
    }

    /// First half of a submit: validate and, if everything passes, move to
    /// `Submitting` and hand back the request to send.
    ///
    /// On validation failure the errors are stored on the form, the status
    /// message is cleared, and nothing should be sent.
    pub fn begin_submit(&mut self) -> Result<CreateOrderRequest, SubmitError> {
        if !self.can_submit() {
            warn!("submit ignored: order request already in flight");
            return Err(SubmitError::InFlight);
        }

        let errors = self.validate();
        if !errors.is_empty() {
            warn!(invalid = errors.len(), errors = %errors, "order blocked by validation");
            self.status.apply(StatusEvent::ValidationFailed)?;
            self.errors = errors.clone();
            return Err(SubmitError::Invalid(errors));
        }

        // Both are guaranteed by the validation above.
        let (Some(product), Some(quantity)) = (self.state.product, self.quantity()) else {
            return Err(SubmitError::Invalid(self.validate()));
        };

        self.status.apply(StatusEvent::Begin)?;
        self.errors = ValidationErrors::default();

        Ok(CreateOrderRequest {
            customer_name: self.state.customer_name.clone(),
            customer_id: self.state.customer_id.clone(),
            user_email: self.state.user_email.clone(),
            product,
            quantity,
        })
    }

    /// Second half of a submit: record the outcome of the request.
    ///
    /// Success resets every field to its default (first catalog entry
    /// selected). Failure keeps the entered values so the user can retry.
    pub fn complete_submit(
        &mut self,
        outcome: &Result<CreateOrderResponse, ApiError>,
    ) -> Result<(), TransitionError> {
        match outcome {
            Ok(resp) => {
                self.status.apply(StatusEvent::Succeed)?;
                info!(order_id = %resp.id, "order placed");
                self.state = OrderFormState::defaults_for(&self.catalog);
                self.last_order = Some(resp.clone());
            }
            Err(e) => {
                self.status
                    .apply(StatusEvent::Fail(FAILURE_MESSAGE.to_string()))?;
                error!(error = %e, status = ?e.status_code(), "error creating order");
            }
        }
        Ok(())
    }
}
