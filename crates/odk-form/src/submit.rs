//! Submit flow: validation gate, one create-order request, status update.

use odk_api::{ApiError, OrderApi};
use odk_schemas::CreateOrderResponse;

use crate::form::{OrderForm, SubmitError};

/// What happened to a request that was actually sent.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Placed(CreateOrderResponse),
    Failed(ApiError),
}

impl SubmitOutcome {
    pub fn is_placed(&self) -> bool {
        matches!(self, SubmitOutcome::Placed(_))
    }
}

/// Validate, send, and record the result on `form`.
///
/// `Err` means no request was sent. `Ok` means exactly one request was sent
/// and the form's status reflects its outcome.
pub async fn submit(
    form: &mut OrderForm,
    api: &dyn OrderApi,
) -> Result<SubmitOutcome, SubmitError> {
    let req = form.begin_submit()?;
    let result = api.create_order(&req).await;
    form.complete_submit(&result)?;

    Ok(match result {
        Ok(resp) => SubmitOutcome::Placed(resp),
        Err(e) => SubmitOutcome::Failed(e),
    })
}
