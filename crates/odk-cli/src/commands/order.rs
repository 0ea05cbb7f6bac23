//! `odk place-order` and `odk validate`.
//!
//! Both take the same flags. `place-order` mounts the form against the live
//! API, applies the flags as edits, and submits once. `validate` runs the
//! field validators offline; product membership needs the catalog and is
//! only checked by `place-order`.

use anyhow::{bail, Result};
use clap::Args;
use odk_api::HttpOrderApi;
use odk_config::ClientConfig;
use odk_form::validate::{
    validate_customer_id, validate_customer_name, validate_email, validate_quantity,
};
use odk_form::{Field, OrderForm, SubmitError, SubmitOutcome, ValidationErrors};

#[derive(Debug, Clone, Args)]
pub struct OrderArgs {
    /// Customer name (letters and spaces)
    #[arg(long, default_value = "")]
    pub customer_name: String,

    /// Customer ID (8+ digits/symbols)
    #[arg(long, default_value = "")]
    pub customer_id: String,

    /// Contact email
    #[arg(long = "email", default_value = "")]
    pub user_email: String,

    /// Product id; defaults to the first catalog entry
    #[arg(long)]
    pub product: Option<String>,

    /// Quantity; defaults to 1
    #[arg(long, allow_hyphen_values = true)]
    pub quantity: Option<String>,
}

impl OrderArgs {
    fn apply_to(&self, form: &mut OrderForm) {
        form.edit(Field::CustomerName, &self.customer_name);
        form.edit(Field::CustomerId, &self.customer_id);
        form.edit(Field::UserEmail, &self.user_email);
        if let Some(product) = &self.product {
            form.edit(Field::Product, product);
        }
        if let Some(quantity) = &self.quantity {
            form.edit(Field::Quantity, quantity);
        }
    }
}

// ---------------------------------------------------------------------------
// place-order
// ---------------------------------------------------------------------------

pub async fn run_place_order(client: ClientConfig, args: OrderArgs) -> Result<()> {
    let api = HttpOrderApi::new(client.clone());
    let mut form = odk_form::mount(&api, &client).await;
    args.apply_to(&mut form);

    if let Some(p) = form.selected_product() {
        println!("product={} name={}", p.id, p.name);
    }
    println!("product_cost={}", form.product_cost().to_fixed_2());
    println!("total={}", form.total_display());

    match odk_form::submit(&mut form, &api).await {
        Ok(SubmitOutcome::Placed(resp)) => {
            print_status(&form);
            println!("order_id={}", resp.id);
            Ok(())
        }
        Ok(SubmitOutcome::Failed(e)) => {
            print_status(&form);
            bail!("ORDER_FAILED: {e}");
        }
        Err(SubmitError::Invalid(errors)) => {
            print_errors(&errors);
            bail!("ORDER_INVALID: {} field(s) failed validation", errors.len());
        }
        Err(e) => Err(e.into()),
    }
}

fn print_status(form: &OrderForm) {
    if let Some(msg) = form.status().message() {
        println!("status={msg}");
    }
}

fn print_errors(errors: &ValidationErrors) {
    for (field, msg) in errors.iter() {
        println!("invalid field={field} error=\"{msg}\"");
    }
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

pub fn run_validate(args: &OrderArgs) -> Result<()> {
    let checks = [
        (Field::CustomerName, validate_customer_name(&args.customer_name)),
        (Field::CustomerId, validate_customer_id(&args.customer_id)),
        (Field::UserEmail, validate_email(&args.user_email)),
        (
            Field::Quantity,
            validate_quantity(args.quantity.as_deref().unwrap_or("1")),
        ),
    ];

    let mut failed = 0usize;
    for (field, msg) in checks {
        if let Some(msg) = msg {
            println!("invalid field={field} error=\"{msg}\"");
            failed += 1;
        }
    }

    if failed > 0 {
        bail!("ORDER_INVALID: {failed} field(s) failed validation");
    }
    println!("valid=true");
    Ok(())
}
