//! Entry submission from the command line

use colored::Colorize;

use crate::app::App;
use crate::cli::SubmitArgs;
use crate::commands::{print_notices, require_route};
use crate::device::FileCamera;
use crate::error::{MeetlogError, Result};
use crate::form::MeetingForm;
use crate::meeting::Product;
use crate::routes::Route;
use crate::submission::{SubmissionFlow, SubmitOutcome};

/// Fills in the dashboard form from `args` and submits it.
///
/// The location comes from the position source the app was built with;
/// when `--photo` is given the image file stands in for the camera.
///
/// # Errors
///
/// Returns an error when there is no session, a field value is not one of
/// the selector options, or the backend refuses the record.
pub async fn run(app: &App, args: SubmitArgs) -> Result<()> {
    require_route(app, Route::Dashboard)?;

    let flow = app.submission_flow();
    flow.mount().await;

    if let Err(e) = flow.edit(|form| fill(form, &args)) {
        print_notices(flow.notices());
        return Err(e);
    }

    if let Some(path) = &args.photo {
        if !flow.capture_photo(&FileCamera::new(path)).await {
            print_notices(flow.notices());
            return Err(MeetlogError::DeviceAccess(format!(
                "could not attach photo from {}",
                path.display()
            ))
            .into());
        }
    }

    let outcome = submit(&flow).await;
    print_notices(flow.notices());

    match outcome {
        SubmitOutcome::Saved => Ok(()),
        SubmitOutcome::Unauthenticated => {
            Err(MeetlogError::Unauthenticated("submit requires a session".to_string()).into())
        }
        SubmitOutcome::Invalid => {
            Err(MeetlogError::Validation("entry was not submitted".to_string()).into())
        }
        SubmitOutcome::Busy | SubmitOutcome::Failed => {
            Err(MeetlogError::Submission("entry was not saved".to_string()).into())
        }
    }
}

async fn submit(flow: &SubmissionFlow) -> SubmitOutcome {
    let form = flow.form();
    println!(
        "Submitting meeting with {} ({})",
        form.customer_name.cyan(),
        form.start.display_date
    );
    if form.location.is_empty() {
        println!("{}", "Location: not available".dimmed());
    } else {
        println!("Location: {}", form.location);
    }
    flow.submit().await
}

fn fill(form: &mut MeetingForm, args: &SubmitArgs) -> Result<()> {
    form.customer_name = args.customer_name.clone();
    form.customer_address = args.address.clone();
    form.phone_number = args.phone.clone();
    form.loan_expected = args.loan_expected.clone();
    form.remark2 = args.remark.clone();

    if let Some(source) = &args.source {
        form.select_source(source)?;
    }
    if let Some(name) = &args.source_name {
        form.set_source_name(name)?;
    }
    if let Some(status) = &args.status {
        form.select_status(status)?;
    }
    if let Some(status) = &args.other_status {
        form.set_other_status(status)?;
    }
    if let Some(product) = &args.product {
        form.product = Some(
            product
                .parse::<Product>()
                .map_err(|e| MeetlogError::Validation(format!("product: {}", e)))?,
        );
    }
    Ok(())
}
