//! Handlers for the `/contact` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use folio_db::models::contact::{ContactSubmission, CreateContactSubmission};
use folio_db::repositories::ContactRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Request body for `POST /contact`.
#[derive(Debug, Deserialize, Validate)]
pub struct ContactRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "Please add a name"))]
    pub name: String,
    #[serde(default)]
    #[validate(email(message = "Please add a valid email"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 5000, message = "Please add a message"))]
    pub message: String,
}

/// POST /api/contact
///
/// Store the submission, then notify the site owner. A failed notice is
/// logged and does not fail the request.
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(input): Json<ContactRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<ContactSubmission>>)> {
    input.validate()?;

    let submission = ContactRepo::create(
        &state.pool,
        &CreateContactSubmission {
            name: input.name.trim().to_string(),
            email: input.email.trim().to_string(),
            message: input.message,
        },
    )
    .await?;
    tracing::info!(id = submission.id, "Contact submission stored");

    match state.config.contact_notify_email.as_deref() {
        Some(owner) => {
            let (subject, body) = notice(&submission);
            if let Err(err) = state.mailer.send(owner, &subject, &body).await {
                tracing::warn!(id = submission.id, error = %err, "Contact notice not sent");
            }
        }
        None => tracing::debug!("No contact notice recipient configured"),
    }

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(submission).with_message("Message sent successfully")),
    ))
}

/// GET /api/contact
pub async fn list_contacts(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<ContactSubmission>>>> {
    let submissions = ContactRepo::list(&state.pool).await?;
    Ok(Json(ApiResponse::list(submissions)))
}

fn notice(submission: &ContactSubmission) -> (String, String) {
    let subject = format!("New Contact Form Submission from {}", submission.name);
    let body = format!(
        "You have received a new message from your website contact form.\n\n\
         Name: {}\nEmail: {}\n\nMessage:\n{}",
        submission.name, submission.email, submission.message
    );
    (subject, body)
}
