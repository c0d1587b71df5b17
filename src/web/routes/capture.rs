use std::convert::Infallible;

use axum::{
    body::Bytes,
    extract::{FromRequest, Request, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};
use tower_cookies::Cookies;
use tracing::{error, info};

use crate::{
    model::{self, CaptureOutcome, LeadBmc},
    web::{
        flash,
        types::{CaptureAck, CaptureForm, DataParsingError},
    },
    AppState,
};

pub const INVALID_GMAIL_MSG: &str = "Please enter a valid Gmail address";
pub const CAPTURE_FAILED_MSG: &str = "An error occurred. Please try again.";

// ###################################
// ->   ERROR
// ###################################
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("invalid submission: {0}")]
    Invalid(#[from] DataParsingError),
    #[error("unreadable request body: {0}")]
    Body(String),
    #[error("model error: {0}")]
    Model(#[from] model::Error),
}

// ###################################
// ->   EXTRACTOR
// ###################################
/// How the client wants to be answered.
/// Requests declaring a JSON body get JSON back, everything else gets a redirect to the landing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseMode {
    Json,
    Redirect,
}

impl ResponseMode {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        if has_media_type(headers, "application/json") {
            ResponseMode::Json
        } else {
            ResponseMode::Redirect
        }
    }
}

/// A capture request: the response mode and the (possibly unreadable) submitted form.
/// Never rejects, a body we can't read is answered in the requested response mode.
pub struct CaptureSubmission {
    mode: ResponseMode,
    form: Result<CaptureForm, CaptureError>,
}

impl<S> FromRequest<S> for CaptureSubmission
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mode = ResponseMode::from_headers(req.headers());
        let form = match mode {
            ResponseMode::Json => read_json_form(req, state).await,
            ResponseMode::Redirect => read_url_encoded_form(req, state).await,
        };

        Ok(Self { mode, form })
    }
}

// ###################################
// ->   API
// ###################################
/// Captures a lead. All failures are answered here, nothing propagates.
#[tracing::instrument(name = "capture_lead", skip_all, fields(mode = ?submission.mode))]
pub async fn capture_lead(
    State(app_state): State<AppState>,
    cookies: Cookies,
    submission: CaptureSubmission,
) -> Response {
    let CaptureSubmission { mode, form } = submission;

    let result = match form {
        Ok(form) => capture(&app_state, form).await,
        Err(er) => Err(er),
    };

    match (result, mode) {
        (Ok(()), ResponseMode::Json) => Json(CaptureAck::captured()).into_response(),
        (Ok(()), ResponseMode::Redirect) => redirect_home(),

        (Err(CaptureError::Invalid(er)), mode) => {
            info!(reason = %er, "Rejected lead submission");
            match mode {
                ResponseMode::Json => (
                    StatusCode::BAD_REQUEST,
                    Json(CaptureAck::failed(INVALID_GMAIL_MSG)),
                )
                    .into_response(),
                ResponseMode::Redirect => {
                    flash::set_flash_error(&cookies, &app_state.cookie_key, INVALID_GMAIL_MSG);
                    redirect_home()
                }
            }
        }

        (Err(er), mode) => {
            error!("Error capturing lead: {er}");
            match mode {
                ResponseMode::Json => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(CaptureAck::failed(er.to_string())),
                )
                    .into_response(),
                ResponseMode::Redirect => {
                    flash::set_flash_error(&cookies, &app_state.cookie_key, CAPTURE_FAILED_MSG);
                    redirect_home()
                }
            }
        }
    }
}

/// Validates the form and stores the email unless it's blank or already on file.
async fn capture(app_state: &AppState, form: CaptureForm) -> Result<(), CaptureError> {
    let Some(email) = form.into_email()? else {
        info!("Empty submission, nothing to store");
        return Ok(());
    };

    match LeadBmc::capture(&app_state.model_mgr, email.as_ref()).await? {
        CaptureOutcome::Created(lead) => {
            info!(lead_id = lead.id, "New lead captured: {}", email.as_ref())
        }
        CaptureOutcome::Duplicate => info!("Existing lead attempted: {}", email.as_ref()),
    }

    Ok(())
}

// ###################################
// ->   HELPERS
// ###################################
/// `302 Found` back to the landing page.
fn redirect_home() -> Response {
    (StatusCode::FOUND, [(header::LOCATION, "/")]).into_response()
}

/// Compares the media type of the `Content-Type` header, ignoring parameters like `charset`.
fn has_media_type(headers: &HeaderMap, expected: &str) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|ct| ct.to_str().ok())
        .and_then(|ct| ct.split(';').next())
        .is_some_and(|media_type| media_type.trim().eq_ignore_ascii_case(expected))
}

async fn read_json_form<S>(req: Request, state: &S) -> Result<CaptureForm, CaptureError>
where
    S: Send + Sync,
{
    let body = Bytes::from_request(req, state)
        .await
        .map_err(|rej| CaptureError::Body(rej.body_text()))?;

    // An empty body carries no `gmail` field.
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(CaptureForm::default());
    }

    serde_json::from_slice(&body).map_err(|er| CaptureError::Body(er.to_string()))
}

async fn read_url_encoded_form<S>(req: Request, state: &S) -> Result<CaptureForm, CaptureError>
where
    S: Send + Sync,
{
    // Bodies of any other type carry no `gmail` field.
    if !has_media_type(req.headers(), "application/x-www-form-urlencoded") {
        return Ok(CaptureForm::default());
    }

    Form::<CaptureForm>::from_request(req, state)
        .await
        .map(|Form(form)| form)
        .map_err(|rej| CaptureError::Body(rej.body_text()))
}
