//! Axum extractor for processed form submissions
//!
//! This module provides the `Submitted` extractor that runs an urlencoded form
//! body through a [`FormController`] before it reaches handlers.

use crate::core::context::FormValues;
use crate::form::FormController;
use axum::{
    Form, Json,
    extract::{FromRef, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

/// Axum extractor that formats, composes and validates a form submission
///
/// The controller is taken from router state.
///
/// # Usage
///
/// ```rust,ignore
/// async fn post_dob(Submitted(values): Submitted) -> String {
///     // values["dob"] is "1999-12-01", values["dob-formatted"] is "1 December 1999"
///     values["dob-formatted"].to_string()
/// }
///
/// let app = Router::new()
///     .route("/dob", post(post_dob))
///     .with_state(Arc::new(controller));
/// ```
pub struct Submitted(pub FormValues);

impl Submitted {
    /// Get the inner values
    pub fn into_inner(self) -> FormValues {
        self.0
    }
}

impl std::ops::Deref for Submitted {
    type Target = FormValues;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequest<S> for Submitted
where
    S: Send + Sync,
    Arc<FormController>: FromRef<S>,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let controller = Arc::<FormController>::from_ref(state);

        let Form(body) = match Form::<HashMap<String, String>>::from_request(req, state).await {
            Ok(form) => form,
            Err(e) => {
                return Err((
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "Invalid form body",
                        "details": e.to_string()
                    })),
                )
                    .into_response());
            }
        };

        let ctx = controller.submit(body).map_err(IntoResponse::into_response)?;

        match ctx.into_result() {
            Ok(values) => Ok(Submitted(values)),
            Err(errors) => Err((
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({
                    "error": "Validation failed",
                    "errors": errors
                })),
            )
                .into_response()),
        }
    }
}
