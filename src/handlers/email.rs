use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::response::ServiceResponse;
use crate::services::email;

#[derive(Debug, Deserialize)]
pub struct SendEmailRequest {
    pub to: String,
    pub subject: String,
    pub body: String,
    #[serde(default)]
    pub is_html: bool,
}

/// POST /api/email/send - send a notification email through the configured
/// SMTP transport
pub async fn send(Json(request): Json<SendEmailRequest>) -> Response {
    match email::mailer() {
        Some(mailer) => mailer
            .send(&request.to, &request.subject, &request.body, request.is_html)
            .await
            .into_response(),
        None => {
            ServiceResponse::<bool>::error("Email settings not configured", 500).into_response()
        }
    }
}
