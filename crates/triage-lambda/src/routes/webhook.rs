use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Uri, header};
use axum::response::IntoResponse;

use triage_core::signature::{FormParams, SIGNATURE_HEADER};
use triage_core::twiml;

use crate::error::ApiError;
use crate::pipeline::{self, WebhookRequest};
use crate::state::AppState;

/// Inbound message webhook. Replies with TwiML.
pub async fn receive_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let request = WebhookRequest {
        url: public_url(&state, &headers, &uri),
        signature: headers
            .get(SIGNATURE_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string(),
        params: FormParams::parse(&body),
    };

    let reply = pipeline::process(&state, &request).await?;

    Ok(([(header::CONTENT_TYPE, twiml::CONTENT_TYPE)], reply))
}

/// The URL the provider signed: `WEBHOOK_URL` when configured, otherwise
/// `https://{Host}{path}` as seen behind API Gateway.
fn public_url(state: &AppState, headers: &HeaderMap, uri: &Uri) -> String {
    if let Some(url) = &state.webhook_url {
        return url.clone();
    }
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    format!("https://{host}{}", uri.path())
}
