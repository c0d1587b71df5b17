use axum::http::{Method, StatusCode, Uri};
use serde::Serialize;
use serde_json::json;
use serde_with::skip_serializing_none;
use tracing::debug;

use super::error::ClientError;
use crate::web::Error;

/// Logs one `LogLine` per request at debug level.
pub fn log_request(
    req_id: String,
    req_method: Method,
    uri: Uri,
    status_code: StatusCode,
    web_error: Option<&Error>,
    client_status_and_error: Option<&(StatusCode, ClientError)>,
) {
    let logline = LogLine::new(
        req_id,
        req_method,
        uri,
        status_code,
        web_error,
        client_status_and_error,
    );

    debug!("LOGLINE: {}", json!(logline));
}

#[skip_serializing_none]
#[derive(Serialize)]
struct LogLine {
    timestamp: String,
    req_id: String,

    req_method: String,
    uri: String,
    status_code: u16,

    client_error_type: Option<String>,
    web_error_type: Option<String>,
    web_error_data: Option<String>,
}

impl LogLine {
    fn new(
        req_id: String,
        req_method: Method,
        uri: Uri,
        status_code: StatusCode,
        web_error: Option<&Error>,
        client_status_and_error: Option<&(StatusCode, ClientError)>,
    ) -> Self {
        let timestamp = chrono::Utc::now().to_rfc3339();
        let req_method = req_method.to_string();
        let uri = uri.to_string();
        let client_error_type = client_status_and_error.map(|(_, ce)| ce.as_ref().to_string());
        let status_code = client_status_and_error
            .map(|(sc, _)| sc.as_u16())
            .unwrap_or(status_code.as_u16());
        let web_error_type = web_error.map(|we| we.as_ref().to_string());
        let web_error_data = web_error.map(|we| we.to_string());

        LogLine {
            timestamp,
            req_id,
            req_method,
            uri,
            status_code,
            client_error_type,
            web_error_type,
            web_error_data,
        }
    }
}
