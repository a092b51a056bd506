// SPDX-License-Identifier: Apache-2.0

use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use causeway_api::{http_status_for, ApiError};

#[must_use]
pub(crate) fn api_error_response(err: ApiError) -> Response {
    let status = StatusCode::from_u16(http_status_for(err.code))
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = Json(err.into_envelope());
    let mut resp = (status, body).into_response();
    if status == StatusCode::SERVICE_UNAVAILABLE {
        resp.headers_mut()
            .insert("retry-after", HeaderValue::from_static("3"));
    }
    resp
}
