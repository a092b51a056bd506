// SPDX-License-Identifier: Apache-2.0

use crate::errors::ApiErrorCode;

/// HTTP status for each error code. Kept in the wire crate so every
/// surface (server, client, CLI) agrees on the mapping.
#[must_use]
pub fn http_status_for(code: ApiErrorCode) -> u16 {
    match code {
        ApiErrorCode::ValidationError => 400,
        ApiErrorCode::DependencyError => 503,
        ApiErrorCode::Internal => 500,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_is_a_client_error_and_dependency_is_retryable() {
        assert_eq!(http_status_for(ApiErrorCode::ValidationError), 400);
        assert_eq!(http_status_for(ApiErrorCode::DependencyError), 503);
        assert_eq!(http_status_for(ApiErrorCode::Internal), 500);
    }
}
