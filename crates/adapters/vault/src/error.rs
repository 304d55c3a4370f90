//! Error mapping for Vault responses

use reqwest::StatusCode;
use serde::Deserialize;
use vr_errors::AppError;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<String>,
}

/// Human-readable detail from a Vault error body.
///
/// Vault answers errors as `{"errors": [...]}`; anything else is passed
/// through trimmed, falling back to the status reason.
pub fn error_detail(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if !parsed.errors.is_empty() {
            return parsed.errors.join("; ");
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("no response body")
            .to_string()
    } else {
        trimmed.to_string()
    }
}

/// Map a non-success login status.
///
/// A reachable store that refuses the login is an auth rejection; server-side
/// failures stay transport errors.
pub fn map_login_status(status: StatusCode, detail: &str) -> AppError {
    let msg = format!("AppID authentication failed ({}): {}", status.as_u16(), detail);
    if status.is_client_error() {
        AppError::auth_rejected(msg)
    } else {
        AppError::transport(msg)
    }
}

/// Map a non-success read status. 404 never reaches here; it means "absent".
pub fn map_read_status(status: StatusCode, detail: &str) -> AppError {
    AppError::transport(format!("{} {}", status.as_u16(), detail))
}

/// Convert a reqwest failure (DNS, TLS, connect, body) to a transport error
pub fn map_transport_error(err: reqwest::Error, context: &str) -> AppError {
    AppError::transport(format!("{}: {}", context, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vr_errors::ErrorKind;

    #[test]
    fn test_detail_joins_vault_errors() {
        let detail = error_detail(
            StatusCode::FORBIDDEN,
            r#"{"errors":["permission denied","invalid token"]}"#,
        );
        assert_eq!(detail, "permission denied; invalid token");
    }

    #[test]
    fn test_detail_falls_back_to_body_then_reason() {
        assert_eq!(
            error_detail(StatusCode::BAD_GATEWAY, "  upstream down \n"),
            "upstream down"
        );
        assert_eq!(
            error_detail(StatusCode::SERVICE_UNAVAILABLE, ""),
            "Service Unavailable"
        );
        assert_eq!(error_detail(StatusCode::BAD_REQUEST, r#"{"errors":[]}"#), r#"{"errors":[]}"#);
    }

    #[test]
    fn test_map_login_denied() {
        let err = map_login_status(StatusCode::BAD_REQUEST, "invalid user ID or app ID");
        assert_eq!(err.kind(), ErrorKind::AuthRejected);
        assert!(err.to_string().contains("invalid user ID"));
    }

    #[test]
    fn test_map_login_forbidden() {
        let err = map_login_status(StatusCode::FORBIDDEN, "permission denied");
        assert_eq!(err.kind(), ErrorKind::AuthRejected);
    }

    #[test]
    fn test_map_login_server_error() {
        let err = map_login_status(StatusCode::SERVICE_UNAVAILABLE, "Vault is sealed");
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[test]
    fn test_map_read_error() {
        let err = map_read_status(StatusCode::FORBIDDEN, "permission denied");
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(err.to_string(), "Transport error: 403 permission denied");
    }
}
