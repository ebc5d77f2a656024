//! Classify search errors into retry policy error kinds.

use super::policy::ErrorKind;
use crate::search::SearchError;

/// Classify an HTTP status code returned by the search endpoint.
pub fn classify_http_status(code: u32) -> ErrorKind {
    match code {
        429 | 503 => ErrorKind::Throttled,
        500..=599 => ErrorKind::Server(code as u16),
        _ => ErrorKind::Permanent,
    }
}

/// Classify a curl error for retry decisions.
pub fn classify_curl_error(e: &curl::Error) -> ErrorKind {
    if e.is_operation_timedout() {
        return ErrorKind::Timeout;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
        || e.is_partial_file()
    {
        return ErrorKind::Connection;
    }
    ErrorKind::Permanent
}

/// Classify a search error into an `ErrorKind`.
pub fn classify(e: &SearchError) -> ErrorKind {
    match e {
        SearchError::Transport(ce) => classify_curl_error(ce),
        SearchError::Http(code) => classify_http_status(*code),
        // Engines answer with an HTML captcha page when they start blocking.
        SearchError::Malformed(_) => ErrorKind::Throttled,
        SearchError::Endpoint { .. } | SearchError::Aborted => ErrorKind::Permanent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limits_are_throttled() {
        assert_eq!(classify_http_status(429), ErrorKind::Throttled);
        assert_eq!(classify_http_status(503), ErrorKind::Throttled);
        assert_eq!(
            classify(&SearchError::Malformed("<html>".into())),
            ErrorKind::Throttled
        );
    }

    #[test]
    fn server_errors_keep_their_code() {
        assert_eq!(classify_http_status(502), ErrorKind::Server(502));
        assert_eq!(classify(&SearchError::Http(500)), ErrorKind::Server(500));
    }

    #[test]
    fn client_errors_and_config_problems_are_permanent() {
        assert_eq!(classify_http_status(404), ErrorKind::Permanent);
        assert_eq!(classify_http_status(403), ErrorKind::Permanent);
        assert_eq!(
            classify(&SearchError::Endpoint {
                endpoint: "x".into(),
                reason: "y".into()
            }),
            ErrorKind::Permanent
        );
        assert_eq!(classify(&SearchError::Aborted), ErrorKind::Permanent);
    }
}
