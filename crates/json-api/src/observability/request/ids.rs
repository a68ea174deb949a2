//! Request IDs.

use salvo::{http::header::HeaderValue, prelude::Response};
use tracing::warn;
use uuid::Uuid;

pub(super) const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest client-supplied request id that is trusted.
const MAX_REQUEST_ID_LEN: usize = 128;

/// Reuse a sane client-supplied id, otherwise mint a UUIDv7.
pub(super) fn resolve(incoming: Option<String>) -> String {
    incoming
        .map(|value| value.trim().to_owned())
        .filter(|value| is_acceptable(value))
        .unwrap_or_else(|| Uuid::now_v7().to_string())
}

fn is_acceptable(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= MAX_REQUEST_ID_LEN
        && value.bytes().all(|byte| byte.is_ascii_graphic())
}

pub(super) fn echo(res: &mut Response, request_id: &str) {
    match HeaderValue::from_str(request_id) {
        Ok(value) => {
            res.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        Err(source) => warn!(
            request_id,
            "could not encode request id for response header: {source}"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_id_is_replaced() {
        let id = resolve(Some("   ".to_string()));

        assert!(Uuid::parse_str(&id).is_ok(), "expected a uuid, got {id:?}");
    }

    #[test]
    fn oversized_or_unprintable_ids_are_replaced() {
        let long = "x".repeat(MAX_REQUEST_ID_LEN + 1);

        assert_ne!(resolve(Some(long.clone())), long);
        assert_ne!(resolve(Some("bad id".to_string())), "bad id");
    }

    #[test]
    fn trimmed_client_id_is_kept() {
        assert_eq!(resolve(Some(" abc-123 ".to_string())), "abc-123");
    }
}
