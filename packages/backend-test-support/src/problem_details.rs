//! Assertions for `application/problem+json` error responses, kept free of
//! backend types so any test crate can use them.

use actix_web::http::header::HeaderMap;
use actix_web::http::StatusCode;
use serde::Deserialize;

/// Mirror of the backend's Problem Details body.
#[derive(Debug, Clone, Deserialize)]
pub struct ProblemDetailsLike {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
    pub trace_id: String,
}

/// Parse a Problem Details body, panicking with the raw text on failure.
pub fn parse_problem(body: &[u8]) -> ProblemDetailsLike {
    serde_json::from_slice(body).unwrap_or_else(|e| {
        panic!(
            "body is not Problem Details ({e}): {}",
            String::from_utf8_lossy(body)
        )
    })
}

/// Assert the error contract on raw response parts:
/// status, code, content type, `x-trace-id` parity with the body, and
/// optionally a substring of `detail`. Returns the parsed body.
pub fn assert_problem_details_from_parts(
    status: StatusCode,
    headers: &HeaderMap,
    body: &[u8],
    expected_code: &str,
    expected_status: StatusCode,
    expected_detail_contains: Option<&str>,
) -> ProblemDetailsLike {
    assert_eq!(status, expected_status, "unexpected HTTP status");

    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(
        content_type.starts_with("application/problem+json"),
        "unexpected content type {content_type:?}"
    );

    let problem = parse_problem(body);
    assert_eq!(problem.code, expected_code);
    assert_eq!(problem.status, expected_status.as_u16());
    assert!(
        problem.type_.ends_with(expected_code),
        "type {:?} should end with the code",
        problem.type_
    );

    let header_trace = headers
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_else(|| panic!("x-trace-id header missing"));
    assert_eq!(header_trace, problem.trace_id, "trace id mismatch");

    if let Some(fragment) = expected_detail_contains {
        assert!(
            problem.detail.contains(fragment),
            "detail {:?} should contain {fragment:?}",
            problem.detail
        );
    }
    problem
}
