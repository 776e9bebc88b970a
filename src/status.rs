//! Human-readable descriptions for the HTTP status codes the OSU APIs
//! are known to return.

/// Returns a description for `code`, or `None` for codes not in the catalog.
pub fn describe(code: u16) -> Option<&'static str> {
    match code {
        200 => Some("OK - The request has succeeded."),
        400 => Some(
            "Bad Request - The server could not understand the request due to \
             invalid syntax or missing parameters.",
        ),
        401 => Some(
            "Unauthorized - The request requires user authentication or \
             authentication failed.",
        ),
        403 => Some("Forbidden - The server understood the request but refuses to authorize it."),
        404 => Some("Not Found - The requested resource could not be found."),
        500 => Some(
            "Internal Server Error - The server encountered an unexpected condition \
             that prevented it from fulfilling the request.",
        ),
        502 => Some("Bad Gateway - The server received an invalid response from an upstream server."),
        503 => Some(
            "Service Unavailable - The server is currently unable to handle the \
             request due to a temporary overload or maintenance.",
        ),
        504 => Some(
            "Gateway Timeout - The server did not receive a timely response from an \
             upstream server.",
        ),
        505 => Some(
            "HTTP Version Not Supported - The server does not support the HTTP \
             protocol version used in the request.",
        ),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes_have_descriptions() {
        assert!(describe(200).unwrap().starts_with("OK"));
        assert!(describe(404).unwrap().starts_with("Not Found"));
        assert!(describe(503).unwrap().starts_with("Service Unavailable"));
    }

    #[test]
    fn test_unrecognized_code_is_none() {
        assert_eq!(describe(418), None);
        assert_eq!(describe(302), None);
    }
}
