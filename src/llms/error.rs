/// Typed error for completion requests.
///
/// The flow collapses every variant into one user-facing message; the
/// variants exist so logs can tell a dead network from a malformed reply.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    /// Network-level failure (DNS, connection, TLS, timeout) or a non-success status
    #[error("Transport error: {0}")]
    Transport(String),
    /// The response body did not contain `choices[0].text`
    #[error("Response shape error: {0}")]
    ResponseShape(String),
}

impl CompletionError {
    pub fn status(status: u16, body: &str) -> Self {
        CompletionError::Transport(format!("HTTP {}: {}", status, body.trim()))
    }
}

impl From<reqwest::Error> for CompletionError {
    fn from(e: reqwest::Error) -> Self {
        CompletionError::Transport(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_transport() {
        let e = CompletionError::Transport("connection refused".into());
        assert_eq!(e.to_string(), "Transport error: connection refused");
    }

    #[test]
    fn display_status() {
        let e = CompletionError::status(401, " {\"error\":\"bad key\"}\n");
        assert_eq!(e.to_string(), "Transport error: HTTP 401: {\"error\":\"bad key\"}");
    }

    #[test]
    fn display_response_shape() {
        let e = CompletionError::ResponseShape("missing choices".into());
        assert_eq!(e.to_string(), "Response shape error: missing choices");
    }
}
