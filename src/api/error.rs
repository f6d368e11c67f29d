use serde_json::Value;

pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Every failure a request can end in. `Clone` so results can ride in UI messages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Your session has expired. Please sign in again.")]
    Unauthorized,
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },
    #[error("Could not reach the server: {0}")]
    Transport(String),
    #[error("Unexpected response from the server: {0}")]
    Decode(String),
    #[error("You are not signed in.")]
    NotSignedIn,
}

impl ApiError {
    /// Map a non-success status and its body onto the taxonomy.
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = extract_detail(body);
        match status {
            401 => Self::Unauthorized,
            403 => Self::Forbidden(detail.unwrap_or_else(|| "You are not allowed to do that.".into())),
            404 => Self::NotFound(detail.unwrap_or_else(|| "Not found.".into())),
            500..=599 => Self::Server {
                status,
                message: detail.unwrap_or_else(|| GENERIC_FAILURE.into()),
            },
            _ => Self::Validation(detail.unwrap_or_else(|| GENERIC_FAILURE.into())),
        }
    }

    /// Clears the session and sends the user to the login page.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Unauthorized | Self::NotSignedIn)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}

/// Pull a human message out of an error body. Understands
/// `{"detail": "..."}`, `{"detail": [{"msg": ...}, ...]}`,
/// `{"error": {"message": ...}}` and `{"message": ...}`.
pub fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;

    match value.get("detail") {
        Some(Value::String(s)) if !s.trim().is_empty() => return Some(s.clone()),
        Some(Value::Array(items)) => {
            let msgs: Vec<String> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .map(|m| m.strip_prefix("Value error, ").unwrap_or(m).to_string())
                .collect();
            if !msgs.is_empty() {
                return Some(msgs.join("; "));
            }
        }
        _ => {}
    }

    if let Some(msg) = value
        .get("error")
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
    {
        return Some(msg.to_string());
    }

    value
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
}
