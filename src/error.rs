use thiserror::Error;

/// Reasons a URL never reaches the rule table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("URL not provided")]
    MissingInput,

    /// The caller's payload could not be decoded into a request.
    /// `reason` is kept for logs only and never shown to the client.
    #[error("Invalid request format")]
    MalformedRequestEnvelope { reason: String },
}

impl ValidationError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedRequestEnvelope {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_client_facing() {
        assert_eq!(ValidationError::MissingInput.to_string(), "URL not provided");
        assert_eq!(
            ValidationError::malformed("expected value at line 1 column 1").to_string(),
            "Invalid request format"
        );
    }
}
