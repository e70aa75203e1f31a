use serde::Serialize;

/// Sanitized request payload, produced once per request by the validator and
/// consumed as-is by the prompt builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedInput {
    /// Team name after sanitization; `None` when omitted or empty.
    pub team_name: Option<String>,
    /// Sanitized names in request order. Always 1..=25 entries.
    pub names: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct StoryResponse {
    pub story: String,
}
