//! Request validation and sanitization.
//!
//! Checks run in a fixed order and stop at the first failure: body shape,
//! the `names` array, each name, then `teamName`. Every rejection names the
//! constraint that failed so the caller can fix the payload.

use crate::models::ValidatedInput;
use anyhow::anyhow;
use serde_json::Value;
use service_core::error::AppError;

pub const MAX_NAMES: usize = 25;
pub const MAX_NAME_LEN: usize = 40;
pub const MAX_TEAM_NAME_LEN: usize = 60;

/// Validate and sanitize a decoded request body.
pub fn validate(raw: &Value) -> Result<ValidatedInput, AppError> {
    let body = raw
        .as_object()
        .ok_or_else(|| bad_request("Request body must be a JSON object".to_string()))?;

    let names_array = body
        .get("names")
        .and_then(Value::as_array)
        .ok_or_else(|| bad_request("Field 'names' is required and must be an array".to_string()))?;

    if names_array.is_empty() {
        return Err(bad_request(
            "Field 'names' must contain at least 1 name".to_string(),
        ));
    }
    if names_array.len() > MAX_NAMES {
        return Err(bad_request(format!(
            "Field 'names' must contain at most {} names",
            MAX_NAMES
        )));
    }

    let mut names = Vec::with_capacity(names_array.len());
    for (index, value) in names_array.iter().enumerate() {
        let name = value
            .as_str()
            .ok_or_else(|| bad_request(format!("names[{}] must be a string", index)))?;
        let name = sanitize(name);
        if name.is_empty() {
            return Err(bad_request(format!(
                "names[{}] is empty after removing control characters and whitespace",
                index
            )));
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(bad_request(format!(
                "names[{}] must be at most {} characters",
                index, MAX_NAME_LEN
            )));
        }
        names.push(name);
    }

    // JSON null is treated like an omitted field, not a type error.
    let team_name = match body.get("teamName") {
        None | Some(Value::Null) => None,
        Some(value) => {
            let team = value
                .as_str()
                .ok_or_else(|| bad_request("Field 'teamName' must be a string".to_string()))?;
            let team = sanitize(team);
            if team.chars().count() > MAX_TEAM_NAME_LEN {
                return Err(bad_request(format!(
                    "Field 'teamName' must be at most {} characters",
                    MAX_TEAM_NAME_LEN
                )));
            }
            // Empty after sanitization means absent, not an error.
            if team.is_empty() { None } else { Some(team) }
        }
    };

    Ok(ValidatedInput { team_name, names })
}

/// Replace C0 control characters and DEL with spaces, then collapse
/// whitespace runs and trim.
fn sanitize(raw: &str) -> String {
    let replaced: String = raw
        .chars()
        .map(|c| match c {
            '\u{0000}'..='\u{001F}' | '\u{007F}' => ' ',
            _ => c,
        })
        .collect();

    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn bad_request(message: String) -> AppError {
    AppError::BadRequest(anyhow!(message))
}
