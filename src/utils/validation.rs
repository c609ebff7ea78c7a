use crate::utils::error::{Result, UpdateError};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(UpdateError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// A single path component: non-empty, no separators, no null bytes, not `.`/`..`.
pub fn validate_path_component(field_name: &str, value: &str) -> Result<()> {
    validate_non_empty_string(field_name, value)?;

    let reason = if value.contains('\0') {
        Some("Path component contains null bytes")
    } else if value.contains('/') || value.contains('\\') {
        Some("Path component cannot contain path separators")
    } else if value == "." || value == ".." {
        Some("Path component cannot be a relative directory reference")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(UpdateError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

pub fn validate_unique_names<'a>(
    field_name: &str,
    names: impl IntoIterator<Item = &'a str>,
) -> Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name.to_lowercase()) {
            return Err(UpdateError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: name.to_string(),
                reason: "Duplicate entry (names are compared case-insensitively)".to_string(),
            });
        }
    }
    if seen.is_empty() {
        return Err(UpdateError::MissingConfigError {
            field: field_name.to_string(),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| UpdateError::MissingConfigError {
        field: field_name.to_string(),
    })
}
