//! Posted quiz fields and field-level validation errors.

use std::collections::BTreeMap;
use std::str::FromStr;

use thiserror::Error;

use super::Step;

/// Raw `application/x-www-form-urlencoded` pairs, repeated keys preserved.
#[derive(Debug, Clone, Default)]
pub struct FormFields {
    pairs: Vec<(String, String)>,
}

impl FormFields {
    #[must_use]
    pub const fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// First non-blank value for `name`.
    #[must_use]
    pub fn first(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value.trim())
            .find(|value| !value.is_empty())
    }

    /// Every non-blank value for `name`, in posted order.
    pub fn all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(key, _)| key == name)
            .map(|(_, value)| value.trim())
            .filter(|value| !value.is_empty())
    }
}

impl From<Vec<(String, String)>> for FormFields {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self::new(pairs)
    }
}

/// Field name to message, sorted for stable rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

/// Why a quiz submission was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// The form was rendered for a step the visitor has since left.
    #[error("submitted step {posted} but the quiz is on step {}", current.index())]
    StaleStep { posted: u8, current: Step },

    /// One or more fields failed validation.
    #[error("invalid answers")]
    Invalid(FieldErrors),
}

pub(super) const INVALID_OPTION: &str = "Please choose one of the listed options";

/// Parse a required single-choice field.
pub(super) fn required<T: FromStr>(
    fields: &FormFields,
    errors: &mut FieldErrors,
    name: &'static str,
    message: &str,
) -> Option<T> {
    let Some(raw) = fields.first(name) else {
        errors.add(name, message);
        return None;
    };
    raw.parse()
        .map_err(|_| errors.add(name, INVALID_OPTION))
        .ok()
}

/// Parse an optional single-choice field.
pub(super) fn optional<T: FromStr>(
    fields: &FormFields,
    errors: &mut FieldErrors,
    name: &'static str,
) -> Option<T> {
    fields
        .first(name)?
        .parse()
        .map_err(|_| errors.add(name, INVALID_OPTION))
        .ok()
}

/// Parse a multi-choice field, dropping duplicates.
pub(super) fn multi<T: FromStr + PartialEq>(
    fields: &FormFields,
    errors: &mut FieldErrors,
    name: &'static str,
) -> Vec<T> {
    let mut values = Vec::new();
    for raw in fields.all(name) {
        match raw.parse::<T>() {
            Ok(value) if !values.contains(&value) => values.push(value),
            Ok(_) => {}
            Err(_) => errors.add(name, INVALID_OPTION),
        }
    }
    values
}

/// Parse a yes/no radio or checkbox.
pub(super) fn boolean(
    fields: &FormFields,
    errors: &mut FieldErrors,
    name: &'static str,
    message: &str,
) -> Option<bool> {
    match fields.first(name) {
        Some("true" | "yes" | "on") => Some(true),
        Some("false" | "no") => Some(false),
        Some(_) => {
            errors.add(name, INVALID_OPTION);
            None
        }
        None => {
            errors.add(name, message);
            None
        }
    }
}
