//! JSON extractor that validates the payload after deserializing it.

use axum::extract::{FromRequest, Request};
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use super::Json;
use crate::handler::{Error, ErrorKind};

/// [`Json`] followed by a [`Validate`] pass.
///
/// Deserialization failures and validation failures both answer 400; the
/// validation message names each offending field so a client can correct
/// the payload without guessing.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct ValidateJson<T>(pub T);

impl<T> ValidateJson<T> {
    /// Wraps an already-validated value.
    #[inline]
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    /// Unwraps the inner value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = <Json<T> as FromRequest<S>>::from_request(req, state).await?;
        payload.validate()?;
        Ok(Self(payload))
    }
}

/// Describes one failed check on one field.
fn describe(field: &str, error: &validator::ValidationError) -> String {
    if let Some(custom) = &error.message {
        return format!("Field '{field}': {custom}");
    }

    let what = match error.code.as_ref() {
        "email" => "must be a valid email address",
        "url" => "must be a valid URL",
        "length" => "has an invalid length",
        "required" => "is required",
        other => return format!("Field '{field}' failed the '{other}' check"),
    };

    format!("Field '{field}' {what}")
}

impl From<ValidationErrors> for Error<'static> {
    fn from(errors: ValidationErrors) -> Self {
        let mut problems: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, field_errors)| {
                field_errors.iter().map(move |error| describe(field, error))
            })
            .collect();
        problems.sort();

        tracing::warn!(
            errors = ?errors.field_errors(),
            "request payload failed validation"
        );

        let message = if problems.is_empty() {
            "Validation failed".to_owned()
        } else {
            problems.join(". ")
        };

        ErrorKind::BadRequest
            .with_message(message)
            .with_resource("request")
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, Validate)]
    struct Probe {
        #[validate(email)]
        email: String,
        #[validate(length(min = 1))]
        name: String,
    }

    #[test]
    fn every_invalid_field_is_named() {
        let probe = Probe {
            email: "nope".to_owned(),
            name: String::new(),
        };

        let error: Error<'static> = probe.validate().unwrap_err().into();
        let message = error.message().unwrap();
        assert!(message.contains("'email'"));
        assert!(message.contains("'name'"));
        assert_eq!(error.kind(), ErrorKind::BadRequest);
    }
}
