use crate::common::error::AppError;
use axum::{
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Json,
};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::str::FromStr;

/// Text fields of a multipart form. File parts are never collected.
#[derive(Debug, Default)]
pub struct FormFields {
    fields: HashMap<String, Vec<String>>,
}

impl FormFields {
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.entry(name.into()).or_default().push(value.into());
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    pub fn required_text(&self, name: &str) -> Result<String, AppError> {
        self.text(name)
            .map(str::to_string)
            .ok_or_else(|| AppError::validation(format!("{}: This field is required.", name)))
    }

    pub fn parsed<T: FromStr>(&self, name: &str) -> Result<Option<T>, AppError> {
        self.text(name)
            .map(|raw| {
                raw.trim()
                    .parse::<T>()
                    .map_err(|_| AppError::validation(format!("{}: invalid value {:?}", name, raw)))
            })
            .transpose()
    }

    /// Every value of a repeated field, in submission order.
    pub fn list<T: FromStr>(&self, name: &str) -> Result<Option<Vec<T>>, AppError> {
        let Some(values) = self.fields.get(name) else {
            return Ok(None);
        };

        values
            .iter()
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| {
                raw.trim()
                    .parse::<T>()
                    .map_err(|_| AppError::validation(format!("{}: invalid value {:?}", name, raw)))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }
}

pub trait FromFormFields: Sized {
    fn from_form_fields(fields: FormFields) -> Result<Self, AppError>;
}

/// Accepts either an `application/json` body or a `multipart/form-data` body.
pub struct JsonOrMultipart<T>(pub T);

impl<T, S> FromRequest<S> for JsonOrMultipart<T>
where
    T: DeserializeOwned + FromFormFields + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<mime::Mime>().ok())
            .is_some_and(|ct| ct.type_() == mime::MULTIPART && ct.subtype() == mime::FORM_DATA);

        if !is_multipart {
            let Json(payload) = Json::<T>::from_request(req, state).await?;
            return Ok(Self(payload));
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|rejection| AppError::validation(rejection.body_text()))?;

        let mut fields = FormFields::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::validation(e.body_text()))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            if field.file_name().is_some() {
                continue;
            }

            let value = field
                .text()
                .await
                .map_err(|e| AppError::validation(e.body_text()))?;
            fields.insert(name, value);
        }

        T::from_form_fields(fields).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_collects_repeated_fields_and_skips_blanks() {
        let mut fields = FormFields::default();
        fields.insert("ids", "1");
        fields.insert("ids", " ");
        fields.insert("ids", "3");

        assert_eq!(fields.list::<u32>("ids").unwrap(), Some(vec![1, 3]));
        assert_eq!(fields.list::<u32>("missing").unwrap(), None);
    }

    #[test]
    fn parsed_reports_field_name_on_error() {
        let mut fields = FormFields::default();
        fields.insert("duration", "ninety");

        let err = fields.parsed::<i32>("duration").unwrap_err();
        assert!(err.to_string().starts_with("duration:"));
    }

    #[test]
    fn required_text_fails_when_absent() {
        let fields = FormFields::default();
        assert!(matches!(
            fields.required_text("title"),
            Err(AppError::Validation(_))
        ));
    }
}
