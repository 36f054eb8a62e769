//! Form body extractor shared by the signup, login and job posting handlers
//!
//! Accepts url-encoded and multipart forms. A request that carries no form
//! content type yields an empty form, so the services report exactly which
//! required fields are missing.

use crate::error::ApiError;
use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Form,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Form-encoded request body, rejected as [`ApiError`]
pub struct FormBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for FormBody<T>
where
    T: DeserializeOwned + Default + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state).await?;
            return multipart_fields(multipart).await.map(FormBody);
        }

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(value) = Form::<T>::from_request(req, state).await?;
            return Ok(FormBody(value));
        }

        Ok(FormBody(T::default()))
    }
}

/// Collect the text fields of a multipart form; the first value of a name wins
async fn multipart_fields<T: DeserializeOwned>(mut multipart: Multipart) -> Result<T, ApiError> {
    let mut fields = Map::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        let text = field.text().await?;
        if !name.is_empty() {
            fields.entry(name).or_insert(Value::String(text));
        }
    }

    serde_json::from_value(Value::Object(fields))
        .map_err(|e| ApiError::Validation(format!("Invalid form body: {}", e)))
}
