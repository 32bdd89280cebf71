//! Request bodies that may arrive as JSON or as `multipart/form-data`.
//!
//! Multipart text parts become the structured fields; parts that carry a
//! file name are kept aside as uploads, keyed by part name.

use std::collections::HashMap;

use axum::extract::multipart::{Field, MultipartError};
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use validator::Validate;

use super::ApiError;
use crate::domain::{FieldErrors, UploadedFile};

pub struct FormPayload<T> {
    pub data: T,
    files: HashMap<String, UploadedFile>,
}

impl<T> FormPayload<T> {
    /// Remove and return the upload sent under `field`.
    pub fn take_file(&mut self, field: &str) -> Option<UploadedFile> {
        self.files.remove(field)
    }
}

fn is_multipart(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("multipart/form-data"))
        .unwrap_or(false)
}

fn multipart_error(e: MultipartError) -> ApiError {
    ApiError::bad_request(format!("Invalid multipart body: {}", e.body_text()))
}

async fn read_file(field: Field<'_>, file_name: String) -> Result<Option<UploadedFile>, ApiError> {
    let content_type = field.content_type().map(str::to_string);
    let bytes = field.bytes().await.map_err(multipart_error)?;

    // Browsers send an empty part with an empty name for an untouched file input.
    if bytes.is_empty() && file_name.is_empty() {
        return Ok(None);
    }

    Ok(Some(UploadedFile {
        file_name: Some(file_name),
        content_type,
        bytes: bytes.to_vec(),
    }))
}

impl<S, T> FromRequest<S> for FormPayload<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (data, files) = if is_multipart(&req) {
            let mut multipart = Multipart::from_request(req, state)
                .await
                .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

            let mut fields = Map::new();
            let mut files = HashMap::new();

            while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
                let Some(name) = field.name().map(str::to_string) else {
                    continue;
                };
                match field.file_name().map(str::to_string) {
                    Some(file_name) => {
                        if let Some(file) = read_file(field, file_name).await? {
                            files.insert(name, file);
                        }
                    }
                    None => {
                        let text = field.text().await.map_err(multipart_error)?;
                        fields.insert(name, Value::String(text));
                    }
                }
            }

            let data = serde_json::from_value::<T>(Value::Object(fields))
                .map_err(|e| ApiError::bad_request(format!("Invalid form data: {}", e)))?;
            (data, files)
        } else {
            let Json(data) = Json::<T>::from_request(req, state)
                .await
                .map_err(|rejection| ApiError::bad_request(format!("Invalid JSON: {}", rejection.body_text())))?;
            (data, HashMap::new())
        };

        data.validate()
            .map_err(|errors| ApiError::Validation(FieldErrors::from(errors)))?;

        Ok(FormPayload { data, files })
    }
}
