//! Multipart form parsing for listing uploads
//!
//! Text fields are collected by name; files under one field name become
//! [`UploadedFile`]s after size, format and count checks.

use std::collections::HashMap;
use std::str::FromStr;

use axum::extract::Multipart;
use serde::de::DeserializeOwned;
use shared::error::{AppError, AppResult, ErrorCode};

use crate::services::{ObjectStore, UploadedFile};

/// Maximum size of one image (10MB)
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];

#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    pub files: Vec<UploadedFile>,
}

impl MultipartForm {
    /// Drain `multipart`, keeping at most `max_files` files from `file_field`
    pub async fn read(mut multipart: Multipart, file_field: &str, max_files: usize) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(|e| {
            AppError::with_message(ErrorCode::InvalidRequest, format!("Multipart error: {e}"))
        })? {
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field.file_name().map(|s| s.to_string());
            let content_type = field.content_type().map(|s| s.to_string());

            let data = field.bytes().await.map_err(|e| {
                AppError::with_message(ErrorCode::InvalidRequest, format!("Read error: {e}"))
            })?;

            match file_name {
                Some(file_name) if name == file_field => {
                    // Browsers send an empty part when no file was picked
                    if data.is_empty() && file_name.is_empty() {
                        continue;
                    }
                    if form.files.len() >= max_files {
                        return Err(AppError::with_message(
                            ErrorCode::TooManyImages,
                            format!("At most {max_files} image(s) allowed"),
                        )
                        .with_detail("field", file_field));
                    }
                    form.files.push(validate_image(file_name, content_type, data.to_vec())?);
                }
                Some(_) => {
                    return Err(AppError::invalid_request(format!(
                        "Unexpected file field: {name}"
                    )));
                }
                None => {
                    let text = String::from_utf8(data.to_vec()).map_err(|_| {
                        AppError::with_message(
                            ErrorCode::InvalidFormat,
                            format!("{name} is not valid UTF-8"),
                        )
                    })?;
                    form.fields.insert(name, text);
                }
            }
        }

        Ok(form)
    }

    /// Trimmed, non-empty text field
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn require(&self, name: &str) -> AppResult<&str> {
        self.text(name).ok_or_else(|| AppError::required_field(name))
    }

    /// Field parsed with `FromStr` (numbers, booleans)
    pub fn parse<T: FromStr>(&self, name: &str) -> AppResult<Option<T>> {
        self.text(name)
            .map(|raw| {
                raw.parse::<T>().map_err(|_| {
                    AppError::with_message(ErrorCode::InvalidFormat, format!("{name} is not valid"))
                        .with_detail("field", name)
                })
            })
            .transpose()
    }

    /// Field parsed as a serde enum variant name (`"Double"`, `"main"`)
    pub fn variant<T: DeserializeOwned>(&self, name: &str) -> AppResult<Option<T>> {
        self.text(name)
            .map(|raw| {
                serde_json::from_value(serde_json::Value::String(raw.to_string())).map_err(|_| {
                    AppError::with_message(
                        ErrorCode::InvalidFormat,
                        format!("{name} has an unknown value: {raw}"),
                    )
                    .with_detail("field", name)
                })
            })
            .transpose()
    }

    /// JSON array (`["wifi","solar"]`) or comma list (`wifi, solar`)
    pub fn list(&self, name: &str) -> AppResult<Vec<String>> {
        let Some(raw) = self.text(name) else {
            return Ok(Vec::new());
        };
        if raw.starts_with('[') {
            return serde_json::from_str::<Vec<String>>(raw).map_err(|_| {
                AppError::with_message(ErrorCode::InvalidFormat, format!("{name} is not a valid list"))
                    .with_detail("field", name)
            });
        }
        Ok(raw.split(',').map(|s| s.trim().to_string()).collect())
    }
}

fn validate_image(
    file_name: String,
    content_type: Option<String>,
    bytes: Vec<u8>,
) -> AppResult<UploadedFile> {
    if bytes.is_empty() {
        return Err(AppError::invalid_request(format!("Empty file: {file_name}")));
    }
    if bytes.len() > MAX_FILE_SIZE {
        return Err(AppError::invalid_request(format!(
            "File too large: {} bytes (max {MAX_FILE_SIZE})",
            bytes.len()
        )));
    }

    let file = UploadedFile {
        file_name,
        content_type,
        bytes,
    };
    let ext = file.extension().unwrap_or_default();
    if !SUPPORTED_FORMATS.contains(&ext.as_str()) {
        return Err(AppError::invalid_request(format!(
            "Unsupported format: {ext}. Supported: png, jpg, jpeg, webp"
        )));
    }
    Ok(file)
}

/// Store every file under `folder`; the first failure aborts the batch
pub async fn store_all(
    storage: &dyn ObjectStore,
    folder: &str,
    files: &[UploadedFile],
) -> AppResult<Vec<String>> {
    let mut urls = Vec::with_capacity(files.len());
    for file in files {
        let url = storage.put(folder, file).await.map_err(|e| {
            tracing::error!(folder, file = %file.file_name, error = %e, "Image upload failed");
            AppError::storage(format!("Image upload failed: {e}"))
        })?;
        urls.push(url);
    }
    Ok(urls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::RoomType;

    fn form(fields: &[(&str, &str)]) -> MultipartForm {
        MultipartForm {
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            files: Vec::new(),
        }
    }

    #[test]
    fn text_fields() {
        let f = form(&[("name", "  Fynbos Suite "), ("blank", "   ")]);
        assert_eq!(f.text("name"), Some("Fynbos Suite"));
        assert_eq!(f.text("blank"), None);
        assert_eq!(f.require("blank").unwrap_err().code, ErrorCode::RequiredField);
    }

    #[test]
    fn typed_fields() {
        let f = form(&[("price", "950.5"), ("type", "Luxury"), ("bad", "abc")]);
        assert_eq!(f.parse::<f64>("price").unwrap(), Some(950.5));
        assert_eq!(f.parse::<f64>("missing").unwrap(), None);
        assert_eq!(f.parse::<f64>("bad").unwrap_err().code, ErrorCode::InvalidFormat);
        assert_eq!(f.variant::<RoomType>("type").unwrap(), Some(RoomType::Luxury));
        assert!(f.variant::<RoomType>("bad").is_err());
    }

    #[test]
    fn list_fields() {
        let f = form(&[("json", r#"["wifi","solar"]"#), ("csv", "wifi, solar"), ("broken", "[wifi")]);
        assert_eq!(f.list("json").unwrap(), vec!["wifi", "solar"]);
        assert_eq!(f.list("csv").unwrap(), vec!["wifi", "solar"]);
        assert!(f.list("missing").unwrap().is_empty());
        assert!(f.list("broken").is_err());
    }

    #[test]
    fn image_checks() {
        assert!(validate_image("a.JPG".into(), None, vec![1]).is_ok());
        assert!(validate_image("a.gif".into(), None, vec![1]).is_err());
        assert!(validate_image("a.png".into(), None, vec![]).is_err());
        assert!(validate_image("a.png".into(), None, vec![0; MAX_FILE_SIZE + 1]).is_err());
    }
}
