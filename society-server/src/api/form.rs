//! Multipart form reading shared by the receipt and expense upload handlers

use std::collections::HashMap;

use axum::extract::Multipart;

use crate::utils::validation::non_empty;
use crate::utils::{AppError, AppResult, ErrorCode, multipart_error};

/// Name of the file field on upload forms
pub const FILE_FIELD: &str = "upload";

#[derive(Debug)]
pub struct UploadedFile {
    pub file_name: String,
    pub data: Vec<u8>,
}

/// Text fields plus the (optional) uploaded file of one multipart request
#[derive(Debug, Default)]
pub struct UploadForm {
    fields: HashMap<String, String>,
    file: Option<UploadedFile>,
}

impl UploadForm {
    /// Drain a multipart body. Unknown fields are kept and ignored.
    pub async fn read(multipart: &mut Multipart) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if name == FILE_FIELD {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let data = field.bytes().await.map_err(multipart_error)?.to_vec();
                form.file = Some(UploadedFile { file_name, data });
            } else {
                let value = field.text().await.map_err(multipart_error)?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    /// Trimmed text field; blank counts as absent.
    pub fn text(&self, name: &str) -> Option<String> {
        non_empty(self.fields.get(name).cloned())
    }

    /// Required text field
    pub fn required(&self, name: &str) -> AppResult<String> {
        self.text(name).ok_or_else(|| AppError::required_field(name))
    }

    /// The uploaded file, required on every upload form
    pub fn take_file(&mut self) -> AppResult<UploadedFile> {
        self.file
            .take()
            .ok_or_else(|| AppError::new(ErrorCode::NoFileProvided))
    }
}
