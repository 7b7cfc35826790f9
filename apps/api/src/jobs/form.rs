//! Form session — the editable job form: JD paste box, nine fields, status line.
//!
//! Extraction merges into the record without clobbering fields it found nothing for.
//! Submitting validates the company first, appends once, resets on success and
//! keeps everything on failure so the user can retry by hand.

use serde::Serialize;
use tracing::debug;

use crate::errors::AppError;
use crate::extraction::jd_parser::extract_fields;
use crate::models::job::{ExtractedFields, JobRecord};
use crate::sheets::RowAppender;

pub const MSG_PASTE_JD_FIRST: &str = "Paste a job description first.";
pub const MSG_AUTO_FILLED: &str = "Auto-filled fields from JD. Please review and edit if needed.";
pub const MSG_COMPANY_REQUIRED: &str = "Company is required.";
pub const MSG_SAVED: &str = "Saved to sheet 🎉";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Ok,
    Error,
}

/// The one-line message shown under the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormStatus {
    pub kind: StatusKind,
    pub message: String,
}

impl FormStatus {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Ok,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FormSession {
    pub record: JobRecord,
    pub jd_text: String,
    pub status: Option<FormStatus>,
}

impl FormSession {
    pub fn new(record: JobRecord, jd_text: impl Into<String>) -> Self {
        Self {
            record,
            jd_text: jd_text.into(),
            status: None,
        }
    }

    /// Runs the extractor over the pasted JD and merges what it found.
    /// Blank JD text leaves the record untouched.
    pub fn extract_from_jd(&mut self) -> Result<ExtractedFields, AppError> {
        if self.jd_text.trim().is_empty() {
            self.status = Some(FormStatus::error(MSG_PASTE_JD_FIRST));
            return Err(AppError::Validation(MSG_PASTE_JD_FIRST.to_string()));
        }

        let fields = extract_fields(&self.jd_text);
        if fields.is_empty() {
            debug!("No fields recognised in JD ({} chars)", self.jd_text.len());
        } else {
            debug!("Extracted {} field(s) from JD", fields.found_count());
        }

        self.record.merge(&fields);
        self.status = Some(FormStatus::ok(MSG_AUTO_FILLED));
        Ok(fields)
    }

    /// Appends the record as one sheet row.
    pub async fn submit(&mut self, appender: &dyn RowAppender) -> Result<(), AppError> {
        self.status = None;

        if self.record.company.trim().is_empty() {
            self.status = Some(FormStatus::error(MSG_COMPANY_REQUIRED));
            return Err(AppError::Validation(MSG_COMPANY_REQUIRED.to_string()));
        }

        match appender.append_row(&self.record).await {
            Ok(()) => {
                self.status = Some(FormStatus::ok(MSG_SAVED));
                self.record.reset();
                self.jd_text.clear();
                Ok(())
            }
            Err(e) => {
                let err = AppError::from(e);
                self.status = Some(FormStatus::error(err.user_message()));
                Err(err)
            }
        }
    }
}
