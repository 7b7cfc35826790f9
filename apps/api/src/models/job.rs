use serde::{Deserialize, Serialize};

/// One job application entry, as edited in the form and appended to the sheet.
///
/// All fields are free text. Missing JSON fields deserialize to `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JobRecord {
    pub source: String,
    pub company: String,
    pub role: String,
    pub yoe: String,
    pub pay: String,
    pub link: String,
    pub applied: String,
    pub applied_date: String,
    pub responded: String,
}

impl JobRecord {
    /// Copies every field present in `fields`, leaving the rest untouched.
    pub fn merge(&mut self, fields: &ExtractedFields) {
        let targets = [
            (&mut self.role, &fields.role),
            (&mut self.company, &fields.company),
            (&mut self.yoe, &fields.yoe),
            (&mut self.pay, &fields.pay),
            (&mut self.source, &fields.source),
            (&mut self.link, &fields.link),
        ];
        for (slot, value) in targets {
            if let Some(value) = value {
                slot.clone_from(value);
            }
        }
    }

    /// Cells for one sheet row. Column A is reserved and always blank.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            String::new(),
            self.source.clone(),
            self.company.clone(),
            self.role.clone(),
            self.yoe.clone(),
            self.pay.clone(),
            self.link.clone(),
            self.applied.clone(),
            self.applied_date.clone(),
            self.responded.clone(),
        ]
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Partial record produced by the JD extractor. `None` means "not found".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractedFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yoe: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pay: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl ExtractedFields {
    pub fn found_count(&self) -> usize {
        [
            &self.role,
            &self.company,
            &self.yoe,
            &self.pay,
            &self.source,
            &self.link,
        ]
        .iter()
        .filter(|f| f.is_some())
        .count()
    }

    pub fn is_empty(&self) -> bool {
        self.found_count() == 0
    }
}

/// Values offered by the form's "Applied?" picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppliedStatus {
    Yes,
    InProgress,
    No,
}

impl AppliedStatus {
    pub const ALL: [AppliedStatus; 3] = [Self::Yes, Self::InProgress, Self::No];

    /// What lands in the sheet cell.
    pub fn as_cell(self) -> &'static str {
        match self {
            Self::Yes => "✅",
            Self::InProgress => "⏳",
            Self::No => "❌",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::InProgress => "In progress",
            Self::No => "No",
        }
    }
}
