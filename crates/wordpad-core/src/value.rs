use serde::{Deserialize, Serialize};

use crate::document::{Document, DocumentSurface};
use crate::error::ValueError;

pub const DOCUMENT_SCHEMA: &str = "wordpad";
pub const DOCUMENT_VERSION: u32 = 1;

fn schema_name() -> String {
    DOCUMENT_SCHEMA.to_string()
}

fn current_version() -> u32 {
    DOCUMENT_VERSION
}

/// Versioned JSON envelope for a [`Document`], the editor's native save format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentValue {
    #[serde(default = "schema_name")]
    pub schema: String,
    #[serde(default = "current_version")]
    pub version: u32,
    pub document: Document,
}

impl DocumentValue {
    pub fn new(document: Document) -> Self {
        Self {
            schema: schema_name(),
            version: current_version(),
            document,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, ValueError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses and checks the envelope; newer versions and foreign schemas are rejected.
    pub fn parse(json: &str) -> Result<Self, ValueError> {
        let value: Self = serde_json::from_str(json)?;
        if value.schema != DOCUMENT_SCHEMA {
            return Err(ValueError::UnsupportedSchema(value.schema));
        }
        if value.version > DOCUMENT_VERSION {
            return Err(ValueError::UnsupportedVersion(value.version));
        }
        Ok(value)
    }
}

impl DocumentSurface {
    pub fn to_value(&self) -> DocumentValue {
        DocumentValue::new(self.doc().clone())
    }

    pub fn from_value(value: DocumentValue) -> Self {
        Self::new(value.document)
    }
}
