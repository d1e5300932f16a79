//! Completed-upload message and its builder.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Summary of one finished upload, returned to the caller and forwarded to the
/// data acquisition service. The field names are part of the downstream
/// contract and must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UploadCompleted {
    /// Name of the uploaded file, absent when the request carried no file part
    pub source: Option<String>,
    /// Metadata form fields keyed by field name
    pub properties: HashMap<String, String>,
}

impl UploadCompleted {
    pub fn builder() -> UploadCompletedBuilder {
        UploadCompletedBuilder::default()
    }
}

/// Accumulates the source filename and metadata properties observed during a
/// single pass over the multipart body, then freezes them with [`build`].
///
/// [`build`]: UploadCompletedBuilder::build
#[derive(Debug, Default)]
pub struct UploadCompletedBuilder {
    source: Option<String>,
    properties: HashMap<String, String>,
}

impl UploadCompletedBuilder {
    pub fn source(mut self, name: impl Into<String>) -> Self {
        self.source = Some(name.into());
        self
    }

    /// Record a metadata property. A repeated key overwrites the earlier value
    /// (last write wins).
    pub fn property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> UploadCompleted {
        UploadCompleted {
            source: self.source,
            properties: self.properties,
        }
    }
}
