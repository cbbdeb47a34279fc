//! Edge invocation envelope.

use serde::{Deserialize, Serialize};

use crate::edge::request::RequestDescriptor;

/// The triggering event: a list of records, each wrapping one request.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EdgeEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<EdgeRecord>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EdgeRecord {
    pub cf: EdgeRecordPayload,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EdgeRecordPayload {
    pub request: RequestDescriptor,
}

impl EdgeEvent {
    /// Wrap a single request.
    pub fn from_request(request: RequestDescriptor) -> Self {
        Self {
            records: vec![EdgeRecord {
                cf: EdgeRecordPayload { request },
            }],
        }
    }

    /// The request of the first record.
    pub fn request(&self) -> Option<&RequestDescriptor> {
        self.records.first().map(|record| &record.cf.request)
    }
}
