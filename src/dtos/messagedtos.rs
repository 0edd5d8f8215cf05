use serde::{Deserialize, Serialize};

use crate::models::messagemodel::{Attachment, MessageWithSender};

/// A file already written to the upload directory, waiting to be attached to
/// a message row.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub file_path: String,
    pub file_type: String,
    pub file_size: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageWithAttachments {
    #[serde(flatten)]
    pub message: MessageWithSender,
    pub attachments: Vec<Attachment>,
}
