//! Routes a draft's attachments to local storage or to an immediate upload.

use crate::config::ForumOfflineConfig;
use crate::folders::{AttachmentFolderManager, FolderKey, StoredFiles};
use crate::model::AttachmentEntry;
use crate::services::{ServiceError, Uploader};
use crate::store::StoreError;

use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("Failed to store files offline: {0}")]
    Store(#[from] StoreError),

    #[error("Failed to upload files: {0}")]
    Upload(#[from] ServiceError),
}

pub type Result<T> = std::result::Result<T, RouteError>;

/// Where a set of attachments ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSubmission {
    /// Kept in the draft's attachment folder until connectivity returns
    Stored(StoredFiles),
    /// Uploaded to the server's draft area with this item id
    Uploaded { draft_item_id: u64 },
}

pub struct SubmissionRouter {
    folders: Arc<AttachmentFolderManager>,
    uploader: Arc<dyn Uploader>,
    component: String,
}

impl SubmissionRouter {
    pub fn new(
        folders: Arc<AttachmentFolderManager>,
        uploader: Arc<dyn Uploader>,
        config: &ForumOfflineConfig,
    ) -> Self {
        Self {
            folders,
            uploader,
            component: config.component.clone(),
        }
    }

    pub async fn resolve_new_discussion_files(
        &self,
        forum_id: u64,
        created_at: i64,
        files: &[AttachmentEntry],
        offline: bool,
        site_id: &str,
    ) -> Result<FileSubmission> {
        let key = self
            .folders
            .folder_for_new_discussion(forum_id, created_at, site_id);
        self.resolve(key, files, offline).await
    }

    pub async fn resolve_reply_files(
        &self,
        forum_id: u64,
        post_id: u64,
        files: &[AttachmentEntry],
        offline: bool,
        site_id: &str,
        user_id: Option<u64>,
    ) -> Result<FileSubmission> {
        let key = self
            .folders
            .folder_for_reply(forum_id, post_id, site_id, user_id);
        self.resolve(key, files, offline).await
    }

    async fn resolve(
        &self,
        key: FolderKey,
        files: &[AttachmentEntry],
        offline: bool,
    ) -> Result<FileSubmission> {
        if offline {
            debug!("Storing {} attachment(s) offline for {}", files.len(), key);
            let stored = self.folders.store(&key, files).await?;
            return Ok(FileSubmission::Stored(stored));
        }

        debug!("Uploading {} attachment(s) for {}", files.len(), key);
        let draft_item_id = self
            .uploader
            .upload_or_reupload_files(files, &self.component, key.forum_id(), key.site_id())
            .await?;
        Ok(FileSubmission::Uploaded { draft_item_id })
    }
}
