//! Attachment folders for offline drafts.
//!
//! Every draft keeps its queued files in one folder. The folder is identified
//! by a `FolderKey`, which is a pure function of the draft's identifying
//! fields: two drafts with equal keys share a folder and nothing else is
//! stored to tell them apart. A `FolderLayout` turns keys into store paths.

use crate::config::ForumOfflineConfig;
use crate::model::{AttachmentEntry, LocalFile, RemoteFileRef};
use crate::store::{FileStore, Result};

use std::fmt::{self, Display, Formatter};
use std::sync::Arc;
use tracing::debug;

/// Identifies the attachment folder of one draft.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FolderKey {
    /// A discussion started offline, identified by its creation time.
    NewDiscussion {
        forum_id: u64,
        created_at: i64,
        site_id: String,
    },
    /// A reply written offline to `post_id` by `user_id`.
    Reply {
        forum_id: u64,
        post_id: u64,
        site_id: String,
        user_id: u64,
    },
}

impl FolderKey {
    pub fn new_discussion(forum_id: u64, created_at: i64, site_id: &str) -> Self {
        FolderKey::NewDiscussion {
            forum_id,
            created_at,
            site_id: site_id.to_string(),
        }
    }

    pub fn reply(forum_id: u64, post_id: u64, site_id: &str, user_id: u64) -> Self {
        FolderKey::Reply {
            forum_id,
            post_id,
            site_id: site_id.to_string(),
            user_id,
        }
    }

    pub fn forum_id(&self) -> u64 {
        match self {
            FolderKey::NewDiscussion { forum_id, .. } | FolderKey::Reply { forum_id, .. } => {
                *forum_id
            }
        }
    }

    pub fn site_id(&self) -> &str {
        match self {
            FolderKey::NewDiscussion { site_id, .. } | FolderKey::Reply { site_id, .. } => site_id,
        }
    }
}

impl Display for FolderKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            FolderKey::NewDiscussion {
                forum_id,
                created_at,
                site_id,
            } => write!(f, "newdisc({}:{}@{})", forum_id, created_at, site_id),
            FolderKey::Reply {
                forum_id,
                post_id,
                site_id,
                user_id,
            } => write!(
                f,
                "reply({}:{}:{}@{})",
                forum_id, post_id, user_id, site_id
            ),
        }
    }
}

/// Maps folder keys to paths in the file store.
pub trait FolderLayout: Send + Sync {
    fn new_discussion_folder(&self, forum_id: u64, created_at: i64, site_id: &str) -> String;

    fn reply_folder(&self, forum_id: u64, post_id: u64, site_id: &str, user_id: u64) -> String;

    fn folder_path(&self, key: &FolderKey) -> String {
        match key {
            FolderKey::NewDiscussion {
                forum_id,
                created_at,
                site_id,
            } => self.new_discussion_folder(*forum_id, *created_at, site_id),
            FolderKey::Reply {
                forum_id,
                post_id,
                site_id,
                user_id,
            } => self.reply_folder(*forum_id, *post_id, site_id, *user_id),
        }
    }
}

/// Default layout: `{root}/{site}/{component}/{forum}/newdisc_{created}` and
/// `{root}/{site}/{component}/{forum}/reply_{post}_{user}`.
#[derive(Debug, Clone)]
pub struct ForumFolderLayout {
    root: String,
    component: String,
}

impl ForumFolderLayout {
    pub fn new(root: impl Into<String>, component: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            component: component.into(),
        }
    }

    pub fn from_config(config: &ForumOfflineConfig) -> Self {
        Self::new(config.folder_root.clone(), config.component.clone())
    }

    fn forum_folder(&self, forum_id: u64, site_id: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            self.root.trim_end_matches('/'),
            site_id,
            self.component,
            forum_id
        )
    }
}

impl Default for ForumFolderLayout {
    fn default() -> Self {
        Self::from_config(&ForumOfflineConfig::default())
    }
}

impl FolderLayout for ForumFolderLayout {
    fn new_discussion_folder(&self, forum_id: u64, created_at: i64, site_id: &str) -> String {
        format!(
            "{}/newdisc_{}",
            self.forum_folder(forum_id, site_id),
            created_at
        )
    }

    fn reply_folder(&self, forum_id: u64, post_id: u64, site_id: &str, user_id: u64) -> String {
        format!(
            "{}/reply_{}_{}",
            self.forum_folder(forum_id, site_id),
            post_id,
            user_id
        )
    }
}

/// Outcome of storing a draft's attachments locally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredFiles {
    /// Remote attachments, passed through untouched
    pub online: Vec<RemoteFileRef>,
    /// Number of local files persisted in the folder
    pub offline: usize,
}

/// Creates, lists and deletes draft attachment folders.
pub struct AttachmentFolderManager {
    store: Arc<dyn FileStore>,
    layout: Arc<dyn FolderLayout>,
    /// User of the current session, used when a reply key names no user
    acting_user_id: u64,
}

impl AttachmentFolderManager {
    pub fn new(
        store: impl FileStore + 'static,
        layout: impl FolderLayout + 'static,
        acting_user_id: u64,
    ) -> Self {
        Self {
            store: Arc::new(store),
            layout: Arc::new(layout),
            acting_user_id,
        }
    }

    pub fn acting_user_id(&self) -> u64 {
        self.acting_user_id
    }

    pub fn folder_for_new_discussion(
        &self,
        forum_id: u64,
        created_at: i64,
        site_id: &str,
    ) -> FolderKey {
        FolderKey::new_discussion(forum_id, created_at, site_id)
    }

    pub fn folder_for_reply(
        &self,
        forum_id: u64,
        post_id: u64,
        site_id: &str,
        user_id: Option<u64>,
    ) -> FolderKey {
        FolderKey::reply(
            forum_id,
            post_id,
            site_id,
            user_id.unwrap_or(self.acting_user_id),
        )
    }

    /// Path of a key's folder in the store.
    pub fn path(&self, key: &FolderKey) -> String {
        self.layout.folder_path(key)
    }

    /// List the local files queued in a key's folder.
    pub async fn list_stored_files(&self, key: &FolderKey) -> Result<Vec<LocalFile>> {
        let path = self.path(key);
        let files = self.store.list_stored_files(&path).await?;
        debug!("Listed {} stored files for {}", files.len(), key);
        Ok(files)
    }

    /// Persist the local members of `files` into a key's folder.
    ///
    /// Remote members are not stored; they come back in `StoredFiles::online`
    /// in their original order. A set without local members leaves no folder
    /// behind.
    pub async fn store(&self, key: &FolderKey, files: &[AttachmentEntry]) -> Result<StoredFiles> {
        let mut online = Vec::new();
        let mut local = Vec::new();
        for file in files {
            match file {
                AttachmentEntry::Remote(remote) => online.push(remote.clone()),
                AttachmentEntry::Local(handle) => local.push(handle.clone()),
            }
        }

        if local.is_empty() {
            self.delete(key).await?;
            return Ok(StoredFiles { online, offline: 0 });
        }

        let path = self.path(key);
        let offline = self.store.store_files_to_upload(&path, &local).await?;
        debug!("Stored {} local files for {} in {}", offline, key, path);

        Ok(StoredFiles { online, offline })
    }

    /// Remove a key's folder. A folder that does not exist counts as removed.
    pub async fn delete(&self, key: &FolderKey) -> Result<()> {
        let path = self.path(key);
        match self.store.remove_dir(&path).await {
            Ok(()) => {
                debug!("Deleted attachment folder {}", path);
                Ok(())
            }
            Err(e) if e.is_not_found() => {
                debug!("Attachment folder already absent: {}", path);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    pub async fn new_discussion_files(
        &self,
        forum_id: u64,
        created_at: i64,
        site_id: &str,
    ) -> Result<Vec<LocalFile>> {
        let key = self.folder_for_new_discussion(forum_id, created_at, site_id);
        self.list_stored_files(&key).await
    }

    pub async fn reply_files(
        &self,
        forum_id: u64,
        post_id: u64,
        site_id: &str,
        user_id: Option<u64>,
    ) -> Result<Vec<LocalFile>> {
        let key = self.folder_for_reply(forum_id, post_id, site_id, user_id);
        self.list_stored_files(&key).await
    }

    pub async fn delete_new_discussion_files(
        &self,
        forum_id: u64,
        created_at: i64,
        site_id: &str,
    ) -> Result<()> {
        let key = self.folder_for_new_discussion(forum_id, created_at, site_id);
        self.delete(&key).await
    }

    pub async fn delete_reply_files(
        &self,
        forum_id: u64,
        post_id: u64,
        site_id: &str,
        user_id: Option<u64>,
    ) -> Result<()> {
        let key = self.folder_for_reply(forum_id, post_id, site_id, user_id);
        self.delete(&key).await
    }
}
