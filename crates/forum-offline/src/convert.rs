//! Converts offline reply drafts into posts in the server's shape.
//!
//! Attachments come from two places: references to files already on the
//! server, kept on the draft, and files queued in the draft's attachment
//! folder. The author's profile is fetched alongside as optional display
//! data. A failure to list the folder fails the conversion; a failure to
//! fetch the profile only leaves the display fields empty.

use crate::config::ForumOfflineConfig;
use crate::folders::AttachmentFolderManager;
use crate::model::{AttachmentEntry, CanonicalPost, DraftReply, UserProfile};
use crate::services::ProfileProvider;
use crate::store::StoreError;

use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Failed to list offline attachments: {0}")]
    Attachments(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, ConvertError>;

pub struct OfflineReplyConverter {
    folders: Arc<AttachmentFolderManager>,
    profiles: Arc<dyn ProfileProvider>,
    profile_cache_ok: bool,
}

impl OfflineReplyConverter {
    pub fn new(
        folders: Arc<AttachmentFolderManager>,
        profiles: Arc<dyn ProfileProvider>,
        config: &ForumOfflineConfig,
    ) -> Self {
        Self {
            folders,
            profiles,
            profile_cache_ok: config.profile_cache_ok,
        }
    }

    /// Build the post a draft will become once it is submitted.
    pub async fn convert(&self, draft: &DraftReply, site_id: &str) -> Result<CanonicalPost> {
        let mut post = post_skeleton(draft);

        // Listing errors abort the join; profile errors were already absorbed
        let attachments = self.resolve_attachments(draft, site_id);
        let profile = async { Ok::<_, StoreError>(self.fetch_profile(draft, site_id).await) };
        let (attachments, profile) = futures::try_join!(attachments, profile)?;

        if let Some(profile) = profile {
            post.userfullname = Some(profile.full_name);
            post.userpictureurl = Some(profile.picture_url);
        }
        post.attachment = if attachments.is_empty() { 0 } else { 1 };
        post.attachments = attachments;

        Ok(post)
    }

    /// Remote references first, then queued local files, each in its own order.
    async fn resolve_attachments(
        &self,
        draft: &DraftReply,
        site_id: &str,
    ) -> std::result::Result<Vec<AttachmentEntry>, StoreError> {
        let mut attachments: Vec<AttachmentEntry> = draft
            .attachments
            .remote
            .iter()
            .cloned()
            .map(AttachmentEntry::Remote)
            .collect();

        if draft.attachments.has_local {
            let key = self.folders.folder_for_reply(
                draft.forum_id,
                draft.parent_post_id,
                site_id,
                Some(draft.user_id),
            );
            let local = self.folders.list_stored_files(&key).await?;
            attachments.extend(local.into_iter().map(AttachmentEntry::Local));
        }

        Ok(attachments)
    }

    async fn fetch_profile(&self, draft: &DraftReply, site_id: &str) -> Option<UserProfile> {
        match self
            .profiles
            .get_profile(draft.user_id, draft.course_id, self.profile_cache_ok, site_id)
            .await
        {
            Ok(profile) => Some(profile),
            Err(e) => {
                warn!(
                    "Profile of user {} unavailable, post left without author details: {}",
                    draft.user_id, e
                );
                None
            }
        }
    }
}

/// Server-shaped post with the draft's fields and nothing server-assigned.
fn post_skeleton(draft: &DraftReply) -> CanonicalPost {
    debug!(
        "Converting offline reply to post {} in discussion {}",
        draft.parent_post_id, draft.discussion_id
    );
    CanonicalPost {
        id: None,
        discussion: draft.discussion_id,
        parent: draft.parent_post_id,
        userid: draft.user_id,
        created: draft.created_at,
        modified: None,
        mailed: 0,
        subject: draft.subject.clone(),
        message: draft.message.clone(),
        messageformat: 1,
        messagetrust: 0,
        attachment: 0,
        attachments: Vec::new(),
        totalscore: 0,
        mailnow: 0,
        deleted: false,
        isprivatereply: draft.is_private,
        userfullname: None,
        userpictureurl: None,
    }
}
