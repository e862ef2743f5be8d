//! Collaborator traits for everything outside the offline core.
//!
//! Network fetches, uploads, profile lookups, date formatting and string
//! localization are provided by the embedding application. Each trait only
//! names the call this crate makes.

use crate::model::{AttachmentEntry, DiscussionPage, SortOrder, UserProfile};

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Not available: {0}")]
    NotAvailable(String),

    #[error("Service error: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, ServiceError>;

/// Paginated discussion listing of a forum.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait DiscussionSource: Send + Sync {
    async fn list_discussions(
        &self,
        forum_id: u64,
        sort: SortOrder,
        page: u32,
        force_refresh: bool,
        site_id: &str,
    ) -> Result<DiscussionPage>;
}

/// Uploads attachments to the server's draft area.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait Uploader: Send + Sync {
    /// Upload local files and re-reference remote ones into a fresh draft
    /// area. Returns the draft area item id.
    async fn upload_or_reupload_files(
        &self,
        files: &[AttachmentEntry],
        component: &str,
        entity_id: u64,
        site_id: &str,
    ) -> Result<u64>;
}

/// User profile lookup.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait ProfileProvider: Send + Sync {
    async fn get_profile(
        &self,
        user_id: u64,
        course_id: u64,
        cached_ok: bool,
        site_id: &str,
    ) -> Result<UserProfile>;
}

/// Formats timestamps for display.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait DateFormatter: Send + Sync {
    /// Format a timestamp in milliseconds since epoch.
    async fn format_user_date(&self, epoch_millis: i64) -> String;
}

/// Resolves localized strings.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait Translator: Send + Sync {
    /// Translate a message key, substituting named parameters.
    async fn translate(&self, key: &str, params: &[(&str, String)]) -> String;
}
