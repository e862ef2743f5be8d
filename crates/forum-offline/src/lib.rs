//! forum-offline: Reconciles offline forum drafts with the server's post model.
//!
//! This crate provides:
//! - Deterministic attachment folders for offline drafts
//! - Conversion of offline replies into server-shaped posts
//! - Routing of attachments to local storage or upload depending on connectivity
//! - Change detection for edited posts and forum availability messages
//! - Lookup of a discussion across a paginated listing
//!
//! Network, storage, profile, date and string services are collaborators
//! supplied by the embedding application through the traits in `store` and
//! `services`.

pub mod availability;
pub mod changes;
pub mod config;
pub mod convert;
pub mod folders;
pub mod locator;
pub mod model;
pub mod router;
pub mod services;
pub mod store;

pub use availability::AvailabilityEvaluator;
pub use changes::{are_file_lists_different, has_changed};
pub use config::{ConfigError, ForumOfflineConfig};
pub use convert::{ConvertError, OfflineReplyConverter};
pub use folders::{
    AttachmentFolderManager, FolderKey, FolderLayout, ForumFolderLayout, StoredFiles,
};
pub use locator::{DiscussionLocator, LocateError};
pub use model::{
    AttachmentEntry, CanonicalPost, Discussion, DiscussionPage, DraftAttachments, DraftReply,
    Forum, LocalFile, PostContent, RemoteFileRef, SortOrder, UserProfile,
};
pub use router::{FileSubmission, RouteError, SubmissionRouter};
pub use services::{
    DateFormatter, DiscussionSource, ProfileProvider, ServiceError, Translator, Uploader,
};
pub use store::{FileStore, InMemoryFileStore, StoreError};
