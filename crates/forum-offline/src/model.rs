//! Data model shared by the offline reconciliation components.
//!
//! Draft-side types (`DraftReply`, `LocalFile`) describe what the device holds
//! while disconnected. Server-side types (`CanonicalPost`, `Discussion`,
//! `RemoteFileRef`) mirror the shape the forum web service returns, so their
//! serde field names follow the server rather than Rust conventions.

use serde::{Deserialize, Serialize, Serializer};

/// A file already present on the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteFileRef {
    pub filename: String,
    pub fileurl: String,
    pub filesize: u64,
    #[serde(default)]
    pub mimetype: Option<String>,
    /// Last modification time in milliseconds since epoch
    #[serde(default)]
    pub timemodified: i64,
}

/// A file held only on this device, queued for a future upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalFile {
    /// File name (not full path)
    pub name: String,
    /// Location inside the file store
    pub path: String,
    /// File size in bytes
    pub size: u64,
}

/// One attachment of a post, either already uploaded or still local.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "origin", rename_all = "lowercase")]
pub enum AttachmentEntry {
    Remote(RemoteFileRef),
    Local(LocalFile),
}

impl AttachmentEntry {
    pub fn name(&self) -> &str {
        match self {
            AttachmentEntry::Remote(file) => &file.filename,
            AttachmentEntry::Local(file) => &file.name,
        }
    }

    pub fn size(&self) -> u64 {
        match self {
            AttachmentEntry::Remote(file) => file.filesize,
            AttachmentEntry::Local(file) => file.size,
        }
    }

    /// Identity used when comparing attachment lists: name plus size.
    pub fn identity(&self) -> (&str, u64) {
        (self.name(), self.size())
    }

    pub fn is_local(&self) -> bool {
        matches!(self, AttachmentEntry::Local(_))
    }
}

impl From<RemoteFileRef> for AttachmentEntry {
    fn from(file: RemoteFileRef) -> Self {
        AttachmentEntry::Remote(file)
    }
}

impl From<LocalFile> for AttachmentEntry {
    fn from(file: LocalFile) -> Self {
        AttachmentEntry::Local(file)
    }
}

/// Attachments recorded on a draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftAttachments {
    /// Files that were already on the server when the draft was saved
    #[serde(default)]
    pub remote: Vec<RemoteFileRef>,
    /// Whether the draft's folder holds files queued locally
    #[serde(default)]
    pub has_local: bool,
}

/// A reply composed while offline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftReply {
    pub forum_id: u64,
    pub discussion_id: u64,
    pub parent_post_id: u64,
    pub subject: String,
    pub message: String,
    pub user_id: u64,
    pub course_id: u64,
    /// Creation time in milliseconds since epoch
    pub created_at: i64,
    pub is_private: bool,
    #[serde(default)]
    pub attachments: DraftAttachments,
}

/// A post in the server's shape.
///
/// Posts built from drafts carry `id: None` and `modified: None`; both
/// serialize as `false` the way the server marks unassigned values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanonicalPost {
    #[serde(serialize_with = "false_when_none")]
    pub id: Option<u64>,
    pub discussion: u64,
    pub parent: u64,
    pub userid: u64,
    pub created: i64,
    #[serde(serialize_with = "false_when_none")]
    pub modified: Option<i64>,
    pub mailed: u32,
    pub subject: String,
    pub message: String,
    pub messageformat: u32,
    pub messagetrust: u32,
    /// 1 when `attachments` is non-empty, 0 otherwise
    pub attachment: u8,
    pub attachments: Vec<AttachmentEntry>,
    pub totalscore: u32,
    pub mailnow: u32,
    pub deleted: bool,
    pub isprivatereply: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub userfullname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub userpictureurl: Option<String>,
}

fn false_when_none<S, T>(value: &Option<T>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Serialize,
{
    match value {
        Some(v) => v.serialize(s),
        None => s.serialize_bool(false),
    }
}

/// The editable content of a post, as compared by change detection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostContent {
    pub subject: Option<String>,
    pub message: String,
    pub is_private_reply: bool,
    pub files: Vec<AttachmentEntry>,
}

/// Forum settings relevant to availability. Dates are milliseconds since
/// epoch; 0 means "not set".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Forum {
    pub id: u64,
    pub course: u64,
    pub name: String,
    #[serde(default)]
    pub cutoffdate: i64,
    #[serde(default)]
    pub duedate: i64,
}

/// A discussion as returned by the discussion listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discussion {
    /// Id of the discussion's first post
    pub id: u64,
    /// Discussion id
    pub discussion: u64,
    pub name: String,
    pub subject: String,
    pub userid: u64,
    #[serde(default)]
    pub numreplies: u32,
    #[serde(default)]
    pub pinned: bool,
}

/// One page of the discussion listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscussionPage {
    pub discussions: Vec<Discussion>,
    pub can_load_more: bool,
}

/// Discussion ordering understood by the listing service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    LastPostDesc,
    LastPostAsc,
    CreatedDesc,
    CreatedAsc,
    RepliesDesc,
    RepliesAsc,
}

impl SortOrder {
    /// Numeric value used on the wire.
    pub fn value(self) -> u8 {
        match self {
            SortOrder::LastPostDesc => 1,
            SortOrder::LastPostAsc => 2,
            SortOrder::CreatedDesc => 3,
            SortOrder::CreatedAsc => 4,
            SortOrder::RepliesDesc => 5,
            SortOrder::RepliesAsc => 6,
        }
    }

    pub fn from_value(value: u8) -> Option<Self> {
        Some(match value {
            1 => SortOrder::LastPostDesc,
            2 => SortOrder::LastPostAsc,
            3 => SortOrder::CreatedDesc,
            4 => SortOrder::CreatedAsc,
            5 => SortOrder::RepliesDesc,
            6 => SortOrder::RepliesAsc,
            _ => return None,
        })
    }
}

/// Display data attached to a post when the author's profile is available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub full_name: String,
    pub picture_url: String,
}
