#![allow(dead_code)]

use async_trait::async_trait;
use forum_offline::services::Result;
use forum_offline::{
    AttachmentEntry, DateFormatter, Discussion, DiscussionPage, DiscussionSource, LocalFile,
    ProfileProvider, RemoteFileRef, ServiceError, SortOrder, Translator, Uploader, UserProfile,
};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Mutex, Once};

pub const SITE: &str = "https://school.example.org";

static TRACING: Once = Once::new();

/// Route library logs to the test output. Filter with RUST_LOG.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A fake forum site standing in for every network collaborator.
pub struct FakeSite {
    pub pages: Vec<DiscussionPage>,
    pub page_requests: AtomicU32,
    pub profile_online: AtomicBool,
    pub uploads: Mutex<Vec<Vec<String>>>,
}

impl FakeSite {
    pub fn new() -> Self {
        Self {
            pages: Vec::new(),
            page_requests: AtomicU32::new(0),
            profile_online: AtomicBool::new(true),
            uploads: Mutex::new(Vec::new()),
        }
    }

    pub fn with_pages(pages: Vec<DiscussionPage>) -> Self {
        Self {
            pages,
            ..Self::new()
        }
    }
}

#[async_trait]
impl DiscussionSource for FakeSite {
    async fn list_discussions(
        &self,
        _forum_id: u64,
        _sort: SortOrder,
        page: u32,
        _force_refresh: bool,
        _site_id: &str,
    ) -> Result<DiscussionPage> {
        self.page_requests.fetch_add(1, Ordering::SeqCst);
        Ok(self.pages.get(page as usize).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl Uploader for FakeSite {
    async fn upload_or_reupload_files(
        &self,
        files: &[AttachmentEntry],
        _component: &str,
        _entity_id: u64,
        _site_id: &str,
    ) -> Result<u64> {
        let names = files.iter().map(|f| f.name().to_string()).collect();
        let mut uploads = self.uploads.lock().unwrap();
        uploads.push(names);
        Ok(1000 + uploads.len() as u64)
    }
}

#[async_trait]
impl ProfileProvider for FakeSite {
    async fn get_profile(
        &self,
        user_id: u64,
        _course_id: u64,
        _cached_ok: bool,
        _site_id: &str,
    ) -> Result<UserProfile> {
        if !self.profile_online.load(Ordering::SeqCst) {
            return Err(ServiceError::Network("connection refused".into()));
        }
        Ok(UserProfile {
            full_name: format!("User {}", user_id),
            picture_url: format!("https://school.example.org/pix/{}.png", user_id),
        })
    }
}

#[async_trait]
impl DateFormatter for FakeSite {
    async fn format_user_date(&self, epoch_millis: i64) -> String {
        epoch_millis.to_string()
    }
}

#[async_trait]
impl Translator for FakeSite {
    async fn translate(&self, key: &str, params: &[(&str, String)]) -> String {
        params
            .iter()
            .fold(key.to_string(), |text, (name, value)| {
                format!("{} {}={}", text, name, value)
            })
    }
}

pub fn remote(name: &str, size: u64) -> AttachmentEntry {
    AttachmentEntry::Remote(remote_ref(name, size))
}

pub fn remote_ref(name: &str, size: u64) -> RemoteFileRef {
    RemoteFileRef {
        filename: name.to_string(),
        fileurl: format!("{}/pluginfile.php/{}", SITE, name),
        filesize: size,
        mimetype: None,
        timemodified: 0,
    }
}

pub fn local(name: &str, size: u64) -> AttachmentEntry {
    AttachmentEntry::Local(LocalFile {
        name: name.to_string(),
        path: format!("/device/picked/{}", name),
        size,
    })
}

pub fn discussion(id: u64) -> Discussion {
    Discussion {
        id: id + 500,
        discussion: id,
        name: format!("Topic {}", id),
        subject: format!("Topic {}", id),
        userid: 2,
        numreplies: 0,
        pinned: false,
    }
}
