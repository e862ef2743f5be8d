//! Finds a discussion by scanning a forum's paginated discussion listing.

use crate::config::ForumOfflineConfig;
use crate::model::{Discussion, SortOrder};
use crate::services::{DiscussionSource, ServiceError};

use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum LocateError {
    #[error("Discussion {discussion_id} not found in forum {forum_id}")]
    NotFound { forum_id: u64, discussion_id: u64 },

    #[error("Discussion listing failed: {0}")]
    Source(#[from] ServiceError),
}

pub type Result<T> = std::result::Result<T, LocateError>;

pub struct DiscussionLocator {
    source: Arc<dyn DiscussionSource>,
    sort: SortOrder,
    force_refresh: bool,
}

impl DiscussionLocator {
    pub fn new(source: Arc<dyn DiscussionSource>, config: &ForumOfflineConfig) -> Self {
        Self {
            source,
            sort: config.discussion_sort,
            force_refresh: config.force_refresh,
        }
    }

    /// Scan pages from 0 until one contains `discussion_id`.
    ///
    /// Pages are fetched one after another; the next request is only issued
    /// once the previous page has been checked.
    pub async fn find_discussion_by_id(
        &self,
        forum_id: u64,
        discussion_id: u64,
        site_id: &str,
    ) -> Result<Discussion> {
        let mut page = 0;
        loop {
            let listing = self
                .source
                .list_discussions(forum_id, self.sort, page, self.force_refresh, site_id)
                .await?;

            if let Some(found) = listing
                .discussions
                .into_iter()
                .find(|d| d.discussion == discussion_id)
            {
                debug!(
                    "Found discussion {} in forum {} after {} page(s)",
                    discussion_id,
                    forum_id,
                    page + 1
                );
                return Ok(found);
            }

            if !listing.can_load_more {
                debug!(
                    "Discussion {} not in forum {} ({} page(s) scanned)",
                    discussion_id,
                    forum_id,
                    page + 1
                );
                return Err(LocateError::NotFound {
                    forum_id,
                    discussion_id,
                });
            }

            page += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DiscussionPage;
    use crate::services;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Serves fixed pages and records which pages were requested.
    struct PagedSource {
        pages: Vec<DiscussionPage>,
        requested: Mutex<Vec<u32>>,
        fail_on: Option<u32>,
    }

    impl PagedSource {
        fn new(pages: Vec<DiscussionPage>) -> Self {
            Self {
                pages,
                requested: Mutex::new(Vec::new()),
                fail_on: None,
            }
        }

        fn requested(&self) -> Vec<u32> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl DiscussionSource for PagedSource {
        async fn list_discussions(
            &self,
            _forum_id: u64,
            _sort: SortOrder,
            page: u32,
            _force_refresh: bool,
            _site_id: &str,
        ) -> services::Result<DiscussionPage> {
            self.requested.lock().unwrap().push(page);
            if self.fail_on == Some(page) {
                return Err(ServiceError::Network("offline".into()));
            }
            Ok(self.pages.get(page as usize).cloned().unwrap_or_default())
        }
    }

    fn discussion(id: u64) -> Discussion {
        Discussion {
            id: id * 10,
            discussion: id,
            name: format!("Discussion {}", id),
            subject: format!("Discussion {}", id),
            userid: 1,
            numreplies: 0,
            pinned: false,
        }
    }

    /// Three pages of 20 discussions: ids 0..20, 20..40, 40..60.
    fn three_pages(can_load_more: bool) -> Vec<DiscussionPage> {
        (0..3)
            .map(|p| DiscussionPage {
                discussions: (p * 20..p * 20 + 20).map(discussion).collect(),
                can_load_more: can_load_more && p < 2,
            })
            .collect()
    }

    fn locator(source: Arc<PagedSource>) -> DiscussionLocator {
        DiscussionLocator::new(source, &ForumOfflineConfig::default())
    }

    #[tokio::test]
    async fn test_finds_match_on_third_page() {
        let source = Arc::new(PagedSource::new(three_pages(true)));

        let found = locator(Arc::clone(&source))
            .find_discussion_by_id(5, 45, "site")
            .await
            .unwrap();

        assert_eq!(found.discussion, 45);
        assert_eq!(source.requested(), vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_stops_at_first_page_with_match() {
        let source = Arc::new(PagedSource::new(three_pages(true)));

        let found = locator(Arc::clone(&source))
            .find_discussion_by_id(5, 3, "site")
            .await
            .unwrap();

        assert_eq!(found.id, 30);
        assert_eq!(source.requested(), vec![0]);
    }

    #[tokio::test]
    async fn test_not_found_when_no_more_pages() {
        let source = Arc::new(PagedSource::new(three_pages(false)));

        let err = locator(Arc::clone(&source))
            .find_discussion_by_id(5, 45, "site")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            LocateError::NotFound {
                forum_id: 5,
                discussion_id: 45
            }
        ));
        assert_eq!(source.requested(), vec![0]);
    }

    #[tokio::test]
    async fn test_not_found_after_last_page() {
        let source = Arc::new(PagedSource::new(three_pages(true)));

        let err = locator(Arc::clone(&source))
            .find_discussion_by_id(5, 999, "site")
            .await
            .unwrap_err();

        assert!(matches!(err, LocateError::NotFound { .. }));
        assert_eq!(source.requested(), vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_empty_forum_is_not_found() {
        let source = Arc::new(PagedSource::new(vec![DiscussionPage::default()]));

        let err = locator(source)
            .find_discussion_by_id(5, 1, "site")
            .await
            .unwrap_err();

        assert!(matches!(err, LocateError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_page_failure_is_distinct_from_not_found() {
        let mut source = PagedSource::new(three_pages(true));
        source.fail_on = Some(1);
        let source = Arc::new(source);

        let err = locator(Arc::clone(&source))
            .find_discussion_by_id(5, 45, "site")
            .await
            .unwrap_err();

        assert!(matches!(err, LocateError::Source(ServiceError::Network(_))));
        assert_eq!(source.requested(), vec![0, 1]);
    }
}
