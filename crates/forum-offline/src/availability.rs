//! Human-facing availability state of a forum, derived from its dates.

use crate::model::Forum;
use crate::services::{DateFormatter, Translator};

use std::sync::Arc;
use web_time::SystemTime;

pub const CUTOFF_DATE_REACHED: &str = "addon.mod_forum.cutoffdatereached";
pub const FORUM_IS_DUE: &str = "addon.mod_forum.thisforumisdue";
pub const FORUM_HAS_DUE_DATE: &str = "addon.mod_forum.thisforumhasduedate";

/// Builds the availability message shown above a forum.
pub struct AvailabilityEvaluator {
    dates: Arc<dyn DateFormatter>,
    strings: Arc<dyn Translator>,
}

impl AvailabilityEvaluator {
    pub fn new(dates: Arc<dyn DateFormatter>, strings: Arc<dyn Translator>) -> Self {
        Self { dates, strings }
    }

    /// Availability message for the current time.
    pub async fn message(&self, forum: &Forum) -> Option<String> {
        self.message_at(forum, now_millis()).await
    }

    /// Availability message at `now` (milliseconds since epoch).
    ///
    /// A passed cutoff date wins over a passed due date, which wins over a
    /// due date still in the future.
    pub async fn message_at(&self, forum: &Forum, now: i64) -> Option<String> {
        if forum.cutoffdate > 0 && forum.cutoffdate < now {
            return Some(self.strings.translate(CUTOFF_DATE_REACHED, &[]).await);
        }

        if forum.duedate > 0 {
            let key = if forum.duedate < now {
                FORUM_IS_DUE
            } else {
                FORUM_HAS_DUE_DATE
            };
            let due = self.dates.format_user_date(forum.duedate).await;
            return Some(self.strings.translate(key, &[("$a", due)]).await);
        }

        None
    }
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
