//! Detects whether an edited post differs from its original content.

use crate::model::{AttachmentEntry, PostContent};

/// Check whether `current` differs from `original`.
///
/// Without an original (or with one whose subject was never set) there is
/// nothing to compare against, so the post counts as unchanged.
pub fn has_changed(current: &PostContent, original: Option<&PostContent>) -> bool {
    let Some(original) = original else {
        return false;
    };
    let Some(original_subject) = original.subject.as_deref() else {
        return false;
    };

    if current.subject.as_deref() != Some(original_subject)
        || current.message != original.message
        || current.is_private_reply != original.is_private_reply
    {
        return true;
    }

    are_file_lists_different(&current.files, &original.files)
}

/// Compare two attachment lists ignoring order, by name and size.
pub fn are_file_lists_different(a: &[AttachmentEntry], b: &[AttachmentEntry]) -> bool {
    if a.len() != b.len() {
        return true;
    }

    let mut left: Vec<_> = a.iter().map(AttachmentEntry::identity).collect();
    let mut right: Vec<_> = b.iter().map(AttachmentEntry::identity).collect();
    left.sort_unstable();
    right.sort_unstable();
    left != right
}
