//! Shared review store.
//!
//! An append-only, insertion-ordered feed of published reviews. The most
//! recent commit is always first in the observable order. `append` is the
//! only way a new review enters the feed; readers always observe either the
//! pre-append or the post-append sequence.

use tokio::sync::RwLock;
use tracing::info;

use crate::review::{PublishedReview, ReviewId};

/// Feed interaction kinds for a published review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteKind {
    Helpful,
    NotHelpful,
}

/// Thread-safe, in-memory feed of published reviews, newest first.
///
/// The store does not deduplicate, validate, or reorder by anything other
/// than insertion time.
pub struct ReviewStore {
    reviews: RwLock<Vec<PublishedReview>>,
}

impl Default for ReviewStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ReviewStore {
    pub fn new() -> Self {
        Self {
            reviews: RwLock::new(Vec::new()),
        }
    }

    /// Load initial feed content, newest first. Replaces current contents.
    pub async fn seed(&self, reviews: Vec<PublishedReview>) {
        let mut guard = self.reviews.write().await;
        *guard = reviews;
    }

    /// Append a newly committed review at the head of the feed.
    pub async fn append(&self, review: PublishedReview) {
        let mut reviews = self.reviews.write().await;
        info!("Publishing review {} to the feed", review.id);
        reviews.insert(0, review);
    }

    /// Snapshot of the feed, newest first.
    pub async fn list(&self) -> Vec<PublishedReview> {
        let reviews = self.reviews.read().await;
        reviews.clone()
    }

    pub async fn len(&self) -> usize {
        let reviews = self.reviews.read().await;
        reviews.len()
    }

    pub async fn is_empty(&self) -> bool {
        let reviews = self.reviews.read().await;
        reviews.is_empty()
    }

    /// Increment one of the vote counters on a record.
    ///
    /// Touches nothing but the counter; id, date, and content fields are
    /// never mutated after commit. Returns false when the id is unknown.
    pub async fn record_vote(&self, id: ReviewId, kind: VoteKind) -> bool {
        let mut reviews = self.reviews.write().await;
        match reviews.iter_mut().find(|review| review.id == id) {
            Some(review) => {
                match kind {
                    VoteKind::Helpful => review.helpful_count += 1,
                    VoteKind::NotHelpful => review.not_helpful_count += 1,
                }
                true
            }
            None => false,
        }
    }
}
