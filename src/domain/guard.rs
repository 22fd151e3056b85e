//! Expression guard: at most one like or dislike per (user, review).

use std::sync::Arc;

use crate::db::Repository;
use crate::errors::AppError;
use crate::models::{ExpressionKind, PreferenceUpdate, Review};

use super::aggregate::apply_expression;
use super::overlay::SessionOverlay;

/// Counters to display after an accepted expression.
///
/// These are optimistic: persisted count plus one, returned before the
/// durable write resolves.
#[derive(Debug, Clone, Copy)]
pub struct ExpressionReceipt {
    pub likes: i64,
    pub dislikes: i64,
}

/// Decides whether a new expression is permitted and kicks off its
/// durable write.
pub struct ExpressionGuard {
    repo: Arc<Repository>,
    overlay: Arc<SessionOverlay>,
}

impl ExpressionGuard {
    pub fn new(repo: Arc<Repository>, overlay: Arc<SessionOverlay>) -> Self {
        Self { repo, overlay }
    }

    /// Accept or reject an expression for this (user, review) pair.
    ///
    /// On accept the overlay entry is recorded synchronously and the
    /// counter/preference writes run in a detached task. A failed write is
    /// logged, never rolled back: the optimistic counters stand and the
    /// overlay keeps blocking repeats until reconciliation.
    pub async fn try_express(
        &self,
        review: &Review,
        username: &str,
        kind: ExpressionKind,
    ) -> Result<ExpressionReceipt, AppError> {
        let persisted = self.repo.get_preferences(username).await?;
        self.overlay
            .try_record(username, &review.id, kind, &persisted)?;

        let (likes, dislikes) = apply_expression(review.likes, review.dislikes, kind);

        let repo = Arc::clone(&self.repo);
        let overlay = Arc::clone(&self.overlay);
        let username = username.to_string();
        let review_id = review.id.clone();
        tokio::spawn(async move {
            match persist_expression(&repo, &username, &review_id, kind).await {
                Ok(()) => overlay.confirm(&username, &review_id),
                Err(e) => tracing::error!(
                    "Failed to persist {:?} by {} on review {}: {}",
                    kind,
                    username,
                    review_id,
                    e
                ),
            }
        });

        Ok(ExpressionReceipt { likes, dislikes })
    }

    /// Reconciliation pass run at the reload boundary (preference load).
    ///
    /// Pending overlay entries are re-merged into the durable preference
    /// record so the dedup guarantee converges even after a failed write.
    /// Counter deltas are not retried; a lost increment stays lost rather
    /// than risking a double count.
    pub async fn reconcile(&self, username: &str) {
        for (review_id, kind) in self.overlay.pending_for(username) {
            let update = PreferenceUpdate::for_expression(username, &review_id, kind);
            match self.repo.merge_preferences(username, &update).await {
                Ok(_) => self.overlay.confirm(username, &review_id),
                Err(e) => tracing::warn!(
                    "Reconciliation for {} on review {} still failing: {}",
                    username,
                    review_id,
                    e
                ),
            }
        }
    }
}

async fn persist_expression(
    repo: &Repository,
    username: &str,
    review_id: &str,
    kind: ExpressionKind,
) -> Result<(), AppError> {
    repo.increment_count(review_id, kind).await?;
    let update = PreferenceUpdate::for_expression(username, review_id, kind);
    repo.merge_preferences(username, &update).await?;
    Ok(())
}
