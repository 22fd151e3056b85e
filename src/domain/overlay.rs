//! Session-scoped overlay of not-yet-durable expressions.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::errors::AppError;
use crate::models::{ExpressionKind, PreferenceRecord};

/// Ephemeral record of expressions whose durable write has not yet landed.
///
/// Keyed by username, then review id. Entries exist only between the
/// optimistic accept and the persistence confirmation; a failed write
/// leaves the entry in place so repeat clicks stay blocked until the
/// next reconciliation pass.
#[derive(Default)]
pub struct SessionOverlay {
    entries: Mutex<HashMap<String, HashMap<String, ExpressionKind>>>,
}

impl SessionOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the persisted record and the overlay, then record the new
    /// expression, all under one lock. No suspension point sits between
    /// the check and the record, so a double click cannot pass twice.
    pub fn try_record(
        &self,
        username: &str,
        review_id: &str,
        kind: ExpressionKind,
        persisted: &PreferenceRecord,
    ) -> Result<(), AppError> {
        let mut entries = self.lock();

        if persisted.has_expressed(review_id) {
            return Err(AppError::AlreadyExpressed);
        }

        let user_entries = entries.entry(username.to_string()).or_default();
        if user_entries.contains_key(review_id) {
            return Err(AppError::AlreadyExpressed);
        }
        user_entries.insert(review_id.to_string(), kind);
        Ok(())
    }

    /// Drop an entry whose expression is now covered by the durable record.
    pub fn confirm(&self, username: &str, review_id: &str) {
        let mut entries = self.lock();
        if let Some(user_entries) = entries.get_mut(username) {
            user_entries.remove(review_id);
            if user_entries.is_empty() {
                entries.remove(username);
            }
        }
    }

    /// Snapshot of a user's pending entries, for reconciliation.
    pub fn pending_for(&self, username: &str) -> Vec<(String, ExpressionKind)> {
        let entries = self.lock();
        entries
            .get(username)
            .map(|user_entries| {
                user_entries
                    .iter()
                    .map(|(id, kind)| (id.clone(), *kind))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, HashMap<String, ExpressionKind>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
