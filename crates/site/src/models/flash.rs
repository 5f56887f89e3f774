//! One-shot modal notices.
//!
//! A handler stores a message, redirects, and the next rendered page shows it
//! in the "Aviso!" modal. Reading the message removes it.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use super::session_keys;

/// A notice waiting to be shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub message: String,
}

impl Flash {
    /// Queue a message for the next rendered page, replacing any pending one.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be modified.
    pub async fn push(
        session: &Session,
        message: impl Into<String>,
    ) -> Result<(), tower_sessions::session::Error> {
        let flash = Self {
            message: message.into(),
        };
        session.insert(session_keys::FLASH, flash).await
    }

    /// Take the pending message, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be read.
    pub async fn take(session: &Session) -> Result<Option<String>, tower_sessions::session::Error> {
        Ok(session
            .remove::<Self>(session_keys::FLASH)
            .await?
            .map(|flash| flash.message))
    }
}
