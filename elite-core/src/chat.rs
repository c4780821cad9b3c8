//! Assistant chat session.
//!
//! The session owns an append-only message log. Sending appends the user
//! message right away and schedules the scripted reply after a fixed delay on
//! the tokio runtime. Pending replies are aborted when the session is closed or
//! dropped, so nothing is appended after teardown.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::error::{EliteError, EliteResult};
use crate::records::new_id;
use crate::responder::{ResponseMatcher, WELCOME_MESSAGE};

pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(600);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        ChatMessage {
            id: new_id(),
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        ChatMessage {
            id: new_id(),
            role: Role::Assistant,
            content: content.into(),
        }
    }

    pub fn welcome() -> Self {
        ChatMessage {
            id: "welcome".to_string(),
            role: Role::Assistant,
            content: WELCOME_MESSAGE.to_string(),
        }
    }
}

/// Shared handle on a session's messages.
#[derive(Debug, Clone, Default)]
pub struct ChatLog(Arc<Mutex<Vec<ChatMessage>>>);

impl ChatLog {
    fn lock(&self) -> MutexGuard<'_, Vec<ChatMessage>> {
        // A panic while holding the lock cannot leave a half-pushed Vec.
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn push(&self, message: ChatMessage) {
        self.lock().push(message);
    }

    pub fn snapshot(&self) -> Vec<ChatMessage> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn last(&self) -> Option<ChatMessage> {
        self.lock().last().cloned()
    }
}

/// A scheduled reply. Dropping it cancels the reply.
#[derive(Debug)]
struct PendingReply(Option<JoinHandle<()>>);

impl PendingReply {
    fn is_finished(&self) -> bool {
        self.0.as_ref().is_none_or(JoinHandle::is_finished)
    }

    async fn wait(mut self) {
        if let Some(handle) = self.0.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for PendingReply {
    fn drop(&mut self) {
        if let Some(handle) = self.0.take() {
            handle.abort();
        }
    }
}

pub struct ChatSession {
    log: ChatLog,
    matcher: Arc<ResponseMatcher>,
    delay: Duration,
    runtime: Handle,
    pending: Vec<PendingReply>,
}

impl ChatSession {
    /// Start a session holding only the welcome message.
    ///
    /// Must be called from within a tokio runtime; replies are spawned on it.
    pub fn new(matcher: ResponseMatcher, delay: Duration) -> EliteResult<Self> {
        let runtime = Handle::try_current().map_err(|e| EliteError::Runtime(e.to_string()))?;
        let log = ChatLog::default();
        log.push(ChatMessage::welcome());

        Ok(ChatSession {
            log,
            matcher: Arc::new(matcher),
            delay,
            runtime,
            pending: Vec::new(),
        })
    }

    pub fn log(&self) -> ChatLog {
        self.log.clone()
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.log.snapshot()
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replies scheduled but not yet appended.
    pub fn pending_replies(&self) -> usize {
        self.pending.iter().filter(|p| !p.is_finished()).count()
    }

    /// Append `input` as a user message and schedule the assistant reply.
    ///
    /// Blank input is rejected without touching the log. Returns the id of
    /// the user message.
    pub fn send(&mut self, input: &str) -> Option<String> {
        let content = input.trim();
        if content.is_empty() {
            return None;
        }

        let message = ChatMessage::user(content);
        let id = message.id.clone();
        self.log.push(message);

        let log = self.log.clone();
        let matcher = Arc::clone(&self.matcher);
        let prompt = content.to_string();
        let delay = self.delay;

        debug!(id = %id, delay_ms = delay.as_millis() as u64, "Scheduling assistant reply");

        let handle = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            log.push(ChatMessage::assistant(matcher.respond(&prompt)));
        });

        self.pending.retain(|p| !p.is_finished());
        self.pending.push(PendingReply(Some(handle)));

        Some(id)
    }

    /// Wait until every scheduled reply has been appended.
    pub async fn settle(&mut self) {
        for pending in self.pending.drain(..) {
            pending.wait().await;
        }
    }

    /// Cancel every reply that has not fired yet.
    pub fn close(&mut self) {
        let cancelled = self.pending_replies();
        if cancelled > 0 {
            debug!(cancelled, "Cancelling pending assistant replies");
        }
        self.pending.clear();
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> ChatSession {
        ChatSession::new(ResponseMatcher::default(), DEFAULT_REPLY_DELAY).unwrap()
    }

    async fn past_delay() {
        tokio::time::sleep(DEFAULT_REPLY_DELAY + Duration::from_millis(1)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn starts_with_the_welcome_message() {
        let session = session();
        let messages = session.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].id, "welcome");
        assert_eq!(messages[0].role, Role::Assistant);
        assert_eq!(messages[0].content, WELCOME_MESSAGE);
    }

    #[tokio::test(start_paused = true)]
    async fn send_appends_user_then_reply_after_delay() {
        let mut session = session();
        let id = session.send("  Ajoute un prospect  ").unwrap();

        let messages = session.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].id, id);
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[1].content, "Ajoute un prospect");
        let shared: &ChatSession = &session;
        assert_eq!(shared.pending_replies(), 1);
        assert_eq!(shared.pending_replies(), 1);

        tokio::time::sleep(DEFAULT_REPLY_DELAY / 2).await;
        assert_eq!(session.messages().len(), 2);

        past_delay().await;
        let messages = session.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[2].role, Role::Assistant);
        assert_eq!(
            messages[2].content,
            crate::responder::respond("Ajoute un prospect")
        );
        assert_eq!(session.pending_replies(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn blank_input_appends_nothing() {
        let mut session = session();
        assert_eq!(session.send(""), None);
        assert_eq!(session.send("  \t\n"), None);
        past_delay().await;
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.pending_replies(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn replies_follow_their_messages_in_order() {
        let mut session = session();
        session.send("bonjour");
        past_delay().await;
        session.send("xyz");
        past_delay().await;

        let roles: Vec<_> = session.messages().iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![Role::Assistant, Role::User, Role::Assistant, Role::User, Role::Assistant]
        );
        let messages = session.messages();
        assert_eq!(messages[4].content, crate::responder::FALLBACK_REPLY);
    }

    #[tokio::test(start_paused = true)]
    async fn close_cancels_pending_replies() {
        let mut session = session();
        session.send("rappel demain");
        session.close();
        past_delay().await;
        assert_eq!(session.messages().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_session_cancels_pending_replies() {
        let mut session = session();
        let log = session.log();
        session.send("rappel demain");
        drop(session);
        past_delay().await;
        assert_eq!(log.len(), 2);
        assert_eq!(log.last().map(|m| m.role), Some(Role::User));
    }

    #[tokio::test(start_paused = true)]
    async fn settle_waits_for_every_reply() {
        let mut session = session();
        session.send("hello");
        session.send("domaine");
        session.settle().await;
        assert_eq!(session.messages().len(), 5);
        assert_eq!(session.pending_replies(), 0);
    }

    #[test]
    fn new_outside_a_runtime_is_an_error() {
        let result = ChatSession::new(ResponseMatcher::default(), DEFAULT_REPLY_DELAY);
        assert!(matches!(result, Err(EliteError::Runtime(_))));
    }
}
