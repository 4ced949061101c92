//! Chat session state.
//!
//! A [`ChatSession`] owns the ordered message history and the currently
//! selected facet. Frontends hold one session per conversation and pass it
//! explicitly into each exchange; the HTTP layer round-trips it through
//! JSON.
//!
//! A session that arrives from outside the process (e.g. in an HTTP
//! request body) must pass [`ChatSession::validate`] before it is used.
//!
//! [`ChatSession::send`] borrows the session mutably for the whole
//! exchange, so a second send on the same session cannot start while a
//! reply is pending.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::classify::Classifier;
use crate::models::{ChatMessage, Facet, Role};

pub const WELCOME_MESSAGE: &str = "Welcome to the eCFR regulations assistant. Ask about \
     safety requirements, filing deadlines, or exemptions, and pick an agency to focus \
     the answers.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: Uuid,
    #[serde(default)]
    facet: Facet,
    messages: Vec<ChatMessage>,
}

impl ChatSession {
    /// New session seeded with the system welcome message.
    pub fn new(facet: Facet) -> Self {
        let mut session = Self {
            id: Uuid::new_v4(),
            facet,
            messages: Vec::new(),
        };
        session.messages.push(ChatMessage {
            id: 1,
            role: Role::System,
            content: WELCOME_MESSAGE.to_string(),
            agency: session.facet.agency().map(str::to_string),
        });
        session
    }

    /// Check the history invariants: it starts with a system message and
    /// ids run `1..=n` in insertion order.
    pub fn validate(&self) -> Result<()> {
        let Some(first) = self.messages.first() else {
            bail!("invalid session: message history is empty");
        };
        if first.role != Role::System {
            bail!("invalid session: first message must be a system message");
        }
        for (expected, message) in (1u64..).zip(&self.messages) {
            if message.id != expected {
                bail!(
                    "invalid session: message id {} found where {} was expected",
                    message.id,
                    expected
                );
            }
        }
        Ok(())
    }

    pub fn facet(&self) -> &Facet {
        &self.facet
    }

    /// Applies to messages appended after this call.
    pub fn set_facet(&mut self, facet: Facet) {
        self.facet = facet;
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last_message(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn push_user(&mut self, text: &str) -> Result<&ChatMessage> {
        self.append(Role::User, text.to_string())
    }

    /// Run one exchange: record the user message, await the classifier,
    /// record and return the assistant reply.
    ///
    /// Blank input is rejected before anything is appended. If the
    /// classifier fails, the user message stays in the history and no
    /// reply is added.
    pub async fn send(&mut self, classifier: &dyn Classifier, text: &str) -> Result<&ChatMessage> {
        if text.trim().is_empty() {
            bail!("message must not be empty");
        }

        self.push_user(text)?;
        let reply = classifier.respond(text, &self.facet).await?;
        self.append(Role::Assistant, reply)
    }

    fn next_id(&self) -> Result<u64> {
        match self.messages.last() {
            Some(last) => last
                .id
                .checked_add(1)
                .ok_or_else(|| anyhow::anyhow!("invalid session: message id overflow")),
            None => Ok(1),
        }
    }

    fn append(&mut self, role: Role, content: String) -> Result<&ChatMessage> {
        let message = ChatMessage {
            id: self.next_id()?,
            role,
            content,
            agency: self.facet.agency().map(str::to_string),
        };
        self.messages.push(message);
        // just pushed
        Ok(&self.messages[self.messages.len() - 1])
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new(Facet::All)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::KeywordClassifier;
    use async_trait::async_trait;

    struct FailingClassifier;

    #[async_trait]
    impl Classifier for FailingClassifier {
        fn name(&self) -> &str {
            "failing"
        }

        async fn respond(&self, _text: &str, _facet: &Facet) -> Result<String> {
            anyhow::bail!("backend unavailable")
        }
    }

    #[test]
    fn new_session_starts_with_system_message() {
        let session = ChatSession::default();
        assert_eq!(session.messages().len(), 1);
        let first = &session.messages()[0];
        assert_eq!(first.id, 1);
        assert_eq!(first.role, Role::System);
        assert_eq!(first.content, WELCOME_MESSAGE);
    }

    #[tokio::test]
    async fn send_appends_user_and_assistant_in_order() {
        let mut session = ChatSession::new(Facet::Agency("Department of Energy".into()));
        let reply = session
            .send(&KeywordClassifier, "What are the safety requirements?")
            .await
            .unwrap()
            .clone();

        assert_eq!(reply.role, Role::Assistant);
        assert!(reply.content.contains("Department of Energy"));

        let roles: Vec<Role> = session.messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::System, Role::User, Role::Assistant]);
        let ids: Vec<u64> = session.messages().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(
            session.messages()[1].agency.as_deref(),
            Some("Department of Energy")
        );
    }

    #[tokio::test]
    async fn blank_message_leaves_session_untouched() {
        let mut session = ChatSession::default();
        let err = session.send(&KeywordClassifier, "   ").await.unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
        assert_eq!(session.messages().len(), 1);
    }

    #[tokio::test]
    async fn facet_change_applies_to_later_messages_only() {
        let mut session = ChatSession::default();
        session.send(&KeywordClassifier, "hello").await.unwrap();
        session.set_facet(Facet::Agency("Department of Labor".into()));
        session.send(&KeywordClassifier, "filing deadline").await.unwrap();

        let msgs = session.messages();
        assert_eq!(msgs[1].agency, None);
        assert_eq!(msgs[2].agency, None);
        assert_eq!(msgs[3].agency.as_deref(), Some("Department of Labor"));
        assert!(msgs[4].content.starts_with("Department of Labor filing deadlines"));
    }

    #[tokio::test]
    async fn classifier_failure_keeps_user_message() {
        let mut session = ChatSession::default();
        assert!(session.send(&FailingClassifier, "hello").await.is_err());
        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.last_message().unwrap().role, Role::User);
    }

    #[tokio::test]
    async fn session_round_trips_through_json() {
        let mut session = ChatSession::default();
        session.send(&KeywordClassifier, "exempt?").await.unwrap();

        let json = serde_json::to_string(&session).unwrap();
        let mut restored: ChatSession = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.id, session.id);
        assert_eq!(restored.messages(), session.messages());

        restored.send(&KeywordClassifier, "hello").await.unwrap();
        assert_eq!(restored.last_message().unwrap().id, 5);
    }

    fn session_from(messages: serde_json::Value) -> ChatSession {
        serde_json::from_value(serde_json::json!({
            "id": Uuid::new_v4(),
            "facet": "All",
            "messages": messages,
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn fresh_and_extended_sessions_validate() {
        let mut session = ChatSession::default();
        assert!(session.validate().is_ok());
        session.send(&KeywordClassifier, "hello").await.unwrap();
        assert!(session.validate().is_ok());
    }

    #[test]
    fn out_of_order_ids_are_invalid() {
        let session = session_from(serde_json::json!([
            {"id": 9, "role": "system", "content": "welcome"},
            {"id": 2, "role": "user", "content": "safety"}
        ]));
        let err = session.validate().unwrap_err();
        assert!(err.to_string().starts_with("invalid session"));
        assert!(err.to_string().contains("message id 9"));
    }

    #[test]
    fn empty_history_is_invalid() {
        let session = session_from(serde_json::json!([]));
        assert!(session.validate().is_err());
    }

    #[test]
    fn history_must_open_with_system_message() {
        let session = session_from(serde_json::json!([
            {"id": 1, "role": "user", "content": "hi"}
        ]));
        let err = session.validate().unwrap_err();
        assert!(err.to_string().contains("system message"));
    }

    #[tokio::test]
    async fn max_message_id_errors_instead_of_overflowing() {
        let mut session = session_from(serde_json::json!([
            {"id": u64::MAX, "role": "system", "content": "welcome"}
        ]));
        assert!(session.validate().is_err());

        let err = session.send(&KeywordClassifier, "hello").await.unwrap_err();
        assert!(err.to_string().contains("overflow"));
        assert_eq!(session.messages().len(), 1);
    }
}
