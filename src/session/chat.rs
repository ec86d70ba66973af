use crate::models::ChatMessage;
use crate::Gateway;

pub const GREETING: &str =
    "Hey there! I'm Aakash's AI assistant. Ask me anything about his projects or skills.";

/// Append-only chat history for one session.
#[derive(Debug, Clone)]
pub struct ChatTranscript {
    messages: Vec<ChatMessage>,
}

impl ChatTranscript {
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::ai(GREETING)],
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Send one visitor message and record the reply.
    ///
    /// Blank input is ignored and returns `None`. The gateway never fails, so a
    /// sent message always gets a reply, possibly an apology.
    pub async fn send(&mut self, gateway: &Gateway, input: &str) -> Option<&ChatMessage> {
        let query = input.trim();
        if query.is_empty() {
            return None;
        }

        self.messages.push(ChatMessage::user(query));
        let reply = gateway.chat_respond(query).await;
        self.messages.push(ChatMessage::ai(reply));
        self.messages.last()
    }
}

impl Default for ChatTranscript {
    fn default() -> Self {
        Self::new()
    }
}
