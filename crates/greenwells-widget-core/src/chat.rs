use serde::{Deserialize, Serialize};

pub const REFILL_REPLY: &str =
    "You can visit any Green Wells service station or request pickup via our hotline.";
pub const KISUMU_REPLY: &str = "Yes — we have branches in Kisumu, Ugunja, and Mbita.";
pub const HOURS_REPLY: &str = "We are open Monday to Sunday, 6 AM to 10 PM.";
pub const PRICE_REPLY: &str =
    "Our prices are competitive and vary by service. Please visit our website for current rates.";
pub const DEFAULT_REPLY: &str = "Thank you for your question! How else can I help you?";

pub const ESCALATION_CONNECTING: &str = "Connecting you to a live agent...";
pub const ESCALATION_QUEUED: &str = "A support agent will be with you shortly.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyRule {
    Refill,
    Kisumu,
    Hours,
    Price,
    Fallback,
}

impl ReplyRule {
    #[must_use]
    pub fn reply(self) -> &'static str {
        match self {
            Self::Refill => REFILL_REPLY,
            Self::Kisumu => KISUMU_REPLY,
            Self::Hours => HOURS_REPLY,
            Self::Price => PRICE_REPLY,
            Self::Fallback => DEFAULT_REPLY,
        }
    }
}

/// Priority order matters: the first rule with any keyword hit wins.
const REPLY_RULES: [(ReplyRule, &[&str]); 4] = [
    (ReplyRule::Refill, &["refill", "lpg"]),
    (ReplyRule::Kisumu, &["kisumu"]),
    (ReplyRule::Hours, &["hour", "open"]),
    (ReplyRule::Price, &["price", "cost"]),
];

#[must_use]
pub fn match_reply_rule(message: &str) -> ReplyRule {
    let lower = message.to_lowercase();
    REPLY_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| lower.contains(keyword)))
        .map_or(ReplyRule::Fallback, |(rule, _)| *rule)
}

#[must_use]
pub fn generate_reply(message: &str) -> &'static str {
    match_reply_rule(message).reply()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Bot => "bot",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub text: String,
    pub sender: Sender,
}

/// Transient transcript rendered into the chat popup. Lost on reload.
#[derive(Debug, Clone)]
pub struct ChatTranscript {
    messages: Vec<ChatMessage>,
    next_local_id: u64,
}

impl Default for ChatTranscript {
    fn default() -> Self {
        Self {
            messages: Vec::new(),
            next_local_id: 1,
        }
    }
}

impl ChatTranscript {
    /// Appends the trimmed text; empty input is ignored.
    pub fn push(&mut self, sender: Sender, text: &str) -> bool {
        let normalized = text.trim();
        if normalized.is_empty() {
            return false;
        }
        let id = format!("local:{}:{}", sender.as_str(), self.next_local_id);
        self.next_local_id = self.next_local_id.saturating_add(1);
        self.messages.push(ChatMessage {
            id,
            text: normalized.to_string(),
            sender,
        });
        true
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChatThreadInfo {
    pub id: &'static str,
    pub customer_name: &'static str,
    pub sentiment_label: &'static str,
}

impl ChatThreadInfo {
    #[must_use]
    pub fn sentiment_class(&self) -> String {
        format!("sentiment-tag {}", self.sentiment_label)
    }
}

pub const CHAT_THREADS: [ChatThreadInfo; 3] = [
    ChatThreadInfo {
        id: "1",
        customer_name: "Mercy K.",
        sentiment_label: "friendly",
    },
    ChatThreadInfo {
        id: "2",
        customer_name: "James M.",
        sentiment_label: "urgent",
    },
    ChatThreadInfo {
        id: "3",
        customer_name: "Lisa P.",
        sentiment_label: "neutral",
    },
];

pub const DEFAULT_CHAT_THREAD_ID: &str = "1";

#[must_use]
pub fn chat_thread(id: &str) -> Option<ChatThreadInfo> {
    CHAT_THREADS.iter().copied().find(|thread| thread.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_priority_is_locked_one_through_five() {
        assert_eq!(match_reply_rule("I need an LPG refill"), ReplyRule::Refill);
        assert_eq!(match_reply_rule("refill price in kisumu?"), ReplyRule::Refill);
        assert_eq!(match_reply_rule("kisumu price"), ReplyRule::Kisumu);
        assert_eq!(match_reply_rule("Kisumu opening hours"), ReplyRule::Kisumu);
        assert_eq!(match_reply_rule("what hours, and the cost?"), ReplyRule::Hours);
        assert_eq!(match_reply_rule("are you OPEN on sunday"), ReplyRule::Hours);
        assert_eq!(match_reply_rule("how much does it cost"), ReplyRule::Price);
        assert_eq!(match_reply_rule("hello there"), ReplyRule::Fallback);
    }

    #[test]
    fn lpg_refill_always_gets_refill_reply() {
        for input in ["LPG refill", "need lpg refill now", "Price of LPG REFILL in Kisumu"] {
            assert_eq!(generate_reply(input), REFILL_REPLY, "input {input}");
        }
    }

    #[test]
    fn transcript_ignores_blank_and_trims() {
        let mut transcript = ChatTranscript::default();
        assert!(!transcript.push(Sender::User, "   \t\n"));
        assert!(transcript.push(Sender::User, "  hi  "));
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.messages()[0].text, "hi");
        assert_eq!(transcript.messages()[0].id, "local:user:1");
    }

    #[test]
    fn thread_fixture_lookup() {
        let thread = chat_thread("2").expect("thread 2 exists");
        assert_eq!(thread.customer_name, "James M.");
        assert_eq!(thread.sentiment_class(), "sentiment-tag urgent");
        assert!(chat_thread("9").is_none());
    }
}
