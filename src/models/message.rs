#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    System,
    User,
    Notice, // blocking, user-facing notice
}

/// One line of the conversation transcript. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationMessage {
    pub text: String,
    pub speaker: Speaker,
}

impl ConversationMessage {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            speaker: Speaker::System,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            speaker: Speaker::User,
        }
    }

    pub fn notice(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            speaker: Speaker::Notice,
        }
    }

    pub fn is_user(&self) -> bool {
        self.speaker == Speaker::User
    }
}
