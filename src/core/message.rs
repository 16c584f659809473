use std::collections::VecDeque;

/// One transcript entry. Entries are immutable once created; the transcript
/// only ever grows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub is_user: bool,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_user: true,
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_user: false,
        }
    }
}

/// Append-only message log. Insertion order is the only ordering and is the
/// order entries render in; there is no API to remove, edit, or reorder.
#[derive(Debug, Default)]
pub struct Transcript {
    entries: VecDeque<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.entries.push_back(Message::user(text));
    }

    pub fn push_assistant(&mut self, text: impl Into<String>) {
        self.entries.push_back(Message::assistant(text));
    }

    pub fn entries(&self) -> impl Iterator<Item = &Message> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&Message> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
