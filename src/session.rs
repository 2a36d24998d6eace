use crate::types::{ChatMessage, Role};

/// Order in which the history is shown. Storage order never changes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HistoryOrder {
    #[default]
    Chronological,
    NewestFirst,
}

/// Chat history for one interactive session. Append-only.
#[derive(Debug, Default)]
pub struct Session {
    turns: Vec<ChatMessage>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, content: impl Into<String>) -> &ChatMessage {
        self.push(ChatMessage::user(content))
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) -> &ChatMessage {
        self.push(ChatMessage::assistant(content))
    }

    fn push(&mut self, message: ChatMessage) -> &ChatMessage {
        self.turns.push(message);
        &self.turns[self.turns.len() - 1]
    }

    pub fn turns(&self) -> &[ChatMessage] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last_assistant(&self) -> Option<&ChatMessage> {
        self.turns
            .iter()
            .rev()
            .find(|turn| turn.role == Role::Assistant)
    }

    pub fn display(&self, order: HistoryOrder) -> Box<dyn Iterator<Item = &ChatMessage> + '_> {
        match order {
            HistoryOrder::Chronological => Box::new(self.turns.iter()),
            HistoryOrder::NewestFirst => Box::new(self.turns.iter().rev()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contents<'a>(it: impl Iterator<Item = &'a ChatMessage>) -> Vec<&'a str> {
        it.map(|m| m.content.as_str()).collect()
    }

    #[test]
    fn preserves_insertion_order() {
        let mut session = Session::new();
        session.push_user("fever");
        session.push_assistant("rest");
        session.push_user("cough");

        assert_eq!(session.len(), 3);
        assert_eq!(
            contents(session.display(HistoryOrder::Chronological)),
            vec!["fever", "rest", "cough"]
        );
    }

    #[test]
    fn newest_first_reverses_view_only() {
        let mut session = Session::new();
        session.push_user("a");
        session.push_assistant("b");

        assert_eq!(contents(session.display(HistoryOrder::NewestFirst)), vec!["b", "a"]);
        assert_eq!(contents(session.turns().iter()), vec!["a", "b"]);
    }

    #[test]
    fn appending_keeps_earlier_turns_intact() {
        let mut session = Session::new();
        session.push_user("first");
        let before = session.turns()[0].clone();
        session.push_assistant("second");
        session.push_user("third");
        assert_eq!(session.turns()[0], before);
    }

    #[test]
    fn finds_last_assistant_turn() {
        let mut session = Session::new();
        assert!(session.last_assistant().is_none());
        session.push_user("q1");
        session.push_assistant("r1");
        session.push_user("q2");
        assert_eq!(session.last_assistant().map(|m| m.content.as_str()), Some("r1"));
    }
}
