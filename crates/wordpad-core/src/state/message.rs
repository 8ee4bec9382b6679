use crate::store::Store;

/// Transient informational message box.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessageState {
    pub visible: bool,
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageAction {
    Show { title: String, message: String },
    Close,
}

impl MessageAction {
    pub fn show(title: impl Into<String>, message: impl Into<String>) -> Self {
        MessageAction::Show {
            title: title.into(),
            message: message.into(),
        }
    }
}

pub type MessageStore = Store<MessageState, MessageAction>;

pub fn reduce_message(_state: &MessageState, action: MessageAction) -> MessageState {
    match action {
        MessageAction::Show { title, message } => MessageState {
            visible: true,
            title,
            message,
        },
        MessageAction::Close => MessageState::default(),
    }
}

pub fn message_store() -> MessageStore {
    Store::new(MessageState::default(), reduce_message)
}
