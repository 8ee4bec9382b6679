use std::str::FromStr;

use crate::store::Store;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogKind {
    Find,
    Replace,
    Font,
    Paragraph,
    Tabs,
    DateTime,
    Color,
    PageSetup,
    Options,
    About,
}

impl DialogKind {
    pub const ALL: [DialogKind; 10] = [
        DialogKind::Find,
        DialogKind::Replace,
        DialogKind::Font,
        DialogKind::Paragraph,
        DialogKind::Tabs,
        DialogKind::DateTime,
        DialogKind::Color,
        DialogKind::PageSetup,
        DialogKind::Options,
        DialogKind::About,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DialogKind::Find => "find",
            DialogKind::Replace => "replace",
            DialogKind::Font => "font",
            DialogKind::Paragraph => "paragraph",
            DialogKind::Tabs => "tabs",
            DialogKind::DateTime => "dateTime",
            DialogKind::Color => "color",
            DialogKind::PageSetup => "pageSetup",
            DialogKind::Options => "options",
            DialogKind::About => "about",
        }
    }
}

impl FromStr for DialogKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DialogKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or(())
    }
}

/// Visibility of every dialog; at most one is opened at a time through `Open`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DialogState {
    open: [bool; 10],
}

impl DialogState {
    pub fn is_open(&self, kind: DialogKind) -> bool {
        self.open[kind as usize]
    }

    pub fn open_dialogs(&self) -> Vec<DialogKind> {
        DialogKind::ALL
            .into_iter()
            .filter(|&kind| self.is_open(kind))
            .collect()
    }

    fn with(mut self, kind: DialogKind, open: bool) -> Self {
        self.open[kind as usize] = open;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAction {
    Open(DialogKind),
    Close(DialogKind),
    CloseAll,
}

impl DialogAction {
    /// Builds an action from a shell command such as `("open", "pageSetup")`.
    /// Unknown verbs or dialog names produce no action.
    pub fn from_command(verb: &str, name: Option<&str>) -> Option<Self> {
        match (verb, name) {
            ("open", Some(name)) => name.parse().ok().map(DialogAction::Open),
            ("close", Some(name)) => name.parse().ok().map(DialogAction::Close),
            ("closeAll", _) => Some(DialogAction::CloseAll),
            _ => None,
        }
    }
}

pub type DialogStore = Store<DialogState, DialogAction>;

pub fn reduce_dialogs(state: &DialogState, action: DialogAction) -> DialogState {
    match action {
        DialogAction::Open(kind) => DialogState::default().with(kind, true),
        DialogAction::Close(kind) => state.with(kind, false),
        DialogAction::CloseAll => DialogState::default(),
    }
}

pub fn dialog_store() -> DialogStore {
    Store::new(DialogState::default(), reduce_dialogs)
}
