use std::path::PathBuf;

use crate::locator::SearchOptions;
use crate::store::Store;

/// State of the open document as seen by the application shell.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocumentState {
    pub content: String,
    pub file_path: Option<PathBuf>,
    pub is_modified: bool,
    pub last_search_term: String,
    pub last_search_options: SearchOptions,
}

const APP_NAME: &str = "WordPad";
const UNTITLED: &str = "Document";

impl DocumentState {
    /// Last path component, split on either separator; `Document` when unsaved.
    pub fn file_name(&self) -> String {
        self.file_path
            .as_ref()
            .and_then(|path| {
                path.to_string_lossy()
                    .rsplit(['/', '\\'])
                    .next()
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| UNTITLED.to_string())
    }

    pub fn window_title(&self) -> String {
        let modified = if self.is_modified { " *" } else { "" };
        format!("{}{modified} - {APP_NAME}", self.file_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentAction {
    MarkModified,
    MarkSaved,
    Clear,
    /// Loaded content; `file_path: None` keeps the current path.
    SetContent {
        content: String,
        file_path: Option<PathBuf>,
    },
    SetFilePath(PathBuf),
    UpdateSearch {
        term: String,
        options: SearchOptions,
    },
}

pub type DocumentStore = Store<DocumentState, DocumentAction>;

pub fn reduce_document(state: &DocumentState, action: DocumentAction) -> DocumentState {
    match action {
        DocumentAction::MarkModified => DocumentState {
            is_modified: true,
            ..state.clone()
        },
        DocumentAction::MarkSaved => DocumentState {
            is_modified: false,
            ..state.clone()
        },
        DocumentAction::Clear => DocumentState {
            content: String::new(),
            file_path: None,
            is_modified: false,
            ..state.clone()
        },
        DocumentAction::SetContent { content, file_path } => DocumentState {
            content,
            file_path: file_path.or_else(|| state.file_path.clone()),
            is_modified: false,
            ..state.clone()
        },
        DocumentAction::SetFilePath(path) => DocumentState {
            file_path: Some(path),
            ..state.clone()
        },
        DocumentAction::UpdateSearch { term, options } => DocumentState {
            last_search_term: term,
            last_search_options: options,
            ..state.clone()
        },
    }
}

pub fn document_store() -> DocumentStore {
    Store::new(DocumentState::default(), reduce_document)
}
