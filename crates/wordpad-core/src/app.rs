use std::path::PathBuf;
use std::rc::Rc;

use tracing::{debug, info};

use crate::error::SurfaceError;
use crate::find;
use crate::locator::{SearchOptions, SearchQuery, TextPosition};
use crate::prefs::{KeyValueStore, load_view_prefs, persist_view_state};
use crate::sanitize::sanitize_html;
use crate::state::{
    Alignment, DialogAction, DialogKind, DialogStore, DocumentAction, DocumentStore,
    FormatAction, FormatSnapshot, FormatStore, MessageAction, MessageStore, ViewAction,
    ViewStore, dialog_store, document_store, font_size_index, format_store, message_store,
    view_store,
};
use crate::stats::EditorStats;
use crate::store::Subscription;
use crate::surface::{EditCommand, EditingSurface};

/// Top-level controller: owns the editing surface and every state slice.
///
/// Components that need the surface get it from here rather than from any
/// global.
pub struct App<S: EditingSurface> {
    surface: S,
    document: DocumentStore,
    view: ViewStore,
    format: FormatStore,
    dialogs: DialogStore,
    message: MessageStore,
    prefs: Option<Subscription>,
}

impl<S: EditingSurface> App<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            document: document_store(),
            view: view_store(),
            format: format_store(),
            dialogs: dialog_store(),
            message: message_store(),
            prefs: None,
        }
    }

    /// Restores view preferences from `storage` and keeps writing them back.
    pub fn with_storage(surface: S, storage: Rc<dyn KeyValueStore>) -> Self {
        let mut app = Self::new(surface);
        let prefs = load_view_prefs(storage.as_ref());
        app.view.dispatch(ViewAction::Initialize(prefs));
        app.prefs = Some(persist_view_state(&app.view, storage));
        app
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn document(&self) -> &DocumentStore {
        &self.document
    }

    pub fn view(&self) -> &ViewStore {
        &self.view
    }

    pub fn format(&self) -> &FormatStore {
        &self.format
    }

    pub fn dialogs(&self) -> &DialogStore {
        &self.dialogs
    }

    pub fn message(&self) -> &MessageStore {
        &self.message
    }

    pub fn persists_view(&self) -> bool {
        self.prefs.as_ref().is_some_and(Subscription::is_active)
    }

    pub fn find_next(
        &mut self,
        term: &str,
        options: SearchOptions,
    ) -> Result<Option<TextPosition<S::Leaf>>, SurfaceError> {
        if term.is_empty() {
            return Ok(None);
        }
        self.document.dispatch(DocumentAction::UpdateSearch {
            term: term.to_string(),
            options,
        });

        let found = find::find_next(&mut self.surface, term, options)?;
        match &found {
            Some(_) => self.update_format_state(),
            None => self
                .message
                .dispatch(MessageAction::show("Find", format!("Cannot find \"{term}\""))),
        }
        Ok(found)
    }

    pub fn replace_selected(&mut self, replacement: &str) -> Result<bool, SurfaceError> {
        let replaced = find::replace_selected(&mut self.surface, replacement)?;
        if replaced {
            self.on_input();
            self.update_format_state();
        }
        Ok(replaced)
    }

    pub fn replace_all(
        &mut self,
        term: &str,
        replacement: &str,
        options: SearchOptions,
    ) -> Result<usize, SurfaceError> {
        if term.is_empty() {
            return Ok(0);
        }
        let count = find::replace_all(&mut self.surface, term, replacement, options)?;
        if count > 0 {
            self.on_input();
            self.update_format_state();
        }
        Ok(count)
    }

    /// Last executed search, for pre-filling a reopened Find or Replace dialog.
    pub fn find_dialog_seed(&self) -> Option<SearchQuery> {
        let state = self.document.get_state();
        if state.last_search_term.is_empty() {
            return None;
        }
        Some(SearchQuery::new(state.last_search_term.clone()).options(state.last_search_options))
    }

    pub fn open_dialog(&self, kind: DialogKind) {
        self.dialogs.dispatch(DialogAction::Open(kind));
    }

    pub fn close_dialog(&self, kind: DialogKind) {
        self.dialogs.dispatch(DialogAction::Close(kind));
    }

    pub fn close_message(&self) {
        self.message.dispatch(MessageAction::Close);
    }

    pub fn update_format_state(&self) {
        let snapshot = FormatSnapshot::query(&self.surface);
        self.format.dispatch(FormatAction::Sync(snapshot));
    }

    /// Runs a command on the surface, marking the document modified for
    /// anything but copy and select-all.
    pub fn edit(&mut self, command: EditCommand) -> Result<(), SurfaceError> {
        self.surface.run(&command)?;
        if command.mutates() {
            self.on_input();
        }
        self.update_format_state();
        Ok(())
    }

    pub fn toggle_bold(&mut self) -> Result<(), SurfaceError> {
        self.edit(EditCommand::Bold)
    }

    pub fn toggle_italic(&mut self) -> Result<(), SurfaceError> {
        self.edit(EditCommand::Italic)
    }

    pub fn toggle_underline(&mut self) -> Result<(), SurfaceError> {
        self.edit(EditCommand::Underline)
    }

    pub fn toggle_strikethrough(&mut self) -> Result<(), SurfaceError> {
        self.edit(EditCommand::StrikeThrough)
    }

    pub fn set_alignment(&mut self, alignment: Alignment) -> Result<(), SurfaceError> {
        self.edit(alignment.command())
    }

    pub fn toggle_bullets(&mut self) -> Result<(), SurfaceError> {
        self.edit(EditCommand::InsertUnorderedList)
    }

    pub fn set_font_family(&mut self, family: &str) -> Result<(), SurfaceError> {
        self.edit(EditCommand::FontName(family.to_string()))?;
        self.format
            .dispatch(FormatAction::SetFontFamily(family.to_string()));
        Ok(())
    }

    /// `size` is in points; the surface receives the matching 1..=7 index.
    pub fn set_font_size(&mut self, size: &str) -> Result<(), SurfaceError> {
        let index = font_size_index(size);
        self.edit(EditCommand::FontSize(index.to_string()))?;
        self.format
            .dispatch(FormatAction::SetFontSize(size.to_string()));
        Ok(())
    }

    pub fn set_font_color(&mut self, color: &str) -> Result<(), SurfaceError> {
        self.edit(EditCommand::ForeColor(color.to_string()))?;
        self.format
            .dispatch(FormatAction::SetFontColor(color.to_string()));
        Ok(())
    }

    pub fn undo(&mut self) -> Result<(), SurfaceError> {
        self.edit(EditCommand::Undo)
    }

    pub fn redo(&mut self) -> Result<(), SurfaceError> {
        self.edit(EditCommand::Redo)
    }

    pub fn cut(&mut self) -> Result<(), SurfaceError> {
        self.edit(EditCommand::Cut)
    }

    pub fn copy(&mut self) -> Result<(), SurfaceError> {
        self.edit(EditCommand::Copy)
    }

    pub fn paste(&mut self) -> Result<(), SurfaceError> {
        self.edit(EditCommand::Paste)
    }

    pub fn delete(&mut self) -> Result<(), SurfaceError> {
        self.edit(EditCommand::Delete)
    }

    pub fn select_all(&mut self) -> Result<(), SurfaceError> {
        self.edit(EditCommand::SelectAll)
    }

    pub fn insert_text(&mut self, text: &str) -> Result<(), SurfaceError> {
        self.edit(EditCommand::InsertText(text.to_string()))
    }

    /// Inserts one of the strings produced by [`crate::date_time_formats`].
    pub fn insert_date_time(&mut self, formatted: &str) -> Result<(), SurfaceError> {
        if formatted.is_empty() {
            return Ok(());
        }
        self.insert_text(formatted)
    }

    /// Called for every user edit made directly in the surface.
    pub fn on_input(&self) {
        if !self.document.get_state().is_modified {
            debug!("document marked modified");
        }
        self.document.dispatch(DocumentAction::MarkModified);
    }

    pub fn stats(&self) -> EditorStats {
        EditorStats::of(&self.surface)
    }

    pub fn window_title(&self) -> String {
        self.document.get_state().window_title()
    }

    pub fn new_document(&mut self) {
        self.surface.clear();
        self.document.dispatch(DocumentAction::Clear);
        self.update_format_state();
    }

    /// Loads untrusted markup read from `path`.
    pub fn open_document(&mut self, html: &str, path: impl Into<PathBuf>) {
        let path = path.into();
        let content = sanitize_html(html);
        self.surface.load_html(&content);
        info!(path = %path.display(), bytes = content.len(), "opened document");
        self.document.dispatch(DocumentAction::SetContent {
            content,
            file_path: Some(path),
        });
        self.update_format_state();
    }

    pub fn mark_saved(&self, path: Option<PathBuf>) {
        if let Some(path) = path {
            self.document.dispatch(DocumentAction::SetFilePath(path));
        }
        self.document.dispatch(DocumentAction::MarkSaved);
    }
}
