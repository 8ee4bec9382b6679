use crate::error::SurfaceError;
use crate::locator::{self, TextContainer, TextMatch, TextPosition};

/// Commands understood by an editing surface, named after the host engine's
/// command identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    Bold,
    Italic,
    Underline,
    StrikeThrough,
    JustifyLeft,
    JustifyCenter,
    JustifyRight,
    InsertUnorderedList,
    FontName(String),
    FontSize(String),
    ForeColor(String),
    InsertText(String),
    Undo,
    Redo,
    Cut,
    Copy,
    Paste,
    Delete,
    SelectAll,
}

impl EditCommand {
    pub fn name(&self) -> &'static str {
        match self {
            EditCommand::Bold => "bold",
            EditCommand::Italic => "italic",
            EditCommand::Underline => "underline",
            EditCommand::StrikeThrough => "strikeThrough",
            EditCommand::JustifyLeft => "justifyLeft",
            EditCommand::JustifyCenter => "justifyCenter",
            EditCommand::JustifyRight => "justifyRight",
            EditCommand::InsertUnorderedList => "insertUnorderedList",
            EditCommand::FontName(_) => "fontName",
            EditCommand::FontSize(_) => "fontSize",
            EditCommand::ForeColor(_) => "foreColor",
            EditCommand::InsertText(_) => "insertText",
            EditCommand::Undo => "undo",
            EditCommand::Redo => "redo",
            EditCommand::Cut => "cut",
            EditCommand::Copy => "copy",
            EditCommand::Paste => "paste",
            EditCommand::Delete => "delete",
            EditCommand::SelectAll => "selectAll",
        }
    }

    pub fn arg(&self) -> Option<&str> {
        match self {
            EditCommand::FontName(value)
            | EditCommand::FontSize(value)
            | EditCommand::ForeColor(value)
            | EditCommand::InsertText(value) => Some(value),
            _ => None,
        }
    }

    /// Command names match case-insensitively, like the host engine's.
    pub fn parse(name: &str, arg: Option<&str>) -> Result<Self, SurfaceError> {
        let with_arg = |make: fn(String) -> EditCommand| {
            arg.map(|value| make(value.to_string()))
                .ok_or_else(|| SurfaceError::MissingArgument(name.to_string()))
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "bold" => EditCommand::Bold,
            "italic" => EditCommand::Italic,
            "underline" => EditCommand::Underline,
            "strikethrough" => EditCommand::StrikeThrough,
            "justifyleft" => EditCommand::JustifyLeft,
            "justifycenter" => EditCommand::JustifyCenter,
            "justifyright" => EditCommand::JustifyRight,
            "insertunorderedlist" => EditCommand::InsertUnorderedList,
            "fontname" => with_arg(EditCommand::FontName)?,
            "fontsize" => with_arg(EditCommand::FontSize)?,
            "forecolor" => with_arg(EditCommand::ForeColor)?,
            "inserttext" => with_arg(EditCommand::InsertText)?,
            "undo" => EditCommand::Undo,
            "redo" => EditCommand::Redo,
            "cut" => EditCommand::Cut,
            "copy" => EditCommand::Copy,
            "paste" => EditCommand::Paste,
            "delete" => EditCommand::Delete,
            "selectall" => EditCommand::SelectAll,
            _ => return Err(SurfaceError::UnknownCommand(name.to_string())),
        };
        Ok(command)
    }

    /// Whether running the command can change document content or formatting.
    pub fn mutates(&self) -> bool {
        !matches!(self, EditCommand::Copy | EditCommand::SelectAll)
    }
}

/// Capability boundary over a rich-text editing engine.
///
/// Everything the application does to the document goes through this trait,
/// so an in-process document model and a browser-hosted editor are
/// interchangeable.
pub trait EditingSurface: TextContainer {
    fn execute(&mut self, command: &str, arg: Option<&str>) -> Result<(), SurfaceError>;

    /// Whether the named command's effect applies at the current selection.
    fn query_state(&self, command: &str) -> bool;

    /// Current string value of the named command, empty when unknown.
    fn query_value(&self, command: &str) -> String;

    fn selection(&self) -> Option<TextPosition<Self::Leaf>>;

    fn select(&mut self, range: &TextPosition<Self::Leaf>) -> Result<(), SurfaceError>;

    /// Replaces the whole document with already-sanitized markup.
    fn load_html(&mut self, html: &str);

    fn clear(&mut self);

    /// Rewrites the text of several leaves as a single edit.
    fn replace_leaf_texts(&mut self, edits: Vec<(Self::Leaf, String)>)
    -> Result<(), SurfaceError>;

    /// Text with a line break between blocks.
    fn inner_text(&self) -> String;

    /// Same as [`EditingSurface::inner_text`], cut at the selection start.
    fn inner_text_before_selection(&self) -> Option<String>;

    fn run(&mut self, command: &EditCommand) -> Result<(), SurfaceError> {
        self.execute(command.name(), command.arg())
    }

    fn selected_text(&self) -> String {
        let Some(range) = self.selection() else {
            return String::new();
        };
        let (Some(start), Some(end)) = (
            locator::linear_offset(self, &range.anchor),
            locator::linear_offset(self, &range.focus),
        ) else {
            return String::new();
        };
        let (start, end) = (start.min(end), start.max(end));
        locator::flatten(self)
            .chars()
            .skip(start)
            .take(end - start)
            .collect()
    }

    /// Linear offset of the selection's end, or 0 without a selection.
    fn selection_end_offset(&self) -> usize {
        let Some(range) = self.selection() else {
            return 0;
        };
        let anchor = locator::linear_offset(self, &range.anchor).unwrap_or(0);
        let focus = locator::linear_offset(self, &range.focus).unwrap_or(0);
        anchor.max(focus)
    }

    fn select_match(&mut self, found: TextMatch) -> Result<bool, SurfaceError> {
        match locator::resolve_range(&*self, found) {
            Some(range) => {
                self.select(&range)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
