use crate::store::Store;
use crate::surface::{EditCommand, EditingSurface};

pub const DEFAULT_FONT_FAMILY: &str = "Arial";
pub const DEFAULT_FONT_SIZE: &str = "10";
pub const DEFAULT_FONT_COLOR: &str = "#000000";

/// Point sizes for host font size indexes 1 through 7.
const INDEX_POINT_SIZES: [&str; 7] = ["8", "10", "12", "14", "18", "24", "36"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    pub fn command(self) -> EditCommand {
        match self {
            Alignment::Left => EditCommand::JustifyLeft,
            Alignment::Center => EditCommand::JustifyCenter,
            Alignment::Right => EditCommand::JustifyRight,
        }
    }
}

/// Formatting at the selection as reported by an editing surface.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormatSnapshot {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub bullet_list: bool,
    pub alignment: Alignment,
    pub font_name: String,
    pub font_size_index: String,
    pub font_color: String,
}

impl FormatSnapshot {
    pub fn query<S: EditingSurface + ?Sized>(surface: &S) -> Self {
        let alignment = if surface.query_state("justifyCenter") {
            Alignment::Center
        } else if surface.query_state("justifyRight") {
            Alignment::Right
        } else {
            Alignment::Left
        };

        Self {
            bold: surface.query_state("bold"),
            italic: surface.query_state("italic"),
            underline: surface.query_state("underline"),
            strikethrough: surface.query_state("strikeThrough"),
            bullet_list: surface.query_state("insertUnorderedList"),
            alignment,
            font_name: surface.query_value("fontName"),
            font_size_index: surface.query_value("fontSize"),
            font_color: surface.query_value("foreColor"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatState {
    pub is_bold: bool,
    pub is_italic: bool,
    pub is_underline: bool,
    pub is_strikethrough: bool,
    pub alignment: Alignment,
    pub is_bullet_list: bool,
    pub font_family: String,
    pub font_size: String,
    pub font_color: String,
}

impl Default for FormatState {
    fn default() -> Self {
        Self {
            is_bold: false,
            is_italic: false,
            is_underline: false,
            is_strikethrough: false,
            alignment: Alignment::Left,
            is_bullet_list: false,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: DEFAULT_FONT_SIZE.to_string(),
            font_color: DEFAULT_FONT_COLOR.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatAction {
    Sync(FormatSnapshot),
    SetFontFamily(String),
    SetFontSize(String),
    SetFontColor(String),
}

pub type FormatStore = Store<FormatState, FormatAction>;

pub fn reduce_format(state: &FormatState, action: FormatAction) -> FormatState {
    match action {
        FormatAction::Sync(snapshot) => {
            let font_family = match snapshot.font_name.replace(['\'', '"'], "") {
                name if name.is_empty() => DEFAULT_FONT_FAMILY.to_string(),
                name => name,
            };
            let font_size = font_size_from_index(&snapshot.font_size_index)
                .unwrap_or(DEFAULT_FONT_SIZE)
                .to_string();
            let font_color = if snapshot.font_color.is_empty() {
                DEFAULT_FONT_COLOR.to_string()
            } else {
                snapshot.font_color
            };
            FormatState {
                is_bold: snapshot.bold,
                is_italic: snapshot.italic,
                is_underline: snapshot.underline,
                is_strikethrough: snapshot.strikethrough,
                alignment: snapshot.alignment,
                is_bullet_list: snapshot.bullet_list,
                font_family,
                font_size,
                font_color,
            }
        }
        FormatAction::SetFontFamily(family) => FormatState {
            font_family: family,
            ..state.clone()
        },
        FormatAction::SetFontSize(size) => FormatState {
            font_size: size,
            ..state.clone()
        },
        FormatAction::SetFontColor(color) => FormatState {
            font_color: color,
            ..state.clone()
        },
    }
}

pub fn format_store() -> FormatStore {
    Store::new(FormatState::default(), reduce_format)
}

/// Maps a point size to the host's 1..=7 font size index.
///
/// Only the leading integer is read (`"12pt"` is 12); a size with no leading
/// integer falls through every bound and lands on 7.
pub fn font_size_index(size: &str) -> u8 {
    let Some(points) = leading_integer(size) else {
        return 7;
    };
    match points {
        i64::MIN..=8 => 1,
        9..=10 => 2,
        11..=12 => 3,
        13..=14 => 4,
        15..=18 => 5,
        19..=24 => 6,
        _ => 7,
    }
}

pub fn font_size_from_index(index: &str) -> Option<&'static str> {
    let index: usize = index.trim().parse().ok()?;
    INDEX_POINT_SIZES.get(index.checked_sub(1)?).copied()
}

fn leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}
