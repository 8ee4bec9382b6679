use crate::surface::EditingSurface;

/// Caret location and word count for the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorStats {
    pub line: usize,
    pub col: usize,
    pub words: usize,
}

impl Default for EditorStats {
    fn default() -> Self {
        Self {
            line: 1,
            col: 1,
            words: 0,
        }
    }
}

impl EditorStats {
    /// `before` is the text preceding the caret, `full` the whole text; both
    /// use `\n` between lines.
    pub fn compute(before: Option<&str>, full: &str) -> Self {
        let (line, col) = match before {
            Some(before) => {
                let mut lines = before.split('\n');
                let last = lines.next_back().unwrap_or("");
                (lines.count() + 1, last.chars().count() + 1)
            }
            None => (1, 1),
        };
        Self {
            line,
            col,
            words: full.split_whitespace().count(),
        }
    }

    pub fn of<S: EditingSurface + ?Sized>(surface: &S) -> Self {
        let before = surface.inner_text_before_selection();
        Self::compute(before.as_deref(), &surface.inner_text())
    }

    pub fn words_label(&self) -> String {
        if self.words == 1 {
            "1 word".to_string()
        } else {
            format!("{} words", self.words)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caret_position_is_one_based() {
        assert_eq!(EditorStats::compute(Some(""), ""), EditorStats::default());
        let stats = EditorStats::compute(Some("ab\ncd\nx"), "ab\ncd\nxyz more");
        assert_eq!((stats.line, stats.col, stats.words), (3, 2, 4));
        assert_eq!(EditorStats::compute(None, "one").words_label(), "1 word");
    }
}
