use std::collections::BTreeMap;
use std::ops::Range;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SurfaceError;
use crate::locator::{self, TextContainer, TextLeaf, TextMatch, TextPosition};
use crate::sanitize::html_to_paragraphs;
use crate::surface::{EditCommand, EditingSurface};

pub type Attrs = BTreeMap<String, serde_json::Value>;
pub type ElementKind = String;
pub type Path = Vec<usize>;

pub const PARAGRAPH: &str = "paragraph";
pub const LIST_ITEM: &str = "list_item";
pub const ALIGN_ATTR: &str = "align";

const DEFAULT_MAX_UNDO: usize = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum Node {
    Element(ElementNode),
    Text(TextNode),
    Void(VoidNode),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(TextNode {
            text: text.into(),
            marks: Marks::default(),
        })
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::block(PARAGRAPH, text)
    }

    pub fn list_item(text: impl Into<String>) -> Self {
        Self::block(LIST_ITEM, text)
    }

    pub fn divider() -> Self {
        Node::Void(VoidNode {
            kind: "divider".to_string(),
            attrs: Attrs::default(),
        })
    }

    fn block(kind: &str, text: impl Into<String>) -> Self {
        Node::Element(ElementNode {
            kind: kind.to_string(),
            attrs: Attrs::default(),
            children: vec![Node::text(text)],
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementNode {
    pub kind: ElementKind,
    #[serde(default)]
    pub attrs: Attrs,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl ElementNode {
    pub fn align(&self) -> Option<&str> {
        self.attrs.get(ALIGN_ATTR).and_then(|v| v.as_str())
    }
}

/// Non-text content such as a divider; contributes nothing to linear text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoidNode {
    pub kind: ElementKind,
    #[serde(default)]
    pub attrs: Attrs,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextNode {
    pub text: String,
    #[serde(default)]
    pub marks: Marks,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Marks {
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub underline: bool,
    #[serde(default)]
    pub strikethrough: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// Host font size index, `"1"` to `"7"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Default for Document {
    fn default() -> Self {
        Self::empty()
    }
}

impl Document {
    pub fn empty() -> Self {
        Self {
            children: vec![Node::paragraph("")],
        }
    }

    pub fn from_paragraphs<I, S>(paragraphs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let children: Vec<Node> = paragraphs.into_iter().map(Node::paragraph).collect();
        if children.is_empty() {
            return Self::empty();
        }
        Self { children }
    }

    pub fn node(&self, path: &[usize]) -> Option<&Node> {
        let (&first, rest) = path.split_first()?;
        let mut node = self.children.get(first)?;
        for &ix in rest {
            node = match node {
                Node::Element(el) => el.children.get(ix)?,
                Node::Void(_) | Node::Text(_) => return None,
            };
        }
        Some(node)
    }

    pub fn plain_text(&self) -> String {
        locator::flatten(self)
    }

    /// Text of each top-level block.
    pub fn block_texts(&self) -> Vec<String> {
        let mut blocks = vec![String::new(); self.children.len()];
        for leaf in self.text_leaves() {
            if let Some(block) = leaf.id.first().and_then(|&ix| blocks.get_mut(ix)) {
                block.push_str(leaf.text);
            }
        }
        blocks
    }

    pub fn char_len(&self) -> usize {
        self.text_leaves().iter().map(TextLeaf::char_len).sum()
    }
}

impl TextContainer for Document {
    type Leaf = Path;

    fn text_leaves(&self) -> Vec<TextLeaf<'_, Path>> {
        let mut leaves = Vec::new();
        let mut path = Vec::new();
        collect_leaves(&self.children, &mut path, &mut leaves);
        leaves
    }
}

fn collect_leaves<'a>(children: &'a [Node], path: &mut Path, out: &mut Vec<TextLeaf<'a, Path>>) {
    for (ix, node) in children.iter().enumerate() {
        path.push(ix);
        match node {
            Node::Text(t) => out.push(TextLeaf::new(path.clone(), t.text.as_str())),
            Node::Element(el) => collect_leaves(&el.children, path, out),
            Node::Void(_) => {}
        }
        path.pop();
    }
}

#[derive(Debug, Default)]
pub struct EditorConfig {
    pub max_undo: usize,
}

impl EditorConfig {
    fn with_defaults(mut self) -> Self {
        if self.max_undo == 0 {
            self.max_undo = DEFAULT_MAX_UNDO;
        }
        self
    }
}

#[derive(Debug, Clone)]
struct Snapshot {
    doc: Document,
    selection: Option<Range<usize>>,
}

/// In-process editing surface over a [`Document`].
///
/// The selection is kept as a linear char range and resolved to leaf points
/// on demand, so it survives the leaf splits and merges that formatting
/// causes.
#[derive(Debug)]
pub struct DocumentSurface {
    doc: Document,
    selection: Option<Range<usize>>,
    clipboard: String,
    config: EditorConfig,
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
}

impl Default for DocumentSurface {
    fn default() -> Self {
        Self::new(Document::empty())
    }
}

impl DocumentSurface {
    pub fn new(doc: Document) -> Self {
        Self::with_config(doc, EditorConfig::default())
    }

    pub fn with_config(mut doc: Document, config: EditorConfig) -> Self {
        normalize(&mut doc);
        Self {
            doc,
            selection: Some(0..0),
            clipboard: String::new(),
            config: config.with_defaults(),
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    pub fn from_paragraphs<I, S>(paragraphs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Document::from_paragraphs(paragraphs))
    }

    pub fn doc(&self) -> &Document {
        &self.doc
    }

    pub fn selection_range(&self) -> Option<Range<usize>> {
        self.selection.clone()
    }

    pub fn set_selection_range(&mut self, range: Range<usize>) {
        let len = self.doc.char_len();
        let start = range.start.min(range.end).min(len);
        let end = range.start.max(range.end).min(len);
        self.selection = Some(start..end);
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn clipboard(&self) -> &str {
        &self.clipboard
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            doc: self.doc.clone(),
            selection: self.selection.clone(),
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.doc = snapshot.doc;
        self.selection = snapshot.selection;
    }

    fn undo(&mut self) -> bool {
        let Some(snapshot) = self.undo_stack.pop() else {
            return false;
        };
        self.redo_stack.push(self.snapshot());
        self.restore(snapshot);
        true
    }

    fn redo(&mut self) -> bool {
        let Some(snapshot) = self.redo_stack.pop() else {
            return false;
        };
        self.undo_stack.push(self.snapshot());
        self.restore(snapshot);
        true
    }

    fn record(&mut self, before: Snapshot) {
        if before.doc == self.doc {
            return;
        }
        self.undo_stack.push(before);
        self.redo_stack.clear();
        if self.undo_stack.len() > self.config.max_undo {
            self.undo_stack.remove(0);
        }
    }

    fn finish_edit(&mut self, before: Snapshot) {
        normalize(&mut self.doc);
        if let Some(range) = self.selection.clone() {
            self.set_selection_range(range);
        }
        self.record(before);
    }

    fn selected_plain_text(&self) -> String {
        let Some(range) = &self.selection else {
            return String::new();
        };
        self.doc
            .plain_text()
            .chars()
            .skip(range.start)
            .take(range.len())
            .collect()
    }

    fn apply(&mut self, command: EditCommand) {
        match &command {
            EditCommand::Undo => {
                self.undo();
                return;
            }
            EditCommand::Redo => {
                self.redo();
                return;
            }
            EditCommand::Copy => {
                self.clipboard = self.selected_plain_text();
                return;
            }
            EditCommand::SelectAll => {
                self.selection = Some(0..self.doc.char_len());
                return;
            }
            _ => {}
        }

        let Some(range) = self.selection.clone() else {
            return;
        };
        let before = self.snapshot();

        match command {
            EditCommand::Bold => self.toggle_mark(range, |m| m.bold, |m, v| m.bold = v),
            EditCommand::Italic => self.toggle_mark(range, |m| m.italic, |m, v| m.italic = v),
            EditCommand::Underline => {
                self.toggle_mark(range, |m| m.underline, |m, v| m.underline = v)
            }
            EditCommand::StrikeThrough => {
                self.toggle_mark(range, |m| m.strikethrough, |m, v| m.strikethrough = v)
            }
            EditCommand::JustifyLeft => self.set_alignment(range, None),
            EditCommand::JustifyCenter => self.set_alignment(range, Some("center")),
            EditCommand::JustifyRight => self.set_alignment(range, Some("right")),
            EditCommand::InsertUnorderedList => self.toggle_list(range),
            EditCommand::FontName(family) => apply_marks(&mut self.doc, range, |m| {
                m.font_family = Some(family.clone());
            }),
            EditCommand::FontSize(size) => apply_marks(&mut self.doc, range, |m| {
                m.font_size = Some(size.clone());
            }),
            EditCommand::ForeColor(color) => apply_marks(&mut self.doc, range, |m| {
                m.color = Some(color.clone());
            }),
            EditCommand::InsertText(text) => self.replace_selection(range, &text),
            EditCommand::Cut => {
                self.clipboard = self.selected_plain_text();
                self.replace_selection(range, "");
            }
            EditCommand::Paste => {
                let text = self.clipboard.clone();
                self.replace_selection(range, &text);
            }
            EditCommand::Delete => {
                if !range.is_empty() {
                    self.replace_selection(range, "");
                } else if range.start > 0 {
                    self.replace_selection(range.start - 1..range.start, "");
                }
            }
            EditCommand::Undo | EditCommand::Redo | EditCommand::Copy | EditCommand::SelectAll => {}
        }

        self.finish_edit(before);
    }

    fn toggle_mark(
        &mut self,
        range: Range<usize>,
        get: impl Fn(&Marks) -> bool,
        set: impl Fn(&mut Marks, bool),
    ) {
        if range.is_empty() {
            return;
        }
        let value = !all_marked(&self.doc, &range, get);
        apply_marks(&mut self.doc, range, |m| set(m, value));
    }

    fn set_alignment(&mut self, range: Range<usize>, align: Option<&str>) {
        for ix in blocks_in(&self.doc, &range) {
            let Some(Node::Element(el)) = self.doc.children.get_mut(ix) else {
                continue;
            };
            match align {
                Some(value) => {
                    el.attrs
                        .insert(ALIGN_ATTR.to_string(), serde_json::Value::from(value));
                }
                None => {
                    el.attrs.remove(ALIGN_ATTR);
                }
            }
        }
    }

    fn toggle_list(&mut self, range: Range<usize>) {
        let blocks = blocks_in(&self.doc, &range);
        let all_listed = !blocks.is_empty()
            && blocks.iter().all(|&ix| {
                matches!(self.doc.children.get(ix), Some(Node::Element(el)) if el.kind == LIST_ITEM)
            });
        let kind = if all_listed { PARAGRAPH } else { LIST_ITEM };
        for ix in blocks {
            if let Some(Node::Element(el)) = self.doc.children.get_mut(ix) {
                el.kind = kind.to_string();
            }
        }
    }

    fn replace_selection(&mut self, range: Range<usize>, text: &str) {
        delete_range(&mut self.doc, range.clone());
        if !text.is_empty() {
            insert_text(&mut self.doc, range.start, text);
        }
        let caret = range.start + text.chars().count();
        self.selection = Some(caret..caret);
    }

    fn current_leaf(&self) -> Option<Path> {
        let range = self.selection.as_ref()?;
        if range.is_empty() {
            return locator::resolve_offset(&self.doc, range.start).map(|point| point.leaf);
        }
        let found = TextMatch {
            start: range.start,
            len: range.len(),
        };
        locator::resolve_range(&self.doc, found).map(|position| position.anchor.leaf)
    }

    fn current_marks(&self) -> Option<&Marks> {
        let path = self.current_leaf()?;
        match self.doc.node(&path)? {
            Node::Text(t) => Some(&t.marks),
            _ => None,
        }
    }

    fn current_block(&self) -> Option<&ElementNode> {
        let path = self.current_leaf()?;
        match self.doc.children.get(*path.first()?)? {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }
}

impl TextContainer for DocumentSurface {
    type Leaf = Path;

    fn text_leaves(&self) -> Vec<TextLeaf<'_, Path>> {
        self.doc.text_leaves()
    }
}

impl EditingSurface for DocumentSurface {
    fn execute(&mut self, command: &str, arg: Option<&str>) -> Result<(), SurfaceError> {
        let command = EditCommand::parse(command, arg)?;
        debug!(command = command.name(), "executing edit command");
        self.apply(command);
        Ok(())
    }

    fn query_state(&self, command: &str) -> bool {
        let marks = self.current_marks();
        let block = self.current_block();
        match command.to_ascii_lowercase().as_str() {
            "bold" => marks.is_some_and(|m| m.bold),
            "italic" => marks.is_some_and(|m| m.italic),
            "underline" => marks.is_some_and(|m| m.underline),
            "strikethrough" => marks.is_some_and(|m| m.strikethrough),
            "justifyleft" => block.is_some_and(|b| matches!(b.align(), None | Some("left"))),
            "justifycenter" => block.is_some_and(|b| b.align() == Some("center")),
            "justifyright" => block.is_some_and(|b| b.align() == Some("right")),
            "insertunorderedlist" => block.is_some_and(|b| b.kind == LIST_ITEM),
            _ => false,
        }
    }

    fn query_value(&self, command: &str) -> String {
        let Some(marks) = self.current_marks() else {
            return String::new();
        };
        let value = match command.to_ascii_lowercase().as_str() {
            "fontname" => marks.font_family.as_ref(),
            "fontsize" => marks.font_size.as_ref(),
            "forecolor" => marks.color.as_ref(),
            _ => None,
        };
        value.cloned().unwrap_or_default()
    }

    fn selection(&self) -> Option<TextPosition<Path>> {
        let range = self.selection.as_ref()?;
        if range.is_empty() {
            let point = locator::resolve_offset(&self.doc, range.start)?;
            return Some(TextPosition::collapsed(point));
        }
        locator::resolve_range(
            &self.doc,
            TextMatch {
                start: range.start,
                len: range.len(),
            },
        )
    }

    fn select(&mut self, range: &TextPosition<Path>) -> Result<(), SurfaceError> {
        let invalid = |path: &Path, offset: usize| {
            SurfaceError::InvalidPosition(format!("{path:?}@{offset}"))
        };
        let anchor = locator::linear_offset(&self.doc, &range.anchor)
            .ok_or_else(|| invalid(&range.anchor.leaf, range.anchor.offset))?;
        let focus = locator::linear_offset(&self.doc, &range.focus)
            .ok_or_else(|| invalid(&range.focus.leaf, range.focus.offset))?;
        self.set_selection_range(anchor..focus);
        Ok(())
    }

    fn load_html(&mut self, html: &str) {
        let mut doc = Document::from_paragraphs(html_to_paragraphs(html));
        normalize(&mut doc);
        debug!(blocks = doc.children.len(), "loaded document content");
        self.doc = doc;
        self.selection = Some(0..0);
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    fn clear(&mut self) {
        self.doc = Document::empty();
        self.selection = Some(0..0);
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    fn replace_leaf_texts(&mut self, edits: Vec<(Path, String)>) -> Result<(), SurfaceError> {
        if let Some((path, _)) = edits
            .iter()
            .find(|(path, _)| !matches!(self.doc.node(path), Some(Node::Text(_))))
        {
            return Err(SurfaceError::InvalidPosition(format!("{path:?}")));
        }

        let before = self.snapshot();
        for (path, text) in edits {
            if let Some(node) = text_mut(&mut self.doc, &path) {
                node.text = text;
            }
        }
        self.finish_edit(before);
        Ok(())
    }

    fn inner_text(&self) -> String {
        self.doc.block_texts().join("\n")
    }

    fn inner_text_before_selection(&self) -> Option<String> {
        let start = self.selection.as_ref()?.start;
        let mut out = String::new();
        let mut cursor = 0usize;
        let mut prev_block: Option<usize> = None;

        for leaf in self.doc.text_leaves() {
            if prev_block.is_some() && cursor >= start {
                break;
            }
            let block = leaf.id.first().copied();
            if prev_block.is_some() && block != prev_block {
                out.push('\n');
            }
            let len = leaf.char_len();
            out.extend(leaf.text.chars().take(start.saturating_sub(cursor).min(len)));
            cursor += len;
            prev_block = block;
        }
        Some(out)
    }
}

#[derive(Debug)]
struct LeafSpan {
    path: Path,
    start: usize,
    len: usize,
}

impl LeafSpan {
    fn end(&self) -> usize {
        self.start + self.len
    }
}

fn leaf_spans(doc: &Document) -> Vec<LeafSpan> {
    let mut cursor = 0usize;
    doc.text_leaves()
        .into_iter()
        .map(|leaf| {
            let len = leaf.char_len();
            let span = LeafSpan {
                path: leaf.id,
                start: cursor,
                len,
            };
            cursor += len;
            span
        })
        .collect()
}

fn byte_index(text: &str, char_ix: usize) -> usize {
    text.char_indices()
        .nth(char_ix)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}

fn node_mut<'a>(children: &'a mut [Node], path: &[usize]) -> Option<&'a mut Node> {
    let (&first, rest) = path.split_first()?;
    let node = children.get_mut(first)?;
    if rest.is_empty() {
        return Some(node);
    }
    match node {
        Node::Element(el) => node_mut(&mut el.children, rest),
        Node::Void(_) | Node::Text(_) => None,
    }
}

fn children_mut<'a>(doc: &'a mut Document, parent: &[usize]) -> Option<&'a mut Vec<Node>> {
    if parent.is_empty() {
        return Some(&mut doc.children);
    }
    match node_mut(&mut doc.children, parent)? {
        Node::Element(el) => Some(&mut el.children),
        Node::Void(_) | Node::Text(_) => None,
    }
}

fn text_mut<'a>(doc: &'a mut Document, path: &[usize]) -> Option<&'a mut TextNode> {
    match node_mut(&mut doc.children, path)? {
        Node::Text(t) => Some(t),
        _ => None,
    }
}

fn delete_range(doc: &mut Document, range: Range<usize>) {
    for span in leaf_spans(doc) {
        let from = range.start.max(span.start);
        let to = range.end.min(span.end());
        if from >= to {
            continue;
        }
        if let Some(node) = text_mut(doc, &span.path) {
            let a = byte_index(&node.text, from - span.start);
            let b = byte_index(&node.text, to - span.start);
            node.text.replace_range(a..b, "");
        }
    }
}

fn insert_text(doc: &mut Document, offset: usize, text: &str) {
    let spans = leaf_spans(doc);
    let target = spans
        .iter()
        .find(|span| span.start <= offset && offset <= span.end())
        .or(spans.last());
    let Some(span) = target else {
        doc.children.push(Node::paragraph(text));
        return;
    };
    let local = offset.saturating_sub(span.start).min(span.len);
    if let Some(node) = text_mut(doc, &span.path) {
        let at = byte_index(&node.text, local);
        node.text.insert_str(at, text);
    }
}

/// Splits the leaf strictly containing `offset` into two leaves with equal marks.
fn split_at(doc: &mut Document, offset: usize) {
    let spans = leaf_spans(doc);
    let Some(span) = spans
        .iter()
        .find(|span| span.start < offset && offset < span.end())
    else {
        return;
    };
    let Some((&ix, parent)) = span.path.split_last() else {
        return;
    };
    let Some(children) = children_mut(doc, parent) else {
        return;
    };
    let Some(Node::Text(left)) = children.get_mut(ix) else {
        return;
    };
    let at = byte_index(&left.text, offset - span.start);
    let right = TextNode {
        text: left.text.split_off(at),
        marks: left.marks.clone(),
    };
    children.insert(ix + 1, Node::Text(right));
}

fn apply_marks(doc: &mut Document, range: Range<usize>, apply: impl Fn(&mut Marks)) {
    if range.is_empty() {
        return;
    }
    split_at(doc, range.start);
    split_at(doc, range.end);
    for span in leaf_spans(doc) {
        if span.len == 0 || span.start < range.start || span.end() > range.end {
            continue;
        }
        if let Some(node) = text_mut(doc, &span.path) {
            apply(&mut node.marks);
        }
    }
}

fn all_marked(doc: &Document, range: &Range<usize>, get: impl Fn(&Marks) -> bool) -> bool {
    let mut any = false;
    for span in leaf_spans(doc) {
        if span.len == 0 || span.end() <= range.start || span.start >= range.end {
            continue;
        }
        let Some(Node::Text(node)) = doc.node(&span.path) else {
            continue;
        };
        if !get(&node.marks) {
            return false;
        }
        any = true;
    }
    any
}

/// Top-level block indices touched by `range`; a caret touches its own block.
fn blocks_in(doc: &Document, range: &Range<usize>) -> Vec<usize> {
    if range.is_empty() {
        return locator::resolve_offset(doc, range.start)
            .and_then(|point| point.leaf.first().copied())
            .into_iter()
            .collect();
    }
    let mut blocks: Vec<usize> = leaf_spans(doc)
        .into_iter()
        .filter(|span| span.len > 0 && span.start < range.end && span.end() > range.start)
        .filter_map(|span| span.path.first().copied())
        .collect();
    blocks.dedup();
    blocks
}

fn normalize(doc: &mut Document) {
    for node in doc.children.iter_mut() {
        if let Node::Element(el) = node {
            normalize_element(el);
        }
    }
    if doc.children.is_empty() {
        doc.children.push(Node::paragraph(""));
    }
}

fn normalize_element(el: &mut ElementNode) {
    for node in el.children.iter_mut() {
        if let Node::Element(child) = node {
            normalize_element(child);
        }
    }

    if el.children.len() > 1 {
        el.children
            .retain(|node| !matches!(node, Node::Text(t) if t.text.is_empty()));
    }

    let mut merged: Vec<Node> = Vec::with_capacity(el.children.len());
    for node in el.children.drain(..) {
        if let (Some(Node::Text(prev)), Node::Text(next)) = (merged.last_mut(), &node) {
            if prev.marks == next.marks {
                prev.text.push_str(&next.text);
                continue;
            }
        }
        merged.push(node);
    }
    el.children = merged;

    if el.children.is_empty() {
        el.children.push(Node::text(""));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_index_counts_chars() {
        assert_eq!(byte_index("héllo", 2), 3);
        assert_eq!(byte_index("abc", 3), 3);
        assert_eq!(byte_index("abc", 10), 3);
    }

    #[test]
    fn normalize_merges_equal_marks_and_keeps_one_leaf() {
        let mut doc = Document {
            children: vec![Node::Element(ElementNode {
                kind: PARAGRAPH.to_string(),
                attrs: Attrs::default(),
                children: vec![Node::text("ab"), Node::text(""), Node::text("cd")],
            })],
        };
        normalize(&mut doc);
        assert_eq!(doc.children, vec![Node::paragraph("abcd")]);

        let mut doc = Document {
            children: vec![Node::Element(ElementNode {
                kind: PARAGRAPH.to_string(),
                attrs: Attrs::default(),
                children: vec![Node::text(""), Node::text("")],
            })],
        };
        normalize(&mut doc);
        assert_eq!(doc.children, vec![Node::paragraph("")]);
    }

    #[test]
    fn split_at_boundary_is_noop() {
        let mut doc = Document::from_paragraphs(["abc"]);
        split_at(&mut doc, 0);
        split_at(&mut doc, 3);
        assert_eq!(doc.text_leaves().len(), 1);
        split_at(&mut doc, 1);
        let texts: Vec<_> = doc.text_leaves().iter().map(|l| l.text.to_string()).collect();
        assert_eq!(texts, vec!["a", "bc"]);
    }
}
