use std::fmt::Debug;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A container of text-bearing leaves, enumerated in document order.
///
/// Offsets throughout this module count `char`s: a leaf's length is
/// `text.chars().count()` and a linear offset indexes the concatenation of all
/// leaf texts.
pub trait TextContainer {
    type Leaf: Clone + PartialEq + Debug;

    fn text_leaves(&self) -> Vec<TextLeaf<'_, Self::Leaf>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLeaf<'a, L> {
    pub id: L,
    pub text: &'a str,
}

impl<'a, L> TextLeaf<'a, L> {
    pub fn new(id: L, text: &'a str) -> Self {
        Self { id, text }
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

impl<S: AsRef<str>> TextContainer for [S] {
    type Leaf = usize;

    fn text_leaves(&self) -> Vec<TextLeaf<'_, usize>> {
        self.iter()
            .enumerate()
            .map(|(ix, text)| TextLeaf::new(ix, text.as_ref()))
            .collect()
    }
}

impl<S: AsRef<str>> TextContainer for Vec<S> {
    type Leaf = usize;

    fn text_leaves(&self) -> Vec<TextLeaf<'_, usize>> {
        self.as_slice().text_leaves()
    }
}

impl<S: AsRef<str>, const N: usize> TextContainer for [S; N] {
    type Leaf = usize;

    fn text_leaves(&self) -> Vec<TextLeaf<'_, usize>> {
        self.as_slice().text_leaves()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOptions {
    #[serde(default)]
    pub match_case: bool,
    #[serde(default)]
    pub whole_word: bool,
}

impl SearchOptions {
    pub fn new(match_case: bool, whole_word: bool) -> Self {
        Self {
            match_case,
            whole_word,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub term: String,
    pub options: SearchOptions,
    pub start_offset: usize,
}

impl SearchQuery {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            options: SearchOptions::default(),
            start_offset: 0,
        }
    }

    pub fn options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn match_case(mut self, match_case: bool) -> Self {
        self.options.match_case = match_case;
        self
    }

    pub fn whole_word(mut self, whole_word: bool) -> Self {
        self.options.whole_word = whole_word;
        self
    }

    pub fn start_at(mut self, offset: usize) -> Self {
        self.start_offset = offset;
        self
    }
}

/// A match in linear offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextMatch {
    pub start: usize,
    pub len: usize,
}

impl TextMatch {
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafPoint<L> {
    pub leaf: L,
    pub offset: usize,
}

impl<L> LeafPoint<L> {
    pub fn new(leaf: L, offset: usize) -> Self {
        Self { leaf, offset }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPosition<L> {
    pub anchor: LeafPoint<L>,
    pub focus: LeafPoint<L>,
}

impl<L: PartialEq> TextPosition<L> {
    pub fn collapsed(point: LeafPoint<L>) -> Self
    where
        L: Clone,
    {
        Self {
            anchor: point.clone(),
            focus: point,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }
}

/// Finds the next occurrence of `query.term` and resolves it to leaf positions.
///
/// The container is flattened on every call, so the result always reflects
/// the live tree.
pub fn locate<C>(container: &C, query: &SearchQuery) -> Option<TextPosition<C::Leaf>>
where
    C: TextContainer + ?Sized,
{
    let text = flatten(container);
    let found = find_in_text(&text, query)?;
    debug!(
        term = %query.term,
        start = found.start,
        len = found.len,
        "located search term"
    );
    resolve_range(container, found)
}

pub fn flatten<C>(container: &C) -> String
where
    C: TextContainer + ?Sized,
{
    container.text_leaves().iter().map(|leaf| leaf.text).collect()
}

/// Searches flattened text. Returns `None` for an empty term or no match.
pub fn find_in_text(text: &str, query: &SearchQuery) -> Option<TextMatch> {
    if query.term.is_empty() {
        return None;
    }

    let (haystack, needle) = comparable(text, &query.term, query.options.match_case);

    let mut found = index_of(&haystack, &needle, query.start_offset);
    if found.is_none() && query.start_offset > 0 {
        found = index_of(&haystack, &needle, 0);
    }
    let mut start = found?;

    if query.options.whole_word && !is_whole_word(&haystack, start, needle.len()) {
        // No wraparound here; when nothing later qualifies the first hit stands.
        let mut next = index_of(&haystack, &needle, start + 1);
        while let Some(pos) = next {
            if is_whole_word(&haystack, pos, needle.len()) {
                start = pos;
                break;
            }
            next = index_of(&haystack, &needle, pos + 1);
        }
    }

    Some(TextMatch {
        start,
        len: needle.len(),
    })
}

/// Every non-overlapping occurrence of `term`, left to right.
///
/// Unlike [`find_in_text`] there is no wraparound and whole-word filtering is
/// strict: occurrences touching word characters are skipped.
pub fn find_all(text: &str, term: &str, options: SearchOptions) -> Vec<TextMatch> {
    if term.is_empty() {
        return Vec::new();
    }
    let (haystack, needle) = comparable(text, term, options.match_case);
    let mut matches = Vec::new();
    let mut from = 0;
    while let Some(pos) = index_of(&haystack, &needle, from) {
        if options.whole_word && !is_whole_word(&haystack, pos, needle.len()) {
            from = pos + 1;
            continue;
        }
        matches.push(TextMatch {
            start: pos,
            len: needle.len(),
        });
        from = pos + needle.len();
    }
    matches
}

/// Maps a linear range onto the leaves of `container`.
///
/// The anchor is the first leaf whose span strictly contains `found.start`;
/// the focus is the first leaf from there on whose end reaches `found.end()`,
/// so a focus may sit at a leaf's full length.
pub fn resolve_range<C>(container: &C, found: TextMatch) -> Option<TextPosition<C::Leaf>>
where
    C: TextContainer + ?Sized,
{
    let end = found.end();
    let mut cursor = 0usize;
    let mut anchor: Option<LeafPoint<C::Leaf>> = None;

    for leaf in container.text_leaves() {
        let len = leaf.char_len();
        if anchor.is_none() && cursor + len > found.start {
            anchor = Some(LeafPoint::new(leaf.id.clone(), found.start - cursor));
        }
        if let Some(anchor) = &anchor {
            if cursor + len >= end {
                return Some(TextPosition {
                    anchor: anchor.clone(),
                    focus: LeafPoint::new(leaf.id, end - cursor),
                });
            }
        }
        cursor += len;
    }
    None
}

/// Maps a single linear offset onto a leaf, preferring the end of the leaf
/// that precedes a boundary.
pub fn resolve_offset<C>(container: &C, offset: usize) -> Option<LeafPoint<C::Leaf>>
where
    C: TextContainer + ?Sized,
{
    let mut cursor = 0usize;
    for leaf in container.text_leaves() {
        let len = leaf.char_len();
        if cursor + len >= offset {
            return Some(LeafPoint::new(leaf.id, offset - cursor));
        }
        cursor += len;
    }
    None
}

/// Linear length of all leaf text preceding `point`.
pub fn linear_offset<C>(container: &C, point: &LeafPoint<C::Leaf>) -> Option<usize>
where
    C: TextContainer + ?Sized,
{
    let mut cursor = 0usize;
    for leaf in container.text_leaves() {
        let len = leaf.char_len();
        if leaf.id == point.leaf {
            if point.offset > len {
                return None;
            }
            return Some(cursor + point.offset);
        }
        cursor += len;
    }
    None
}

/// Lowercases one char, keeping it unchanged when lowercasing would change the
/// char count so folded offsets stay valid for the original text.
pub fn fold_char(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(folded), None) => folded,
        _ => c,
    }
}

fn comparable(text: &str, term: &str, match_case: bool) -> (Vec<char>, Vec<char>) {
    if match_case {
        (text.chars().collect(), term.chars().collect())
    } else {
        (
            text.chars().map(fold_char).collect(),
            term.chars().map(fold_char).collect(),
        )
    }
}

/// ASCII letters, digits and underscore; accented letters are boundaries.
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_whole_word(haystack: &[char], start: usize, len: usize) -> bool {
    let before = start
        .checked_sub(1)
        .and_then(|ix| haystack.get(ix))
        .is_some_and(|&c| is_word_char(c));
    let after = haystack
        .get(start + len)
        .is_some_and(|&c| is_word_char(c));
    !before && !after
}

fn index_of(haystack: &[char], needle: &[char], from: usize) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    let last = haystack.len() - needle.len();
    (from..=last).find(|&pos| haystack[pos..pos + needle.len()] == *needle)
}
