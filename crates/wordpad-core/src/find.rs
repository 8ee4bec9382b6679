use tracing::debug;

use crate::error::SurfaceError;
use crate::locator::{self, SearchOptions, SearchQuery, TextContainer, TextPosition};
use crate::surface::{EditCommand, EditingSurface};

/// Selects the next match after the current selection, wrapping to the start
/// of the document. Returns `Ok(None)` and leaves the selection alone when
/// there is no match.
pub fn find_next<S>(
    surface: &mut S,
    term: &str,
    options: SearchOptions,
) -> Result<Option<TextPosition<S::Leaf>>, SurfaceError>
where
    S: EditingSurface + ?Sized,
{
    let query = SearchQuery::new(term)
        .options(options)
        .start_at(surface.selection_end_offset());
    let Some(position) = locator::locate(&*surface, &query) else {
        debug!(term, start = query.start_offset, "search term not found");
        return Ok(None);
    };
    surface.select(&position)?;
    Ok(Some(position))
}

/// Replaces a non-empty selection with `replacement`.
pub fn replace_selected<S>(surface: &mut S, replacement: &str) -> Result<bool, SurfaceError>
where
    S: EditingSurface + ?Sized,
{
    if surface.selected_text().is_empty() {
        return Ok(false);
    }
    surface.run(&EditCommand::InsertText(replacement.to_string()))?;
    Ok(true)
}

/// Replaces every occurrence of `term` within each text leaf as one edit and
/// returns how many were replaced. An occurrence split across two leaves is
/// left untouched.
pub fn replace_all<S>(
    surface: &mut S,
    term: &str,
    replacement: &str,
    options: SearchOptions,
) -> Result<usize, SurfaceError>
where
    S: EditingSurface + ?Sized,
{
    let mut count = 0;
    let edits: Vec<(S::Leaf, String)> = surface
        .text_leaves()
        .into_iter()
        .filter_map(|leaf| {
            let (text, replaced) = replace_in_text(leaf.text, term, replacement, options);
            count += replaced;
            (replaced > 0).then_some((leaf.id, text))
        })
        .collect();

    if !edits.is_empty() {
        surface.replace_leaf_texts(edits)?;
    }
    debug!(term, count, "replaced all occurrences");
    Ok(count)
}

/// Replaces every occurrence of `term` in `text`; returns the new text and
/// the replacement count.
pub fn replace_in_text(
    text: &str,
    term: &str,
    replacement: &str,
    options: SearchOptions,
) -> (String, usize) {
    let matches = locator::find_all(text, term, options);
    if matches.is_empty() {
        return (text.to_string(), 0);
    }

    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for found in &matches {
        out.extend(&chars[last..found.start]);
        out.push_str(replacement);
        last = found.end();
    }
    out.extend(&chars[last..]);
    (out, matches.len())
}
