use wordpad_core::{
    DocumentSurface, EditCommand, EditingSurface, LeafPoint, SearchOptions, find_next,
    replace_all, replace_in_text, replace_selected,
};

#[test]
fn find_next_walks_forward_and_wraps() {
    let mut surface = DocumentSurface::from_paragraphs(["the cat sat on the mat"]);
    let options = SearchOptions::default();

    let first = find_next(&mut surface, "the", options).unwrap().unwrap();
    assert_eq!(first.anchor, LeafPoint::new(vec![0, 0], 0));
    assert_eq!(surface.selection_range(), Some(0..3));

    find_next(&mut surface, "the", options).unwrap();
    assert_eq!(surface.selection_range(), Some(15..18));

    find_next(&mut surface, "the", options).unwrap();
    assert_eq!(surface.selection_range(), Some(0..3));
}

#[test]
fn find_next_miss_keeps_the_selection() {
    let mut surface = DocumentSurface::from_paragraphs(["the cat sat"]);
    surface.set_selection_range(4..7);

    let strict = SearchOptions::new(true, false);
    assert_eq!(find_next(&mut surface, "Cat", strict).unwrap(), None);
    assert_eq!(surface.selection_range(), Some(4..7));

    assert_eq!(find_next(&mut surface, "", SearchOptions::default()).unwrap(), None);
}

#[test]
fn find_next_without_selection_starts_at_zero() {
    let mut surface = DocumentSurface::from_paragraphs(["ab ab"]);
    surface.clear_selection();
    find_next(&mut surface, "ab", SearchOptions::default()).unwrap();
    assert_eq!(surface.selection_range(), Some(0..2));
}

#[test]
fn find_next_crosses_blocks() {
    let mut surface = DocumentSurface::from_paragraphs(["alpha", "beta", "alpha"]);
    surface.set_selection_range(0..5);

    let found = find_next(&mut surface, "alpha", SearchOptions::default())
        .unwrap()
        .unwrap();
    assert_eq!(found.anchor, LeafPoint::new(vec![2, 0], 0));
    assert_eq!(found.focus, LeafPoint::new(vec![2, 0], 5));
    assert_eq!(surface.selected_text(), "alpha");
}

#[test]
fn replace_selected_needs_a_selection() {
    let mut surface = DocumentSurface::from_paragraphs(["the cat sat"]);
    surface.set_selection_range(2..2);
    assert!(!replace_selected(&mut surface, "dog").unwrap());

    find_next(&mut surface, "cat", SearchOptions::default()).unwrap();
    assert!(replace_selected(&mut surface, "dog").unwrap());
    assert_eq!(surface.doc().plain_text(), "the dog sat");
    assert_eq!(surface.selection_range(), Some(7..7));
}

#[test]
fn replace_all_counts_replacements() {
    let mut surface = DocumentSurface::from_paragraphs(["the cat", "The Cat and the CAT"]);
    let count = replace_all(&mut surface, "cat", "dog", SearchOptions::default()).unwrap();
    assert_eq!(count, 3);
    assert_eq!(
        surface.doc().block_texts(),
        vec!["the dog", "The dog and the dog"]
    );

    surface.run(&EditCommand::Undo).unwrap();
    assert_eq!(
        surface.doc().block_texts(),
        vec!["the cat", "The Cat and the CAT"]
    );
}

#[test]
fn replace_all_honours_case_and_whole_word() {
    let mut surface = DocumentSurface::from_paragraphs(["Cat cat concat"]);
    let count = replace_all(&mut surface, "cat", "dog", SearchOptions::new(true, true)).unwrap();
    assert_eq!(count, 1);
    assert_eq!(surface.doc().plain_text(), "Cat dog concat");

    let count = replace_all(&mut surface, "missing", "x", SearchOptions::default()).unwrap();
    assert_eq!(count, 0);
    assert!(surface.can_undo());
}

#[test]
fn replace_all_leaves_matches_split_across_leaves() {
    let mut surface = DocumentSurface::from_paragraphs(["catalog cat"]);
    surface.set_selection_range(1..2);
    surface.run(&EditCommand::Bold).unwrap();

    let count = replace_all(&mut surface, "cat", "dog", SearchOptions::default()).unwrap();
    assert_eq!(count, 1);
    assert_eq!(surface.doc().plain_text(), "catalog dog");
}

#[test]
fn replacing_text_can_grow_or_shrink() {
    let options = SearchOptions::default();
    assert_eq!(replace_in_text("a-b-c", "-", " + ", options), ("a + b + c".to_string(), 2));
    assert_eq!(replace_in_text("héhé", "é", "", options), ("hh".to_string(), 2));
    assert_eq!(replace_in_text("abc", "x", "y", options), ("abc".to_string(), 0));
}
