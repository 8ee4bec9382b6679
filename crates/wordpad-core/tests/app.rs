use std::path::PathBuf;
use std::rc::Rc;

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use wordpad_core::{
    Alignment, App, DialogKind, DocumentSurface, EditCommand, EditingSurface, EditorStats,
    KeyValueStore, MemoryStorage, SearchOptions, THEME_KEY, VIEW_STATE_KEY, ViewAction,
    date_time_formats, date_time_formats_now,
};

fn app_with(paragraphs: &[&str]) -> App<DocumentSurface> {
    App::new(DocumentSurface::from_paragraphs(paragraphs.iter().copied()))
}

#[test]
fn find_miss_reports_a_message() {
    let mut app = app_with(&["the cat sat"]);
    let found = app.find_next("dog", SearchOptions::default()).unwrap();
    assert_eq!(found, None);

    let message = app.message().get_state();
    assert!(message.visible);
    assert_eq!(message.title, "Find");
    assert_eq!(message.message, "Cannot find \"dog\"");

    app.close_message();
    assert!(!app.message().get_state().visible);
}

#[test]
fn empty_find_term_does_nothing() {
    let mut app = app_with(&["the cat sat"]);
    assert_eq!(app.find_next("", SearchOptions::default()).unwrap(), None);
    assert!(!app.message().get_state().visible);
    assert_eq!(app.find_dialog_seed(), None);
}

#[test]
fn find_hit_selects_and_syncs_formatting() {
    let mut surface = DocumentSurface::from_paragraphs(["the cat"]);
    surface.set_selection_range(4..7);
    surface.run(&EditCommand::Bold).unwrap();
    surface.set_selection_range(0..0);

    let mut app = App::new(surface);
    assert!(!app.format().get_state().is_bold);

    let found = app.find_next("CAT", SearchOptions::default()).unwrap();
    assert!(found.is_some());
    assert_eq!(app.surface().selected_text(), "cat");
    assert!(app.format().get_state().is_bold);
    assert!(!app.message().get_state().visible);
    assert!(!app.document().get_state().is_modified);
}

#[test]
fn last_search_seeds_the_dialogs() {
    let mut app = app_with(&["the cat sat"]);
    let options = SearchOptions::new(true, true);
    app.find_next("sat", options).unwrap();

    let seed = app.find_dialog_seed().unwrap();
    assert_eq!(seed.term, "sat");
    assert_eq!(seed.options, options);

    app.new_document();
    assert_eq!(app.find_dialog_seed().unwrap().term, "sat");
}

#[test]
fn replace_marks_the_document_modified() {
    let mut app = app_with(&["cat and cat"]);
    let count = app
        .replace_all("dog", "cat", SearchOptions::default())
        .unwrap();
    assert_eq!(count, 0);
    assert!(!app.document().get_state().is_modified);

    let count = app
        .replace_all("cat", "dog", SearchOptions::default())
        .unwrap();
    assert_eq!(count, 2);
    assert!(app.document().get_state().is_modified);
    assert_eq!(app.surface().doc().plain_text(), "dog and dog");
}

#[test]
fn replace_selected_after_find() {
    let mut app = app_with(&["one two one"]);
    assert!(!app.replace_selected("1").unwrap());
    assert!(!app.document().get_state().is_modified);

    app.find_next("one", SearchOptions::default()).unwrap();
    assert!(app.replace_selected("1").unwrap());
    app.find_next("one", SearchOptions::default()).unwrap();
    assert!(app.replace_selected("1").unwrap());

    assert_eq!(app.surface().doc().plain_text(), "1 two 1");
    assert!(app.document().get_state().is_modified);
}

#[test]
fn formatting_commands_sync_the_format_slice() {
    let mut app = app_with(&["hello world"]);
    app.select_all().unwrap();
    assert!(!app.document().get_state().is_modified);

    app.toggle_bold().unwrap();
    app.toggle_italic().unwrap();
    app.toggle_underline().unwrap();
    app.toggle_strikethrough().unwrap();
    app.set_alignment(Alignment::Center).unwrap();
    app.toggle_bullets().unwrap();

    let format = app.format().get_state();
    assert!(format.is_bold && format.is_italic);
    assert!(format.is_underline && format.is_strikethrough);
    assert_eq!(format.alignment, Alignment::Center);
    assert!(format.is_bullet_list);
    assert!(app.document().get_state().is_modified);

    app.toggle_bold().unwrap();
    assert!(!app.format().get_state().is_bold);
}

#[test]
fn font_settings_reach_surface_and_state() {
    let mut app = app_with(&["hello"]);
    app.select_all().unwrap();

    app.set_font_family("Georgia").unwrap();
    app.set_font_size("18").unwrap();
    app.set_font_color("#0000ff").unwrap();

    assert_eq!(app.surface().query_value("fontName"), "Georgia");
    assert_eq!(app.surface().query_value("fontSize"), "5");
    assert_eq!(app.surface().query_value("foreColor"), "#0000ff");

    let format = app.format().get_state();
    assert_eq!(format.font_family, "Georgia");
    assert_eq!(format.font_size, "18");
    assert_eq!(format.font_color, "#0000ff");
}

#[test]
fn odd_font_sizes_keep_the_requested_label() {
    let mut app = app_with(&["hello"]);
    app.select_all().unwrap();
    app.set_font_size("11").unwrap();

    assert_eq!(app.surface().query_value("fontSize"), "3");
    assert_eq!(app.format().get_state().font_size, "11");

    app.update_format_state();
    assert_eq!(app.format().get_state().font_size, "12");
}

#[test]
fn clipboard_and_history_commands() {
    let mut app = app_with(&["hello world"]);
    app.surface_mut().set_selection_range(0..6);
    app.copy().unwrap();
    assert!(!app.document().get_state().is_modified);

    app.surface_mut().set_selection_range(11..11);
    app.paste().unwrap();
    assert_eq!(app.surface().doc().plain_text(), "hello worldhello ");
    assert!(app.document().get_state().is_modified);

    app.undo().unwrap();
    assert_eq!(app.surface().doc().plain_text(), "hello world");
    app.redo().unwrap();
    assert_eq!(app.surface().doc().plain_text(), "hello worldhello ");

    app.surface_mut().set_selection_range(0..6);
    app.cut().unwrap();
    app.delete().unwrap();
    assert_eq!(app.surface().doc().plain_text(), "worldhello ");
    assert_eq!(app.surface().clipboard(), "hello ");
}

#[test]
fn typing_and_date_insertion() {
    let mut app = app_with(&[""]);
    app.insert_text("Today: ").unwrap();

    let at = NaiveDate::from_ymd_opt(2026, 3, 5)
        .and_then(|date| date.and_hms_opt(14, 7, 9))
        .unwrap();
    let formats = date_time_formats(&at);
    app.insert_date_time(&formats[1]).unwrap();
    app.insert_date_time("").unwrap();

    assert_eq!(
        app.surface().doc().plain_text(),
        "Today: Thursday, March 5, 2026"
    );
    assert!(app.document().get_state().is_modified);
}

#[test]
fn current_time_formats_can_be_inserted() {
    let now = date_time_formats_now();
    assert_eq!(now.len(), 10);

    let mut app = app_with(&[""]);
    app.insert_date_time(&now[0]).unwrap();
    assert_eq!(app.surface().doc().plain_text(), now[0]);
}

#[test]
fn on_input_marks_modified_once_edited() {
    let app = app_with(&["x"]);
    assert_eq!(app.window_title(), "Document - WordPad");
    app.on_input();
    assert_eq!(app.window_title(), "Document * - WordPad");
}

#[test]
fn open_document_sanitizes_and_loads() {
    let mut app = app_with(&["old"]);
    app.on_input();

    let html = r#"<p onclick="steal()">Dear Sam,</p><script>evil()</script><p>See you.</p>"#;
    app.open_document(html, "/home/me/letter.html");

    let document = app.document().get_state();
    assert_eq!(document.content, "<p>Dear Sam,</p><p>See you.</p>");
    assert_eq!(document.file_path, Some(PathBuf::from("/home/me/letter.html")));
    assert!(!document.is_modified);
    assert_eq!(app.window_title(), "letter.html - WordPad");
    assert_eq!(
        app.surface().doc().block_texts(),
        vec!["Dear Sam,", "See you."]
    );
}

#[test]
fn new_document_and_save() {
    let mut app = app_with(&["draft"]);
    app.open_document("<p>draft</p>", "a.html");
    app.insert_text("!").unwrap();

    app.mark_saved(Some(PathBuf::from("b.html")));
    assert_eq!(app.window_title(), "b.html - WordPad");

    app.insert_text("?").unwrap();
    app.mark_saved(None);
    let document = app.document().get_state();
    assert!(!document.is_modified);
    assert_eq!(document.file_path, Some(PathBuf::from("b.html")));

    app.new_document();
    assert_eq!(app.surface().inner_text(), "");
    assert_eq!(app.window_title(), "Document - WordPad");
}

#[test]
fn dialogs_open_one_at_a_time() {
    let app = app_with(&[""]);
    app.open_dialog(DialogKind::Find);
    app.open_dialog(DialogKind::DateTime);
    assert_eq!(
        app.dialogs().get_state().open_dialogs(),
        vec![DialogKind::DateTime]
    );
    app.close_dialog(DialogKind::DateTime);
    assert!(app.dialogs().get_state().open_dialogs().is_empty());
}

#[test]
fn stats_follow_the_caret() {
    let mut app = app_with(&["hello world", "second line here"]);
    assert_eq!(app.stats(), EditorStats { line: 1, col: 1, words: 5 });

    app.surface_mut().set_selection_range(14..14);
    let stats = app.stats();
    assert_eq!((stats.line, stats.col), (2, 4));
    assert_eq!(stats.words_label(), "5 words");
}

#[test]
fn view_preferences_are_restored_and_persisted() -> anyhow::Result<()> {
    let storage = Rc::new(MemoryStorage::with_entries([
        (THEME_KEY, "dark"),
        (VIEW_STATE_KEY, r#"{"statusBar":false}"#),
    ]));
    let app = App::with_storage(DocumentSurface::default(), storage.clone());
    assert!(app.persists_view());

    let view = *app.view().get_state();
    assert!(view.dark_mode);
    assert!(!view.status_bar);
    assert!(view.toolbar);

    app.view().dispatch(ViewAction::ToggleDarkMode);
    assert_eq!(storage.get(THEME_KEY)?.as_deref(), Some("light"));

    let plain = App::new(DocumentSurface::default());
    assert!(!plain.persists_view());
    Ok(())
}
