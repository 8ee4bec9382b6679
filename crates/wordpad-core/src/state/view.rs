use crate::prefs::ViewPrefs;
use crate::store::Store;

/// Visibility of the window chrome and the colour theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub toolbar: bool,
    pub format_bar: bool,
    pub ruler: bool,
    pub status_bar: bool,
    pub dark_mode: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            toolbar: true,
            format_bar: true,
            ruler: true,
            status_bar: true,
            dark_mode: false,
        }
    }
}

impl ViewState {
    pub fn prefs(&self) -> ViewPrefs {
        ViewPrefs {
            toolbar: self.toolbar,
            format_bar: self.format_bar,
            ruler: self.ruler,
            status_bar: self.status_bar,
            dark_mode: self.dark_mode,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewAction {
    Initialize(ViewPrefs),
    ToggleToolbar,
    ToggleFormatBar,
    ToggleRuler,
    ToggleStatusBar,
    ToggleDarkMode,
}

pub type ViewStore = Store<ViewState, ViewAction>;

pub fn reduce_view(state: &ViewState, action: ViewAction) -> ViewState {
    let mut next = *state;
    match action {
        ViewAction::Initialize(prefs) => {
            next = ViewState {
                toolbar: prefs.toolbar,
                format_bar: prefs.format_bar,
                ruler: prefs.ruler,
                status_bar: prefs.status_bar,
                dark_mode: prefs.dark_mode,
            };
        }
        ViewAction::ToggleToolbar => next.toolbar = !next.toolbar,
        ViewAction::ToggleFormatBar => next.format_bar = !next.format_bar,
        ViewAction::ToggleRuler => next.ruler = !next.ruler,
        ViewAction::ToggleStatusBar => next.status_bar = !next.status_bar,
        ViewAction::ToggleDarkMode => next.dark_mode = !next.dark_mode,
    }
    next
}

pub fn view_store() -> ViewStore {
    Store::new(ViewState::default(), reduce_view)
}
