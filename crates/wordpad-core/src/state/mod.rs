mod dialogs;
mod document;
mod format;
mod message;
mod view;

pub use self::dialogs::*;
pub use self::document::*;
pub use self::format::*;
pub use self::message::*;
pub use self::view::*;
