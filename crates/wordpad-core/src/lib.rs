mod app;
mod datetime;
mod document;
mod error;
mod find;
mod locator;
mod prefs;
mod sanitize;
mod state;
mod stats;
mod store;
mod surface;
mod value;

pub use crate::app::*;
pub use crate::datetime::*;
pub use crate::document::*;
pub use crate::error::*;
pub use crate::find::*;
pub use crate::locator::*;
pub use crate::prefs::*;
pub use crate::sanitize::*;
pub use crate::state::*;
pub use crate::stats::*;
pub use crate::store::*;
pub use crate::surface::*;
pub use crate::value::*;
