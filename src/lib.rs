mod error;
mod pattern;
mod selector;
mod store;
mod types;

pub use error::{DatasetError, Error, Result};
pub use selector::Selector;
pub use store::RecordStore;
pub use types::*;
