pub mod charts;
pub mod compose;
pub mod core;
pub mod dataset;
pub mod variant;
pub mod view;

use std::fmt;

/// The city dataset could not be fetched or parsed.
#[derive(Debug)]
pub struct DataUnavailable;

impl fmt::Display for DataUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "city dataset unavailable")
    }
}

impl std::error::Error for DataUnavailable {}

pub type Result<T> = std::result::Result<T, error_stack::Report<DataUnavailable>>;

pub mod prelude {
    pub use crate::DataUnavailable;
    pub use crate::charts::*;
    pub use crate::compose::*;
    pub use crate::core::*;
    pub use crate::dataset::*;
    pub use crate::variant::*;
    pub use crate::view::*;
}
