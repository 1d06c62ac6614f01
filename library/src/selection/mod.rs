//! Picking one file per evaluation out of a naturally sorted directory listing.

pub mod natural_sort;
pub mod scanner;
pub mod selector;

pub use self::natural_sort::{natural_cmp, natural_sort};
pub use self::scanner::{parse_extensions, scan};
pub use self::selector::{Selection, SelectionMode, SelectorState};
