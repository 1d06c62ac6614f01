//! Text grouping and text file output.

pub mod groups;
pub mod writer;

pub use self::groups::{Group, LoadMode, extract, group_titles, split_groups};
pub use self::writer::{SpacingType, WriteMode, write_text};
