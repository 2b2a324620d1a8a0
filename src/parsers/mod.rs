pub mod extractor;
pub mod macros;
pub mod patterns;

pub use extractor::UnitExtractor;
pub use macros::MacroTable;
pub use patterns::{match_unit_close, match_unit_open, match_use, UnitClose, UnitOpen};
