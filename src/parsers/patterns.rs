//! Line classifiers for unit boundaries and `use` statements.
//!
//! Each classifier looks at a single line in isolation. Lines that match
//! none of them are simply not interesting; that is never an error.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::model::{normalize_name, UnitKind};

static UNIT_OPEN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*(module|program)\s+(\w+)").unwrap());

static UNIT_CLOSE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*end\s*(module|program)\b(?:\s+(\w+))?").unwrap());

static USE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*use(?:\s*,\s*(?:non_)?intrinsic\s*)?(?:\s*::\s*|\s+)(\w+)").unwrap()
});

/// `module [prefixes] procedure|function|subroutine` declares a module
/// procedure, which cannot be imported. Prefixes cover `pure`, `elemental`,
/// `recursive` and type-specs such as `real(dp)`.
static MODULE_PROCEDURE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*module\s+(?:[\w(),=*\s]+?\s+)?(?:procedure|function|subroutine)\b")
        .unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitOpen {
    pub kind: UnitKind,
    /// Lowercased unit name.
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitClose {
    pub kind: UnitKind,
    pub name: Option<String>,
}

/// Recognises `module <name>` and `program <name>`.
pub fn match_unit_open(line: &str) -> Option<UnitOpen> {
    if MODULE_PROCEDURE_PATTERN.is_match(line) {
        return None;
    }

    let captures = UNIT_OPEN_PATTERN.captures(line)?;
    let kind = UnitKind::from_keyword(captures.get(1)?.as_str())?;
    let name = normalize_name(captures.get(2)?.as_str());
    Some(UnitOpen { kind, name })
}

/// Recognises `end module [name]` and `end program [name]`.
pub fn match_unit_close(line: &str) -> Option<UnitClose> {
    let captures = UNIT_CLOSE_PATTERN.captures(line)?;
    let kind = UnitKind::from_keyword(captures.get(1)?.as_str())?;
    let name = captures.get(2).map(|m| normalize_name(m.as_str()));
    Some(UnitClose { kind, name })
}

/// Returns the raw imported name of a `use` statement. Anything after the
/// name (an `only:` list, renames) is ignored.
pub fn match_use(line: &str) -> Option<&str> {
    USE_PATTERN
        .captures(line)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
}
