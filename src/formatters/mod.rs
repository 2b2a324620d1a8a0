pub mod dot;
pub mod json_compact;
pub mod makefile;
pub mod verbose;

pub use dot::DotFormatter;
pub use json_compact::JsonCompactFormatter;
pub use makefile::MakefileFormatter;
pub use verbose::VerboseFormatter;

use anyhow::Result;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Writes `content` to `output_path`, or to stdout when the path is `-`.
///
/// An existing file is only replaced when `confirm_overwrite` agrees.
/// Returns whether anything was written.
pub fn write_output<F>(output_path: &Path, content: &str, confirm_overwrite: F) -> Result<bool>
where
    F: FnOnce(&Path) -> bool,
{
    if output_path == Path::new("-") {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(content.as_bytes())?;
        stdout.flush()?;
        return Ok(true);
    }

    if output_path.exists() && !confirm_overwrite(output_path) {
        return Ok(false);
    }

    fs::write(output_path, content)?;
    Ok(true)
}
