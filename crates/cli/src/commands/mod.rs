pub mod analyze;
pub mod validate;

use std::path::Path;

/// Name used for an input file in printed output.
pub(crate) fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
