/// Input sources: files on disk or standard input, read fully into memory.
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};

use crate::highlight::HighlightError;

/// Argument that selects standard input.
pub const STDIN_ARG: &str = "-";

/// Label used for standard input in messages and detection rows.
pub const STDIN_LABEL: &str = "<stdin>";

/// One fully-read input.
#[derive(Debug)]
pub struct Source {
    /// Display label: the path as given, or `<stdin>`.
    pub label: String,
    /// Filesystem path, `None` for standard input.
    pub path: Option<PathBuf>,
    /// Raw content.
    pub bytes: Vec<u8>,
}

/// Read one command-line input argument.
///
/// # Errors
///
/// Returns `NotFound`, `PermissionDenied`, `IsDirectory` or `Io`.
pub fn read_source(arg: &str) -> Result<Source, HighlightError> {
    if arg == STDIN_ARG {
        return read_stdin();
    }
    read_path(Path::new(arg))
}

fn read_stdin() -> Result<Source, HighlightError> {
    let mut bytes = Vec::new();
    std::io::stdin()
        .lock()
        .read_to_end(&mut bytes)
        .map_err(|source| HighlightError::Io {
            label: STDIN_LABEL.to_owned(),
            source,
        })?;
    Ok(Source {
        label: STDIN_LABEL.to_owned(),
        path: None,
        bytes,
    })
}

fn read_path(path: &Path) -> Result<Source, HighlightError> {
    if path.is_dir() {
        return Err(HighlightError::IsDirectory {
            path: path.to_owned(),
        });
    }

    let bytes = std::fs::read(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => HighlightError::NotFound {
            path: path.to_owned(),
        },
        ErrorKind::PermissionDenied => HighlightError::PermissionDenied {
            path: path.to_owned(),
        },
        ErrorKind::IsADirectory => HighlightError::IsDirectory {
            path: path.to_owned(),
        },
        _ => HighlightError::Io {
            label: path.display().to_string(),
            source,
        },
    })?;

    Ok(Source {
        label: path.display().to_string(),
        path: Some(path.to_owned()),
        bytes,
    })
}
