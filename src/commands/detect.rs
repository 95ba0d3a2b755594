/// `--detect`: report the detected file type of each input.
use crate::cli::output::write_detections;
use crate::highlight::{HighlightError, detect};
use crate::input::read_source;
use crate::types::DetectionOutput;

use super::Context;

/// Run `colourcat --detect [FILE]...`.
///
/// Unreadable inputs are reported on stderr and left out of the listing.
///
/// # Errors
///
/// Returns `HighlightError` for a bad `--language`.
pub fn run(cx: &Context<'_>) -> Result<i32, HighlightError> {
    let opts = cx.detect_options()?;
    let mut rows = Vec::new();
    let mut status = 0;

    for arg in cx.cli.inputs() {
        let source = match read_source(&arg) {
            Ok(source) => source,
            Err(err) => {
                cx.report(&err);
                status = err.exit_code();
                continue;
            }
        };

        let _t = cx.output.timer("detect");
        let detection = detect(cx.catalog, source.path.as_deref(), &source.bytes, &opts);
        rows.push(DetectionOutput {
            file: source.label,
            syntax: detection.syntax.name.clone(),
            method: detection.method,
            mime: detection.mime.map(str::to_owned),
            binary: detection.binary,
        });
    }

    write_detections(&rows, cx.output);
    Ok(status)
}
