/// Command dispatch: routes the selected `Command` to its implementation.
pub mod cat;
pub mod detect;
pub mod languages;
pub mod themes;

use crate::cli::{Cli, Command, OutputCtx, write_error};
use crate::config::Settings;
use crate::highlight::{Catalog, DetectOptions, HighlightError, resolve_language};
use crate::types::ErrorOutput;

/// Everything a command needs besides its own flags.
pub struct Context<'a> {
    pub cli: &'a Cli,
    pub settings: &'a Settings,
    pub catalog: &'a Catalog,
    pub output: &'a OutputCtx,
}

impl<'a> Context<'a> {
    /// Detection options from `--language` and the configured mappings.
    ///
    /// # Errors
    ///
    /// Returns `UnknownLanguage` or `AmbiguousName` for a bad `--language`.
    pub fn detect_options(&self) -> Result<DetectOptions<'a>, HighlightError> {
        let forced = self
            .cli
            .language
            .as_deref()
            .map(|query| resolve_language(self.catalog, query))
            .transpose()?;
        Ok(DetectOptions {
            forced,
            mappings: self.settings.mappings.clone(),
        })
    }

    /// Report an error for one input on stderr and keep going.
    pub fn report(&self, err: &HighlightError) {
        tracing::debug!(code = err.code(), "input failed");
        write_error(&ErrorOutput::from_error(err), self.cli.output, self.cli.json);
    }
}

/// Dispatch the selected command.
///
/// Returns the process exit code: 0, or the code of the last input that
/// failed when processing went on past per-input errors.
///
/// # Errors
///
/// Returns `HighlightError` when the command cannot run at all.
pub fn dispatch(command: &Command, cx: &Context<'_>) -> Result<i32, HighlightError> {
    match command {
        Command::Cat => cat::run(cx),
        Command::Detect => detect::run(cx),
        Command::Languages(query) => {
            languages::run(query, cx);
            Ok(0)
        }
        Command::Themes(query) => {
            themes::run(query, cx);
            Ok(0)
        }
    }
}
