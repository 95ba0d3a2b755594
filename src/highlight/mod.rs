/// Highlighting domain layer: catalog, name resolution, detection, rendering.
pub mod catalog;
pub mod detect;
pub mod errors;
pub mod palette;
pub mod render;
pub mod resolve;
pub mod search;

pub use catalog::{Catalog, DEFAULT_THEME};
pub use detect::{DetectOptions, detect};
pub use errors::HighlightError;
pub use palette::ColorDepth;
pub use render::{RenderOptions, Renderer, render_plain};
pub use resolve::{resolve_language, resolve_theme};
pub use search::search;
