//! CLI command handlers, one per file.

mod completions;
mod copy;
mod download;
mod upload;

pub use completions::run_completions;
pub use copy::run_copy;
pub use download::run_download;
pub use upload::run_upload;
