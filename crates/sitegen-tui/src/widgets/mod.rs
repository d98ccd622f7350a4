//! Widget components for the TUI

mod download;
mod header;
mod preview_panel;
mod prompt;
mod status_bar;

pub use download::DownloadButton;
pub use header::MainHeader;
pub use preview_panel::PreviewPanel;
pub use prompt::PromptInput;
pub use status_bar::StatusBar;
