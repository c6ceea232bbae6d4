// Components module - reusable UI building blocks
//
// Panels own their state and implement the traits in `tui::traits`. The
// title bar, status bar and loading overlay are built per frame from
// borrowed App state.

pub mod input_panel;
pub mod loading;
pub mod results_panel;
pub mod scrollbar;
pub mod status_bar;
pub mod title_bar;
pub mod toast;

pub use input_panel::InputPanel;
pub use loading::LoadingOverlay;
pub use results_panel::ResultsPanel;
pub use status_bar::StatusBar;
pub use title_bar::TitleBar;
pub use toast::Toast;
