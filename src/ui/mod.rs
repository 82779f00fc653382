// User interface components
pub mod about;
pub mod app;
pub mod config;
pub mod notifications;
pub mod styles;
pub mod ui_panels;
pub mod ui_plot_view;
pub mod ui_render;
pub mod ui_text;
pub mod utils;
pub mod widgets;

// Re-export main app
pub use app::{Page, PortfolioApp};
pub use config::UI_CONFIG;
