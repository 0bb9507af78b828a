pub mod assets;
pub mod console;
pub mod html;
pub mod view;

pub use console::{high_usage_alerts, HighUsageAlert};
pub use html::render;
