// Keyword frequency counting over job descriptions.

pub mod counter;
pub mod presets;
