pub mod registry;
pub mod window;

pub use registry::SessionRegistry;
pub use window::{SmoothingWindow, DEFAULT_WINDOW_CAPACITY};
