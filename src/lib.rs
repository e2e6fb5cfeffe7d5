//! Window chrome for terminal UIs: draggable, resizable, dockable and
//! closable windows over a ratatui buffer, driven by crossterm mouse input.

pub mod config;
pub mod constants;
pub mod desktop;
pub mod dock;
pub mod drivers;
pub mod error;
pub mod event_loop;
pub mod frame;
pub mod style;
pub mod surface;
pub mod theme;
pub mod tracing_sub;
pub mod ui;
pub mod window;

pub use desktop::{Desktop, WindowSpec};
pub use error::ChromeError;
