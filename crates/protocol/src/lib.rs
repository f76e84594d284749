pub mod commands;
pub mod interaction;
pub mod shared_str;
pub mod theme;
pub mod types;

pub use commands::{RenderCommand, TextAlign};
pub use interaction::{HitTarget, Interaction};
pub use shared_str::SharedStr;
pub use theme::{Rgba, ThemeMode, ThemeToken};
pub use types::{Point, Rect, Viewport};
