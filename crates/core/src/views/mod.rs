//! One view transform per page section.
//!
//! Each module pairs the section's interactive state with a pure
//! `render_*` function that turns `(state, viewport, now)` into render
//! commands laid out from `y = 0`. The page stacks them.

pub mod basics;
pub mod circuits;
pub mod common;
pub mod grid;
pub mod hero;
pub mod machine;
pub mod rules;

pub use basics::{BasicsState, render_basics};
pub use circuits::{CircuitsState, render_circuits};
pub use common::Rendered;
pub use grid::{GridState, render_grid};
pub use hero::{HeroState, render_hero};
pub use machine::{MachineState, render_machine};
pub use rules::{RulesState, render_rules};
