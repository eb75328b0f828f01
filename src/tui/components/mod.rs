//! TUI components using tui-realm.

pub mod range;

pub use range::GradientRange;
