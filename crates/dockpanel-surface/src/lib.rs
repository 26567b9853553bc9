// crates/dockpanel-surface/src/lib.rs

pub mod headless;

pub use headless::*;
