// crates/dockpanel-core/src/lib.rs
pub mod panel;
pub mod surface;
pub mod units;

pub use panel::*;
pub use surface::*;
pub use units::*;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PanelError {
    #[error("Unknown panel: {0}")]
    UnknownPanel(PanelId),

    #[error("Attaching panel {child} under panel {parent} would create a cycle")]
    WouldCycle { parent: PanelId, child: PanelId },
}

pub type Result<T> = std::result::Result<T, PanelError>;
