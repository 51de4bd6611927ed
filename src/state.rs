/// Where the full-menu dialog is in its mount / transition lifecycle.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum OverlayPhase {
    #[default]
    Closed,  // Not in the render tree
    Opening, // Mounted in its pre-transition state, waiting to settle
    Open,    // Mounted and settled
    Closing, // Still mounted, running the exit transition
}

impl OverlayPhase {
    pub fn is_mounted(self) -> bool {
        !matches!(self, OverlayPhase::Closed)
    }

    pub fn is_settled(self) -> bool {
        matches!(self, OverlayPhase::Open)
    }
}
