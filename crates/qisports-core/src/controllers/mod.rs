//! View controllers
//!
//! Each controller is a single-owner state machine. It registers triggers
//! and timers under its own `OwnerId` when mounted, reacts to the runtime
//! events addressed to that owner and releases everything in `teardown`.

pub mod carousel;
pub mod header;
pub mod loader;
pub mod reveal;

pub use carousel::CarouselController;
pub use header::{HeaderController, HeaderVisualState};
pub use loader::{LoaderController, LoaderPhase};
pub use reveal::{split_words, RevealController};

use crate::runtime::{OwnerId, Runtime, RuntimeEvent};

pub trait Controller {
    fn owner(&self) -> OwnerId;

    /// React to an event addressed to this controller's owner id
    fn handle(&mut self, rt: &mut Runtime, event: &RuntimeEvent);

    /// Release every registration; the controller is inert afterwards
    fn teardown(&mut self, rt: &mut Runtime);
}
