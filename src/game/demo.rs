//! Sandbox Demo Driver
//!
//! Click-to-build loop on top of [`SandboxSystem`]: the primary action places
//! the selected block (or removes, in remove mode) at the cursor cell, and
//! the mode keys swap between the two, changing the preview to match.

use std::rc::Rc;

use crate::camera::CameraProvider;
use crate::game::config::DemoBindings;
use crate::game::sandbox::{BlockDefinition, PlacementError, RemovedBlocks, SandboxSystem};
use crate::input::InputSnapshot;
use crate::render::{RenderTemplate, RenderableFactory};
use crate::world::GridIndex;

const MODE_PLACE: &str = "Mode: Place";
const MODE_REMOVE: &str = "Mode: Remove";

/// What a click does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DemoMode {
    #[default]
    Place,
    Remove,
}

/// Result of the primary action during one tick.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    Placed {
        index: GridIndex,
        replaced: RemovedBlocks,
    },
    Removed {
        index: GridIndex,
        removed: RemovedBlocks,
    },
    Refused(PlacementError),
}

/// Everything that happened during one demo tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    pub cursor: Option<GridIndex>,
    pub action: Option<ActionOutcome>,
    /// Set when a mode key switched modes this tick
    pub mode_changed: Option<DemoMode>,
}

/// Place/remove driver with a single selected block.
pub struct SandboxDemo {
    block: Rc<BlockDefinition>,
    remove_preview: RenderTemplate,
    bindings: DemoBindings,
    mode: DemoMode,
}

impl SandboxDemo {
    /// Start in place mode, previewing `block`.
    ///
    /// `remove_preview` is shown over the cursor cell in remove mode.
    pub fn new<R: RenderableFactory>(
        system: &mut SandboxSystem<R>,
        block: Rc<BlockDefinition>,
        remove_preview: RenderTemplate,
        bindings: DemoBindings,
    ) -> Self {
        system.set_preview_block(Some(&block));
        tracing::info!("{MODE_PLACE}");
        Self {
            block,
            remove_preview,
            bindings,
            mode: DemoMode::Place,
        }
    }

    pub fn mode(&self) -> DemoMode {
        self.mode
    }

    /// Label for the current mode.
    pub fn mode_label(&self) -> &'static str {
        match self.mode {
            DemoMode::Place => MODE_PLACE,
            DemoMode::Remove => MODE_REMOVE,
        }
    }

    pub fn block(&self) -> &Rc<BlockDefinition> {
        &self.block
    }

    /// Change the block placed in place mode.
    pub fn select_block<R: RenderableFactory>(
        &mut self,
        system: &mut SandboxSystem<R>,
        block: Rc<BlockDefinition>,
    ) {
        self.block = block;
        if self.mode == DemoMode::Place {
            system.set_preview_block(Some(&self.block));
        }
    }

    /// Run one tick: resolve the cursor, act on a click, then handle mode keys.
    pub fn step<R: RenderableFactory, C: CameraProvider + ?Sized>(
        &mut self,
        system: &mut SandboxSystem<R>,
        camera: &C,
        input: &InputSnapshot,
    ) -> StepReport {
        let cursor = system.step(camera, input.pointer);
        let mut report = StepReport {
            cursor,
            ..Default::default()
        };

        if input.primary_action {
            report.action = Some(self.act(system, cursor));
        }

        if input.was_pressed(self.bindings.place_mode) {
            self.switch_mode(system, DemoMode::Place);
            report.mode_changed = Some(DemoMode::Place);
        } else if input.was_pressed(self.bindings.remove_mode) {
            self.switch_mode(system, DemoMode::Remove);
            report.mode_changed = Some(DemoMode::Remove);
        }

        report
    }

    fn act<R: RenderableFactory>(
        &self,
        system: &mut SandboxSystem<R>,
        cursor: Option<GridIndex>,
    ) -> ActionOutcome {
        let index = GridIndex::from_option(cursor);
        let result = match self.mode {
            DemoMode::Place => system.set_block(&self.block, index).map(|replaced| {
                tracing::info!("Block placed at {index}");
                ActionOutcome::Placed { index, replaced }
            }),
            DemoMode::Remove => system.remove_block(index).map(|removed| {
                tracing::info!("Block removed at {index}");
                ActionOutcome::Removed { index, removed }
            }),
        };

        result.unwrap_or_else(|err| {
            tracing::warn!(%err, "action refused");
            ActionOutcome::Refused(err)
        })
    }

    fn switch_mode<R: RenderableFactory>(&mut self, system: &mut SandboxSystem<R>, mode: DemoMode) {
        self.mode = mode;
        match mode {
            DemoMode::Place => system.set_preview_block(Some(&self.block)),
            DemoMode::Remove => system.set_preview_template(Some(self.remove_preview)),
        }
        tracing::info!("{}", self.mode_label());
    }
}
