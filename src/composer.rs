//! # Composer
//!
//! The [`Composer`] owns the committed permutation pair, the selection and the
//! scene, and runs the swap animation:
//!
//! 1. [`Composer::toggle`] selects positions. The second one derives the
//!    transposition `swap` and its image `psi_of_swap` from the correspondence
//!    table.
//! 2. [`Composer::frame`] is called once per frame with the current time. The
//!    first call latches `t0`; every call interpolates the whole scene between the
//!    committed state and the committed state composed with the swap.
//! 3. When the progress reaches 1 the swap is committed and every component is
//!    updated to the new state.
//!
//! A frame is a pure function of its timestamp, so [`run_to_completion`] can drive
//! it from any [`FrameClock`].

pub mod clock;
pub mod config;
pub mod easing;
pub mod session;

use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::{
    geometry::GeometryError,
    hexad::{CorrespondenceTable, Duad, POINTS},
    permutation::{Permutation, PermutationError},
    scene::{
        build_scene, pentad_scene, position_class, ClickTarget, Component, ComponentSpec,
        ComponentView, Layout, Renderer, SceneState,
    },
};

pub use clock::{FrameClock, SimulatedClock, WallClock};
pub use config::ComposerConfig;
pub use easing::Easing;
pub use session::{PendingSwap, SessionState};

/// Class toggled on every node of a selected position.
pub const SELECTED_CLASS: &str = "selected";

#[derive(Debug, Error)]
pub enum ComposerError {
    #[error("no correspondence entry for the transposition of positions {0}")]
    MissingCorrespondence(Duad),
    #[error("position {0} is out of range")]
    PositionOutOfRange(usize),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Permutation(#[from] PermutationError),
}

/// Result of a selection toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Selected(usize),
    Deselected(usize),
    /// The second position was chosen; the swap starts with the next frame.
    SwapPending(Duad),
    /// A swap is in flight and the toggle was ignored.
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// Nothing to animate.
    Idle,
    /// Raw progress in `[0, 1)`.
    Running(f64),
    Committed,
}

pub struct Composer<R: Renderer> {
    config: ComposerConfig,
    layout: Layout,
    table: CorrespondenceTable,
    specs: Vec<ComponentSpec>,
    session: SessionState,
    components: Vec<Component<R::Handle>>,
    renderer: R,
}

impl<R: Renderer> Composer<R> {
    /// A composer drawing the standard pentad scene at the identity.
    pub fn new(config: ComposerConfig, renderer: R) -> Result<Self, ComposerError> {
        let layout = config.layout()?;
        let specs = pentad_scene(&layout);
        Self::with_scene(config, layout, specs, SessionState::default(), renderer)
    }

    pub fn with_scene(
        config: ComposerConfig,
        layout: Layout,
        specs: Vec<ComponentSpec>,
        session: SessionState,
        mut renderer: R,
    ) -> Result<Self, ComposerError> {
        let state = SceneState::new(&session.phi, &session.psi, &layout);
        let components = build_scene(&specs, &state, &mut renderer)?;
        debug!(components = components.len(), "scene built");
        Ok(Composer {
            config,
            layout,
            table: CorrespondenceTable::outer(),
            specs,
            session,
            components,
            renderer,
        })
    }

    /// Replaces the correspondence table.
    pub fn with_table(mut self, table: CorrespondenceTable) -> Self {
        self.table = table;
        self
    }

    /// Adds or removes `position` from the selection.
    ///
    /// Choosing a second position derives the pending swap. If the table has no entry
    /// for the pair, the second choice is undone and the miss is reported.
    pub fn toggle(&mut self, position: usize) -> Result<Selection, ComposerError> {
        if position >= POINTS {
            return Err(ComposerError::PositionOutOfRange(position));
        }
        if self.session.pending.is_some() {
            warn!(position, "swap in progress, selection ignored");
            return Ok(Selection::Busy);
        }

        if let Some(i) = self.session.selected.iter().position(|&k| k == position) {
            self.session.selected.remove(i);
            self.highlight(position);
            debug!(position, selected = ?self.session.selected, "deselected");
            return Ok(Selection::Deselected(position));
        }

        self.session.selected.push(position);
        self.highlight(position);
        debug!(position, selected = ?self.session.selected, "selected");
        let &[a, b] = self.session.selected.as_slice() else {
            return Ok(Selection::Selected(position));
        };

        let duad = Duad::new(a, b);
        let Some(psi_of_swap) = self.table.get(duad).cloned() else {
            self.session.selected.pop();
            self.highlight(position);
            return Err(ComposerError::MissingCorrespondence(duad));
        };
        self.session
            .begin(duad, Permutation::transposition(a, b), psi_of_swap);
        Ok(Selection::SwapPending(duad))
    }

    /// Entry point for renderer clicks.
    pub fn click(&mut self, target: ClickTarget) -> Result<Selection, ComposerError> {
        match target {
            ClickTarget::Position(k) => self.toggle(k),
        }
    }

    fn highlight(&mut self, position: usize) {
        for handle in self.renderer.query_by_class(&position_class(position)) {
            self.renderer.toggle_class(&handle, SELECTED_CLASS);
        }
    }

    /// Advances the animation to time `now`, in milliseconds.
    pub fn frame(&mut self, now: f64) -> Result<FrameOutcome, ComposerError> {
        if self.session.pending.is_none() {
            return Ok(FrameOutcome::Idle);
        }
        let t0 = *self.session.t0.get_or_insert(now);
        let progress = ((now - t0) / self.config.duration_ms).clamp(0.0, 1.0);
        trace!(now, progress, "frame");

        self.interpolate(progress)?;
        if progress < 1.0 {
            return Ok(FrameOutcome::Running(progress));
        }
        self.commit()?;
        Ok(FrameOutcome::Committed)
    }

    /// Draws the scene at raw progress `progress` of the pending swap. Every
    /// component sees the same old and new states.
    pub fn interpolate(&mut self, progress: f64) -> Result<(), ComposerError> {
        let Some(pending) = &self.session.pending else {
            return Ok(());
        };
        let (morph_t, shift_t) = self.config.stages(progress);
        let old = SceneState::new(&self.session.phi, &self.session.psi, &self.layout);
        let new = SceneState::new(&pending.next_phi, &pending.next_psi, &self.layout);
        for component in &mut self.components {
            component.morph(&old, &new, morph_t, &mut self.renderer)?;
            component.shift_between(
                &old,
                &new,
                shift_t,
                self.config.shift_mode,
                &mut self.renderer,
            )?;
        }
        Ok(())
    }

    /// Folds the pending swap into the committed pair and updates every component.
    /// Returns `false` when nothing was pending.
    pub fn commit(&mut self) -> Result<bool, ComposerError> {
        let Some(pending) = self.session.commit() else {
            return Ok(false);
        };
        self.highlight(pending.duad.lo());
        self.highlight(pending.duad.hi());

        let state = SceneState::new(&self.session.phi, &self.session.psi, &self.layout);
        for component in &mut self.components {
            component.commit(&state, &mut self.renderer)?;
        }
        Ok(true)
    }

    /// The committed state.
    pub fn snapshot(&self) -> SceneState<'_> {
        SceneState::new(&self.session.phi, &self.session.psi, &self.layout)
    }

    /// Builds the scene afresh from the committed state into `renderer`.
    pub fn rebuild<S: Renderer>(
        &self,
        renderer: &mut S,
    ) -> Result<Vec<Component<S::Handle>>, ComposerError> {
        Ok(build_scene(&self.specs, &self.snapshot(), renderer)?)
    }

    pub fn views(&self) -> Vec<ComponentView> {
        self.components.iter().map(Component::view).collect()
    }

    pub fn components(&self) -> &[Component<R::Handle>] {
        &self.components
    }

    pub fn phi(&self) -> &Permutation {
        &self.session.phi
    }

    pub fn psi(&self) -> &Permutation {
        &self.session.psi
    }

    pub fn selected(&self) -> &[usize] {
        &self.session.selected
    }

    pub fn pending_swap(&self) -> Option<&PendingSwap> {
        self.session.pending.as_ref()
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn config(&self) -> &ComposerConfig {
        &self.config
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn table(&self) -> &CorrespondenceTable {
        &self.table
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }
}

/// Runs frames from `clock` until the pending swap is committed, or returns at
/// once if nothing is pending. Returns the number of frames drawn.
pub fn run_to_completion<R: Renderer, C: FrameClock + ?Sized>(
    composer: &mut Composer<R>,
    clock: &mut C,
) -> Result<usize, ComposerError> {
    let mut frames = 0;
    loop {
        match composer.frame(clock.now())? {
            FrameOutcome::Idle => return Ok(frames),
            FrameOutcome::Committed => return Ok(frames + 1),
            FrameOutcome::Running(_) => {
                frames += 1;
                clock.schedule_frame();
            }
        }
    }
}
