//! # Scene state
//!
//! The fixed [`Layout`] of the figure and the [`SceneState`] lookups over it.

use kurbo::{Point, Rect, Vec2};

use crate::{
    geometry::{
        edge_path, pentad_layout, ring_layout, BendTable, BendVariant, EdgePath, GeometryError,
    },
    hexad::{Duad, Pentad, HUB, POINTS, TOTALS},
    permutation::{Key, Permutation, PermutationError},
};

/// Vertex space of a single pentad drawing: corner `v` is vertex `v`, the hub is [`HUB`].
pub const VERTICES: Pentad = Pentad::new([0, 1, 2, 3, 4], HUB);

/// Fixed coordinates of the whole figure.
///
/// Structural positions form a large pentad around `center`. Every total is drawn
/// as a small pentad anchored on one of six slots around it; `vertices` are the
/// local offsets of its corners and hub.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub center: Point,
    pub main_radius: f64,
    pub slot_radius: f64,
    pub pentad_radius: f64,
    pub positions: [Point; POINTS],
    pub slots: Vec<Point>,
    pub vertices: [Point; POINTS],
    pub bends: BendTable,
    /// For each slot, the vertex showing each structural position.
    pub placements: Vec<Permutation>,
    pub captions: [Point; 2],
}

impl Layout {
    pub fn new(
        main_radius: f64,
        pentad_radius: f64,
        slot_radius: f64,
        variant: BendVariant,
    ) -> Result<Self, PermutationError> {
        let center = Point::ZERO;
        let placements = TOTALS
            .iter()
            .map(|total| {
                let vertices: Vec<usize> = (0..POINTS).map(|k| total.vertex_of(k)).collect();
                Permutation::from_array(&vertices)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let below = center + Vec2::new(-slot_radius, slot_radius + 2.0 * pentad_radius);
        Ok(Layout {
            center,
            main_radius,
            slot_radius,
            pentad_radius,
            positions: pentad_layout(center, main_radius),
            slots: ring_layout(center, slot_radius, POINTS),
            vertices: pentad_layout(Point::ZERO, pentad_radius),
            bends: BendTable::for_variant(variant),
            placements,
            captions: [below, below + Vec2::new(0.0, 24.0)],
        })
    }

    /// Area covering every slot and both captions.
    pub fn view_box(&self) -> Rect {
        let half = self.slot_radius + 2.0 * self.pentad_radius + 40.0;
        Rect::from_center_size(self.center, (2.0 * half, 2.0 * half))
    }
}

fn at(points: &[Point], i: usize) -> Result<Point, GeometryError> {
    points.get(i).copied().ok_or(GeometryError::UnknownPosition(i))
}

/// Snapshot of the figure under one `(phi, psi)` pair.
///
/// `phi` sends points to structural positions and `psi` sends totals to slots.
/// The snapshot borrows everything and has no behaviour beyond lookups, so the
/// old and new states of a transition are cheap to build every frame.
#[derive(Debug, Clone, Copy)]
pub struct SceneState<'a> {
    phi: &'a Permutation,
    psi: &'a Permutation,
    layout: &'a Layout,
}

impl<'a> SceneState<'a> {
    pub fn new(phi: &'a Permutation, psi: &'a Permutation, layout: &'a Layout) -> Self {
        SceneState { phi, psi, layout }
    }

    pub fn phi(&self) -> &'a Permutation {
        self.phi
    }

    pub fn psi(&self) -> &'a Permutation {
        self.psi
    }

    pub fn layout(&self) -> &'a Layout {
        self.layout
    }

    pub fn position_of(&self, point: usize) -> usize {
        self.phi.map_index(point)
    }

    pub fn point_at(&self, position: usize) -> usize {
        self.phi.inverse_index(position)
    }

    pub fn slot_of(&self, total: usize) -> usize {
        self.psi.map_index(total)
    }

    pub fn location_of_point(&self, point: usize) -> Result<Point, GeometryError> {
        at(&self.layout.positions, self.position_of(point))
    }

    pub fn location_of_position(&self, position: usize) -> Result<Point, GeometryError> {
        at(&self.layout.positions, position)
    }

    /// Anchor of the pentad drawing of `total`.
    pub fn anchor_of_total(&self, total: usize) -> Result<Point, GeometryError> {
        at(&self.layout.slots, self.slot_of(total))
    }

    /// Offset of `vertex` inside any pentad drawing.
    pub fn location_of_vertex(&self, vertex: usize) -> Result<Point, GeometryError> {
        at(&self.layout.vertices, vertex)
    }

    fn placement(&self, total: usize) -> Result<&'a Permutation, GeometryError> {
        let slot = self.slot_of(total);
        self.layout
            .placements
            .get(slot)
            .ok_or(GeometryError::UnknownPosition(slot))
    }

    /// The vertex at which `point` is drawn inside the diagram of `total`: the place
    /// of `phi(point)` in the canonical layout of slot `psi(total)`.
    pub fn vertex_of(&self, total: usize, point: usize) -> Result<usize, GeometryError> {
        Ok(self.placement(total)?.map_index(self.position_of(point)))
    }

    /// The point drawn at `vertex` of the diagram of `total`.
    pub fn point_at_vertex(&self, total: usize, vertex: usize) -> Result<usize, GeometryError> {
        Ok(self.point_at(self.placement(total)?.inverse_index(vertex)))
    }

    /// Edge of the diagram of `total` joining the two points of `duad`.
    pub fn pentad_edge(&self, total: usize, duad: Duad) -> Result<EdgePath, GeometryError> {
        let remap = self.phi.compose(self.placement(total)?);
        edge_path(
            duad,
            &self.layout.vertices,
            HUB,
            &self.layout.bends,
            Some(&remap),
        )
    }

    /// Colour of an edge: the syntheme of the drawing it currently belongs to.
    pub fn edge_syntheme(&self, total: usize, duad: Duad) -> Result<Option<usize>, GeometryError> {
        let (a, b) = (
            self.vertex_of(total, duad.lo())?,
            self.vertex_of(total, duad.hi())?,
        );
        Ok(VERTICES.syntheme_of(Duad::new(a, b)))
    }

    pub fn point_label(&self, point: usize) -> String {
        self.phi.label(&Key::Index(point)).into_owned()
    }

    pub fn total_label(&self, total: usize) -> String {
        self.psi.label(&Key::Index(total)).into_owned()
    }
}
