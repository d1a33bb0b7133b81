//! # Scene
//!
//! The component tree drawn by a [`Composer`](crate::composer::Composer), and the
//! [`Renderer`] it draws through.
//!
//! [`pentad_scene`] describes the standard figure:
//!
//! - an outline and the frame joining the six structural positions,
//! - a labelled node per position and a marker per point,
//! - a small pentad drawing per synthematic total, on a ring of slots,
//! - captions with the cycle notations of `phi` and `psi`.

pub mod component;
pub mod memory;
pub mod render;
pub mod state;

use kurbo::Line;

use crate::{
    geometry::{EdgePath, GeometryError},
    hexad::{Duad, HUB, POINTS},
};

pub use component::{
    Binding, Component, ComponentKind, ComponentPatch, ComponentSpec, ComponentView, EdgeKind,
    NodeKind,
};
pub use memory::{MemoryRenderer, NodeId};
pub use render::{Attributes, ClickTarget, Primitive, Renderer};
pub use state::{Layout, SceneState};

/// Class shared by every node standing for structural position `k`.
pub fn position_class(k: usize) -> String {
    format!("pos-{k}")
}

pub fn pentad_scene(layout: &Layout) -> Vec<ComponentSpec> {
    let outline = ComponentSpec::new("outline", ComponentKind::Background)
        .at(layout.center)
        .attr("r", layout.main_radius)
        .class("outline");

    let frame = ComponentSpec::new("frame", ComponentKind::Group)
        .class("frame")
        .children((0..5).flat_map(|k| {
            let side = Duad::new(k, (k + 1) % 5);
            let spoke = Duad::new(k, HUB);
            [side, spoke].map(|d| {
                let line = Line::new(layout.positions[d.lo()], layout.positions[d.hi()]);
                ComponentSpec::new(format!("frame-{d}"), ComponentKind::Edge(EdgeKind::Line))
                    .with_path(EdgePath::Line(line))
            })
        }));

    let positions = ComponentSpec::new("positions", ComponentKind::Group).children(
        (0..POINTS).map(|k| {
            ComponentSpec::new(
                format!("position-{k}"),
                ComponentKind::Node(NodeKind::Labeled),
            )
            .bound(Binding::Position(k))
            .class("position")
            .class(position_class(k))
            .clickable(ClickTarget::Position(k))
        }),
    );

    let points = ComponentSpec::new("points", ComponentKind::Group).children((0..POINTS).map(
        |p| {
            ComponentSpec::new(format!("point-{p}"), ComponentKind::Node(NodeKind::Plain))
                .bound(Binding::Point(p))
                .class("point")
        },
    ));

    let pentads = ComponentSpec::new("pentads", ComponentKind::Group)
        .children((0..POINTS).map(pentad));

    let captions = [(0, "phi", Binding::PhiCycles), (1, "psi", Binding::PsiCycles)].map(
        |(i, id, binding)| {
            ComponentSpec::new(id, ComponentKind::Caption)
                .bound(binding)
                .at(layout.captions[i])
                .class("caption")
        },
    );

    let mut scene = vec![outline, frame, positions, points, pentads];
    scene.extend(captions);
    scene
}

/// Drawing of one total: its fifteen edges under its six vertices.
fn pentad(total: usize) -> ComponentSpec {
    let edges = Duad::all().map(move |duad| {
        ComponentSpec::new(
            format!("total-{total}-{duad}"),
            ComponentKind::Edge(EdgeKind::Arc),
        )
        .bound(Binding::PentadEdge { total, duad })
        .class("duad")
    });
    let vertices = (0..POINTS).map(move |vertex| {
        let kind = if vertex == HUB {
            NodeKind::Labeled
        } else {
            NodeKind::SynthemeBearing
        };
        ComponentSpec::new(
            format!("total-{total}-vertex-{vertex}"),
            ComponentKind::Node(kind),
        )
        .bound(Binding::PentadVertex { total, vertex })
        .class("vertex")
    });
    ComponentSpec::new(format!("total-{total}"), ComponentKind::Group)
        .bound(Binding::Total(total))
        .class("pentad")
        .children(edges)
        .children(vertices)
}

/// Builds every top-level component of `specs` under the renderer root.
pub fn build_scene<R: Renderer>(
    specs: &[ComponentSpec],
    state: &SceneState,
    renderer: &mut R,
) -> Result<Vec<Component<R::Handle>>, GeometryError> {
    specs
        .iter()
        .map(|spec| Component::build(spec, state, renderer, None))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{geometry::BendVariant, hexad::total_labelled, permutation::Permutation};

    #[test]
    fn standard_scene_shape() {
        let layout = Layout::new(160.0, 40.0, 320.0, BendVariant::Pentagon).unwrap();
        let phi = Permutation::identity(POINTS);
        let psi = total_labelled(Permutation::identity(POINTS));
        let state = SceneState::new(&phi, &psi, &layout);
        let mut r = MemoryRenderer::new();

        let scene = build_scene(&pentad_scene(&layout), &state, &mut r).unwrap();
        let ids: Vec<_> = scene.iter().map(Component::id).collect();
        assert_eq!(
            ids,
            ["outline", "frame", "positions", "points", "pentads", "phi", "psi"]
        );
        assert_eq!(scene[1].children().len(), 10);
        assert_eq!(scene[4].children().len(), 6);
        assert_eq!(scene[4].children()[2].children().len(), 21);

        assert_eq!(r.query_by_class(&position_class(3)).len(), 1);
        assert_eq!(r.click_targets().count(), POINTS);
        assert_eq!(r.query_by_class("duad").len(), 6 * 15);
        // every syntheme colour is used by three edges of each drawing
        assert_eq!(r.query_by_class("syntheme-0").len(), 6 * 3 + 6);

        let total = scene[4].find("total-2").unwrap();
        assert_eq!(total.location(), layout.slots[2]);
        assert_eq!(total.text(), Some("c"));
    }
}
