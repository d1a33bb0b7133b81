//! # Scene components
//!
//! A [`Component`] is a node of the scene tree. It owns one renderer handle and its
//! children, and follows the part of a [`SceneState`] named by its [`Binding`].
//!
//! The life of a component is `build`, then any number of transitions made of
//! [`Component::morph`] and [`Component::shift_between`] calls that all receive the
//! same `(old, new)` pair, then [`Component::commit`] once the transition ends.
//! Build and commit both go through [`resolve`], so a committed tree is exactly the
//! tree a fresh build from the committed state would produce.

use kurbo::Point;
use tracing::trace;

use crate::{
    geometry::{shift_point, EdgePath, GeometryError, ShiftMode},
    hexad::{Duad, HUB},
};

use super::{
    render::{num, Attributes, ClickTarget, Primitive, Renderer},
    state::SceneState,
};

/// Radius of a node marker.
pub const NODE_RADIUS: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A bare marker.
    Plain,
    /// A marker with a text label.
    Labeled,
    /// A labelled marker coloured by the syntheme through it.
    SynthemeBearing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// Drawn from its endpoints only.
    Line,
    /// Drawn as a path, straight or quadratic.
    Arc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Group,
    Background,
    Node(NodeKind),
    Edge(EdgeKind),
    Caption,
}

impl ComponentKind {
    fn primitive(&self) -> Primitive {
        match self {
            ComponentKind::Group | ComponentKind::Node(_) => Primitive::Group,
            ComponentKind::Background => Primitive::Circle,
            ComponentKind::Edge(EdgeKind::Line) => Primitive::Line,
            ComponentKind::Edge(EdgeKind::Arc) => Primitive::Curve,
            ComponentKind::Caption => Primitive::Text,
        }
    }

    fn has_label(&self) -> bool {
        matches!(
            self,
            ComponentKind::Node(NodeKind::Labeled | NodeKind::SynthemeBearing)
        )
    }
}

/// The part of a snapshot a component tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    Fixed,
    /// Marker of a point, sitting on its structural position.
    Point(usize),
    /// Label of a structural position, showing the point on it.
    Position(usize),
    /// Pentad drawing of a total, anchored on its slot.
    Total(usize),
    /// Label of one vertex of a pentad drawing.
    PentadVertex { total: usize, vertex: usize },
    /// Edge of a pentad drawing joining the points of `duad`.
    PentadEdge { total: usize, duad: Duad },
    PhiCycles,
    PsiCycles,
}

/// Terminal values folded into a component. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentPatch {
    pub location: Option<Point>,
    pub path: Option<EdgePath>,
    pub text: Option<String>,
    pub accent: Option<usize>,
}

/// What `binding` shows under `state`.
pub fn resolve(binding: Binding, state: &SceneState) -> Result<ComponentPatch, GeometryError> {
    let patch = match binding {
        Binding::Fixed => ComponentPatch::default(),
        Binding::Point(p) => ComponentPatch {
            location: Some(state.location_of_point(p)?),
            ..Default::default()
        },
        Binding::Position(k) => ComponentPatch {
            location: Some(state.location_of_position(k)?),
            text: Some(state.point_label(state.point_at(k))),
            ..Default::default()
        },
        Binding::Total(t) => ComponentPatch {
            location: Some(state.anchor_of_total(t)?),
            text: Some(state.total_label(t)),
            ..Default::default()
        },
        Binding::PentadVertex { total, vertex } => ComponentPatch {
            location: Some(state.location_of_vertex(vertex)?),
            text: Some(state.point_label(state.point_at_vertex(total, vertex)?)),
            accent: (vertex != HUB).then_some(vertex),
            ..Default::default()
        },
        Binding::PentadEdge { total, duad } => ComponentPatch {
            path: Some(state.pentad_edge(total, duad)?),
            accent: state.edge_syntheme(total, duad)?,
            ..Default::default()
        },
        Binding::PhiCycles => ComponentPatch {
            text: Some(format!("φ = {}", or_unit(state.phi().cycle_notation()))),
            ..Default::default()
        },
        Binding::PsiCycles => ComponentPatch {
            text: Some(format!("ψ = {}", or_unit(state.psi().cycle_notation()))),
            ..Default::default()
        },
    };
    Ok(patch)
}

fn or_unit(cycles: &str) -> &str {
    if cycles.is_empty() {
        "()"
    } else {
        cycles
    }
}

fn accent_class(accent: usize) -> String {
    format!("syntheme-{accent}")
}

/// Static description of a component, from which [`Component::build`] creates it.
#[derive(Debug, Clone)]
pub struct ComponentSpec {
    pub id: String,
    pub kind: ComponentKind,
    pub binding: Binding,
    pub home: Point,
    pub path: Option<EdgePath>,
    pub attributes: Attributes,
    pub click: Option<ClickTarget>,
    pub children: Vec<ComponentSpec>,
}

impl ComponentSpec {
    pub fn new(id: impl Into<String>, kind: ComponentKind) -> Self {
        ComponentSpec {
            id: id.into(),
            kind,
            binding: Binding::Fixed,
            home: Point::ZERO,
            path: None,
            attributes: Attributes::new(),
            click: None,
            children: Vec::new(),
        }
    }

    pub fn bound(mut self, binding: Binding) -> Self {
        self.binding = binding;
        self
    }

    pub fn at(mut self, home: Point) -> Self {
        self.home = home;
        self
    }

    pub fn with_path(mut self, path: EdgePath) -> Self {
        self.path = Some(path);
        self
    }

    pub fn attr(mut self, key: &'static str, value: impl std::fmt::Display) -> Self {
        self.attributes.set(key, value);
        self
    }

    /// Appends to the `class` attribute.
    pub fn class(mut self, class: impl AsRef<str>) -> Self {
        let classes = match self.attributes.get("class") {
            Some(existing) => format!("{existing} {}", class.as_ref()),
            None => class.as_ref().to_string(),
        };
        self.attributes.set("class", classes);
        self
    }

    pub fn clickable(mut self, target: ClickTarget) -> Self {
        self.click = Some(target);
        self
    }

    pub fn child(mut self, child: ComponentSpec) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = ComponentSpec>) -> Self {
        self.children.extend(children);
        self
    }
}

/// Renderer-independent view of a component, for comparisons.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentView {
    pub id: String,
    pub kind: ComponentKind,
    pub location: Point,
    pub path: Option<EdgePath>,
    pub text: Option<String>,
    pub accent: Option<usize>,
    pub children: Vec<ComponentView>,
}

#[derive(Debug, Clone)]
pub struct Component<H> {
    id: String,
    kind: ComponentKind,
    binding: Binding,
    location: Point,
    path: Option<EdgePath>,
    text: Option<String>,
    accent: Option<usize>,
    handle: H,
    label: Option<H>,
    children: Vec<Component<H>>,
}

impl<H: Clone + std::fmt::Debug> Component<H> {
    /// Creates the renderer nodes of `spec` and its descendants under `parent`.
    pub fn build<R: Renderer<Handle = H>>(
        spec: &ComponentSpec,
        state: &SceneState,
        renderer: &mut R,
        parent: Option<&H>,
    ) -> Result<Self, GeometryError> {
        let patch = resolve(spec.binding, state)?;
        let location = patch.location.unwrap_or(spec.home);

        let mut attributes = spec.attributes.clone();
        if spec.kind == ComponentKind::Background {
            attributes.set("cx", num(location.x));
            attributes.set("cy", num(location.y));
        }
        let handle = renderer.create_node(spec.kind.primitive(), &attributes, parent);
        if let ComponentKind::Node(_) = spec.kind {
            let marker = Attributes::new().with("r", num(NODE_RADIUS));
            renderer.create_node(Primitive::Circle, &marker, Some(&handle));
        }
        let label = spec.kind.has_label().then(|| {
            let attributes = Attributes::new().with("class", "label");
            renderer.create_node(Primitive::Text, &attributes, Some(&handle))
        });
        if let Some(target) = spec.click {
            renderer.on_click(&handle, target);
        }

        let mut component = Component {
            id: spec.id.clone(),
            kind: spec.kind,
            binding: spec.binding,
            location,
            path: patch.path.or(spec.path),
            text: patch.text,
            accent: None,
            handle,
            label,
            children: Vec::with_capacity(spec.children.len()),
        };
        component.set_accent(patch.accent, renderer);
        component.render(renderer);

        for child in &spec.children {
            let child = Component::build(child, state, renderer, Some(&component.handle))?;
            component.children.push(child);
        }
        Ok(component)
    }

    /// Moves the anchor from `old` to `new`. Backgrounds stay where they are.
    pub fn shift<R: Renderer<Handle = H>>(
        &mut self,
        old: Point,
        new: Point,
        t: f64,
        mode: ShiftMode,
        renderer: &mut R,
    ) {
        if self.kind == ComponentKind::Background {
            return;
        }
        self.location = shift_point(old, new, t, mode);
        self.render(renderer);
    }

    /// Shifts every component of the tree whose anchor differs between the states.
    pub fn shift_between<R: Renderer<Handle = H>>(
        &mut self,
        old: &SceneState,
        new: &SceneState,
        t: f64,
        mode: ShiftMode,
        renderer: &mut R,
    ) -> Result<(), GeometryError> {
        if let (Some(from), Some(to)) = (
            resolve(self.binding, old)?.location,
            resolve(self.binding, new)?.location,
        ) {
            if from != to {
                trace!(id = %self.id, t, "shift");
                self.shift(from, to, t, mode, renderer);
            }
        }
        for child in &mut self.children {
            child.shift_between(old, new, t, mode, renderer)?;
        }
        Ok(())
    }

    /// Interpolates the internal geometry of the tree between two states.
    ///
    /// Paths move continuously. Texts and colours are discrete: they show `old`
    /// below `t = 0.5` and `new` from there on.
    pub fn morph<R: Renderer<Handle = H>>(
        &mut self,
        old: &SceneState,
        new: &SceneState,
        t: f64,
        renderer: &mut R,
    ) -> Result<(), GeometryError> {
        let (from, to) = (resolve(self.binding, old)?, resolve(self.binding, new)?);
        if let (Some(a), Some(b)) = (from.path, to.path) {
            self.path = Some(a.lerp(&b, t));
        }
        let accented = from.accent.is_some() || to.accent.is_some();
        let shown = if t < 0.5 { from } else { to };
        if shown.text.is_some() {
            self.text = shown.text;
        }
        if accented {
            self.set_accent(shown.accent, renderer);
        }
        self.render(renderer);

        for child in &mut self.children {
            child.morph(old, new, t, renderer)?;
        }
        Ok(())
    }

    /// Folds a terminal patch into this component only.
    pub fn update<R: Renderer<Handle = H>>(&mut self, patch: ComponentPatch, renderer: &mut R) {
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(path) = patch.path {
            self.path = Some(path);
        }
        if let Some(text) = patch.text {
            self.text = Some(text);
        }
        if patch.accent.is_some() {
            self.set_accent(patch.accent, renderer);
        }
        self.render(renderer);
    }

    /// Updates the whole tree to the committed `state`.
    pub fn commit<R: Renderer<Handle = H>>(
        &mut self,
        state: &SceneState,
        renderer: &mut R,
    ) -> Result<(), GeometryError> {
        let patch = resolve(self.binding, state)?;
        self.update(patch, renderer);
        for child in &mut self.children {
            child.commit(state, renderer)?;
        }
        Ok(())
    }

    fn set_accent<R: Renderer<Handle = H>>(&mut self, accent: Option<usize>, renderer: &mut R) {
        if accent == self.accent {
            return;
        }
        if let Some(old) = self.accent {
            renderer.toggle_class(&self.handle, &accent_class(old));
        }
        if let Some(new) = accent {
            renderer.toggle_class(&self.handle, &accent_class(new));
        }
        self.accent = accent;
    }

    fn render<R: Renderer<Handle = H>>(&self, renderer: &mut R) {
        match self.kind {
            ComponentKind::Background => {}
            ComponentKind::Caption => {
                renderer.set_attributes(&self.handle, &Attributes::anchor(self.location));
                if let Some(text) = &self.text {
                    renderer.set_text(&self.handle, text);
                }
            }
            ComponentKind::Edge(kind) => {
                let mut attributes = Attributes::translate(self.location);
                if let Some(path) = &self.path {
                    match kind {
                        EdgeKind::Line => {
                            let (a, b) = (path.start(), path.end());
                            attributes.set("x1", num(a.x));
                            attributes.set("y1", num(a.y));
                            attributes.set("x2", num(b.x));
                            attributes.set("y2", num(b.y));
                        }
                        EdgeKind::Arc => attributes.set("d", path.to_svg()),
                    }
                }
                renderer.set_attributes(&self.handle, &attributes);
            }
            ComponentKind::Group | ComponentKind::Node(_) => {
                renderer.set_attributes(&self.handle, &Attributes::translate(self.location));
                if let (Some(label), Some(text)) = (&self.label, &self.text) {
                    renderer.set_text(label, text);
                }
            }
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    pub fn binding(&self) -> Binding {
        self.binding
    }

    pub fn location(&self) -> Point {
        self.location
    }

    pub fn path(&self) -> Option<&EdgePath> {
        self.path.as_ref()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn accent(&self) -> Option<usize> {
        self.accent
    }

    pub fn handle(&self) -> &H {
        &self.handle
    }

    pub fn children(&self) -> &[Component<H>] {
        &self.children
    }

    /// Depth-first search by id.
    pub fn find(&self, id: &str) -> Option<&Component<H>> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    pub fn view(&self) -> ComponentView {
        ComponentView {
            id: self.id.clone(),
            kind: self.kind,
            location: self.location,
            path: self.path,
            text: self.text.clone(),
            accent: self.accent,
            children: self.children.iter().map(Component::view).collect(),
        }
    }
}
