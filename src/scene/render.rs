//! # Rendering
//!
//! The [`Renderer`] capability a scene draws through.

use std::fmt;

use kurbo::Point;

/// Renderable primitives a [`Renderer`] knows how to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Group,
    Line,
    Curve,
    Circle,
    Text,
}

impl Primitive {
    /// SVG element name.
    pub fn tag(&self) -> &'static str {
        match self {
            Primitive::Group => "g",
            Primitive::Line => "line",
            Primitive::Curve => "path",
            Primitive::Circle => "circle",
            Primitive::Text => "text",
        }
    }
}

/// Ordered attribute list handed to the renderer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes(Vec<(&'static str, String)>);

impl Attributes {
    pub fn new() -> Self {
        Attributes(Vec::new())
    }

    /// Sets `key`, replacing an earlier value.
    pub fn with(mut self, key: &'static str, value: impl fmt::Display) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: &'static str, value: impl fmt::Display) {
        let value = value.to_string();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `transform="translate(x y)"`.
    pub fn translate(p: Point) -> Self {
        Attributes::new().with("transform", format!("translate({} {})", num(p.x), num(p.y)))
    }

    /// `x` and `y` of a text anchor.
    pub fn anchor(p: Point) -> Self {
        Attributes::new().with("x", num(p.x)).with("y", num(p.y))
    }
}

/// Formats a coordinate with two decimals, without a negative zero.
pub fn num(x: f64) -> String {
    let s = format!("{x:.2}");
    if s == "-0.00" {
        "0.00".to_string()
    } else {
        s
    }
}

/// What a click on a handle selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClickTarget {
    Position(usize),
}

/// The rendering collaborator. Handles are opaque to the scene: it stores them and
/// hands them back, nothing more. Every call is fire-and-forget.
pub trait Renderer {
    type Handle: Clone + fmt::Debug;

    fn create_node(
        &mut self,
        kind: Primitive,
        attributes: &Attributes,
        parent: Option<&Self::Handle>,
    ) -> Self::Handle;

    fn set_attributes(&mut self, handle: &Self::Handle, attributes: &Attributes);

    fn set_text(&mut self, handle: &Self::Handle, text: &str);

    fn toggle_class(&mut self, handle: &Self::Handle, class: &str);

    /// Handles currently carrying `class`.
    fn query_by_class(&self, class: &str) -> Vec<Self::Handle>;

    /// Registers `handle` as the interaction entry point for `target`.
    fn on_click(&mut self, handle: &Self::Handle, target: ClickTarget);
}
