//! An in-memory [`Renderer`] that records the scene it is asked to draw.
//!
//! Used by the tests and the command line tool. The recorded tree can be written
//! out as an SVG document with [`MemoryRenderer::svg`].

use std::{collections::BTreeSet, fmt};

use indexmap::IndexMap;
use kurbo::Rect;

use super::render::{num, Attributes, ClickTarget, Primitive, Renderer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq)]
pub struct MemoryNode {
    pub kind: Primitive,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub attributes: IndexMap<&'static str, String>,
    pub text: Option<String>,
    pub classes: BTreeSet<String>,
    pub click: Option<ClickTarget>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryRenderer {
    nodes: Vec<MemoryNode>,
    writes: usize,
}

impl MemoryRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, id: NodeId) -> &MemoryNode {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of attribute, text and class updates since creation.
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn attribute(&self, id: NodeId, key: &str) -> Option<&str> {
        self.node(id).attributes.get(key).map(String::as_str)
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.node(id).text.as_deref()
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.node(id).classes.contains(class)
    }

    pub fn click_targets(&self) -> impl Iterator<Item = (NodeId, ClickTarget)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| n.click.map(|c| (NodeId(i), c)))
    }

    fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.parent.is_none())
            .map(|(i, _)| NodeId(i))
    }

    /// The recorded scene as an SVG document over `view_box`.
    pub fn svg(&self, view_box: Rect) -> SvgDocument<'_> {
        SvgDocument {
            renderer: self,
            view_box,
        }
    }

    fn apply(&mut self, id: NodeId, attributes: &Attributes) {
        let node = &mut self.nodes[id.0];
        for (key, value) in attributes.iter() {
            if key == "class" {
                node.classes
                    .extend(value.split_whitespace().map(str::to_string));
            } else {
                node.attributes.insert(key, value.to_string());
            }
        }
    }
}

impl Renderer for MemoryRenderer {
    type Handle = NodeId;

    fn create_node(
        &mut self,
        kind: Primitive,
        attributes: &Attributes,
        parent: Option<&NodeId>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(MemoryNode {
            kind,
            parent: parent.copied(),
            children: Vec::new(),
            attributes: IndexMap::new(),
            text: None,
            classes: BTreeSet::new(),
            click: None,
        });
        self.apply(id, attributes);
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        }
        id
    }

    fn set_attributes(&mut self, handle: &NodeId, attributes: &Attributes) {
        self.writes += 1;
        self.apply(*handle, attributes);
    }

    fn set_text(&mut self, handle: &NodeId, text: &str) {
        self.writes += 1;
        self.nodes[handle.0].text = Some(text.to_string());
    }

    fn toggle_class(&mut self, handle: &NodeId, class: &str) {
        self.writes += 1;
        let classes = &mut self.nodes[handle.0].classes;
        if !classes.remove(class) {
            classes.insert(class.to_string());
        }
    }

    fn query_by_class(&self, class: &str) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.classes.contains(class))
            .map(|(i, _)| NodeId(i))
            .collect()
    }

    fn on_click(&mut self, handle: &NodeId, target: ClickTarget) {
        self.nodes[handle.0].click = Some(target);
    }
}

pub struct SvgDocument<'a> {
    renderer: &'a MemoryRenderer,
    view_box: Rect,
}

impl SvgDocument<'_> {
    fn write_node(&self, f: &mut fmt::Formatter<'_>, id: NodeId, depth: usize) -> fmt::Result {
        let node = self.renderer.node(id);
        let indent = "  ".repeat(depth);
        write!(f, "{indent}<{}", node.kind.tag())?;
        for (key, value) in &node.attributes {
            write!(f, " {key}=\"{}\"", escape(value))?;
        }
        if !node.classes.is_empty() {
            let classes: Vec<&str> = node.classes.iter().map(String::as_str).collect();
            write!(f, " class=\"{}\"", classes.join(" "))?;
        }

        match (&node.text, node.children.is_empty()) {
            (None, true) => writeln!(f, "/>"),
            (Some(text), true) => writeln!(f, ">{}</{}>", escape(text), node.kind.tag()),
            (text, false) => {
                writeln!(f, ">")?;
                if let Some(text) = text {
                    writeln!(f, "{indent}  {}", escape(text))?;
                }
                for child in &node.children {
                    self.write_node(f, *child, depth + 1)?;
                }
                writeln!(f, "{indent}</{}>", node.kind.tag())
            }
        }
    }
}

impl fmt::Display for SvgDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let vb = self.view_box;
        writeln!(
            f,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"{} {} {} {}\">",
            num(vb.x0),
            num(vb.y0),
            num(vb.width()),
            num(vb.height())
        )?;
        for root in self.renderer.roots() {
            self.write_node(f, root, 1)?;
        }
        writeln!(f, "</svg>")
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    #[test]
    fn records_tree_and_updates() {
        let mut r = MemoryRenderer::new();
        let g = r.create_node(
            Primitive::Group,
            &Attributes::translate(Point::new(1.0, 2.0)).with("class", "a b"),
            None,
        );
        let t = r.create_node(Primitive::Text, &Attributes::new(), Some(&g));
        r.set_text(&t, "x < y");
        r.toggle_class(&g, "b");
        r.toggle_class(&g, "selected");
        r.on_click(&g, ClickTarget::Position(3));

        assert_eq!(r.node(g).children, vec![t]);
        assert_eq!(r.attribute(g, "transform"), Some("translate(1.00 2.00)"));
        assert!(r.has_class(g, "selected"));
        assert!(!r.has_class(g, "b"));
        assert_eq!(r.query_by_class("a"), vec![g]);
        assert_eq!(r.writes(), 3);
        assert_eq!(
            r.click_targets().collect::<Vec<_>>(),
            vec![(g, ClickTarget::Position(3))]
        );

        let svg = r.svg(Rect::new(0.0, 0.0, 10.0, 10.0)).to_string();
        insta::assert_snapshot!(svg, @r#"
        <svg xmlns="http://www.w3.org/2000/svg" viewBox="0.00 0.00 10.00 10.00">
          <g transform="translate(1.00 2.00)" class="a selected">
            <text>x &lt; y</text>
          </g>
        </svg>
        "#);
    }
}
