extern crate dot;

use std::io;
use std::io::Write;

use itertools::Itertools;

use crate::parser::*;

/// Syntax tree of a function, renderable as a GraphViz graph.
///
/// Equal subtrees share a single node.
pub struct SyntaxTree {
    pub name: String,
    pub internal_tree: Formula,
    pub nodes: Vec<Formula>,
}

type GraphNode = usize;
type GraphEdge = (usize, String, usize);

impl SyntaxTree {
    pub fn render_dot<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        dot::render(self, writer)
    }

    fn nodes_recursive(root: &Formula) -> Vec<Formula> {
        let this_node = vec![root.clone()];

        match root {
            Formula::BinaryOp(_, l, r) => {
                let left_nodes = Self::nodes_recursive(l);
                let right_nodes = Self::nodes_recursive(r);

                left_nodes
                    .into_iter()
                    .chain(right_nodes)
                    .chain(this_node)
                    .collect()
            }
            Formula::Not(f) => {
                let new_nodes = Self::nodes_recursive(f);

                new_nodes.into_iter().chain(this_node).collect()
            }
            Formula::True | Formula::False | Formula::Var(_) => this_node,
        }
    }

    /// `name` becomes the graph id; anything but ASCII alphanumerics is replaced by `_`.
    pub fn new(name: &str, src: &Formula) -> Self {
        let name = name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();

        Self {
            name,
            internal_tree: src.clone(),
            nodes: Self::nodes_recursive(src).into_iter().unique().collect(),
        }
    }

    /// Parses the expression of `definition` into a tree named after the function.
    pub fn from_definition(definition: &FunctionDefinition) -> Result<Self, ExpressionError> {
        let formula: Formula = definition.expression.parse()?;
        Ok(Self::new(&definition.name, &formula))
    }

    fn position(&self, node: &Formula) -> usize {
        self.nodes
            .iter()
            .position(|n| n == node)
            .expect("cannot find position")
    }
}

impl<'a> dot::Labeller<'a, GraphNode, GraphEdge> for SyntaxTree {
    fn graph_id(&self) -> dot::Id<'a> {
        dot::Id::new(format!("tree_{}", self.name))
            .unwrap_or_else(|_| panic!("cannot create Id named 'tree_{}'", self.name))
    }

    fn node_id(&self, n: &GraphNode) -> dot::Id<'a> {
        dot::Id::new(format!("n_{}", n))
            .unwrap_or_else(|_| panic!("cannot create Id named 'n_{n}'"))
    }

    fn node_label(&self, n: &GraphNode) -> dot::LabelText<'a> {
        match &self.nodes[*n] {
            Formula::BinaryOp(ref op, _, _) => dot::LabelText::label(format!("{:?}", op)),
            Formula::Not(_) => dot::LabelText::label("Not".to_string()),
            Formula::False => dot::LabelText::label("0".to_string()),
            Formula::True => dot::LabelText::label("1".to_string()),
            Formula::Var(v) => dot::LabelText::label(format!("Var {}", v)),
        }
    }

    fn edge_label(&self, e: &GraphEdge) -> dot::LabelText<'a> {
        dot::LabelText::label(e.1.clone())
    }
}

impl<'a> dot::GraphWalk<'a, GraphNode, GraphEdge> for SyntaxTree {
    fn nodes(&self) -> dot::Nodes<'a, GraphNode> {
        (0..self.nodes.len()).collect()
    }

    fn edges(&self) -> dot::Edges<'a, GraphEdge> {
        let mut edges: Vec<GraphEdge> = Vec::new();

        for (i, node) in self.nodes.iter().enumerate() {
            match node {
                Formula::BinaryOp(_, l, r) => {
                    edges.push((i, "L".to_string(), self.position(l)));
                    edges.push((i, "R".to_string(), self.position(r)));
                }
                Formula::Not(f) => {
                    edges.push((i, "".to_string(), self.position(f)));
                }
                Formula::False | Formula::True | Formula::Var(_) => {}
            }
        }

        edges.into()
    }

    fn source(&self, e: &GraphEdge) -> GraphNode {
        e.0
    }

    fn target(&self, e: &GraphEdge) -> GraphNode {
        e.2
    }
}
