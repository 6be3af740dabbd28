extern crate dot;

use std::io;
use std::io::Write;

use itertools::Itertools;

use crate::parser::*;

/// GraphViz view of an expression tree. Structurally equal subtrees share a node.
pub struct ParseTree {
    pub internal_tree: LogicExpr,
    pub nodes: Vec<LogicExpr>,
}

type GraphNode = usize;
type GraphEdge = (usize, &'static str, usize);

impl ParseTree {
    pub fn render_dot<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        dot::render(self, writer)
    }

    fn nodes_recursive(root: &LogicExpr) -> Vec<LogicExpr> {
        let this_node = vec![root.clone()];

        match root {
            LogicExpr::BinaryOp(_, l, r) => {
                let left_nodes = Self::nodes_recursive(l);
                let right_nodes = Self::nodes_recursive(r);

                this_node
                    .into_iter()
                    .chain(left_nodes)
                    .chain(right_nodes)
                    .collect()
            }
            LogicExpr::Not(f) => this_node
                .into_iter()
                .chain(Self::nodes_recursive(f))
                .collect(),
            LogicExpr::Symbol(_) => this_node,
        }
    }

    pub fn new(src: &LogicExpr) -> Self {
        Self {
            internal_tree: src.clone(),
            nodes: Self::nodes_recursive(src).into_iter().unique().collect(),
        }
    }

    fn position(&self, node: &LogicExpr) -> Option<usize> {
        self.nodes.iter().position(|n| n == node)
    }
}

impl<'a> dot::Labeller<'a, GraphNode, GraphEdge> for ParseTree {
    fn graph_id(&self) -> dot::Id<'a> {
        dot::Id::new("parse_tree").expect("cannot create Id named 'parse_tree'")
    }

    fn node_id(&self, n: &GraphNode) -> dot::Id<'a> {
        dot::Id::new(format!("n_{}", n))
            .unwrap_or_else(|_| panic!("cannot create Id named 'n_{n}'"))
    }

    fn node_label(&self, n: &GraphNode) -> dot::LabelText<'a> {
        match &self.nodes[*n] {
            LogicExpr::BinaryOp(op, _, _) => dot::LabelText::label(format!("{:?}", op)),
            LogicExpr::Not(_) => dot::LabelText::label("Not"),
            LogicExpr::Symbol(v) => dot::LabelText::label(format!("Var {}", v)),
        }
    }

    fn edge_label(&self, e: &GraphEdge) -> dot::LabelText<'a> {
        dot::LabelText::label(e.1)
    }
}

impl<'a> dot::GraphWalk<'a, GraphNode, GraphEdge> for ParseTree {
    fn nodes(&self) -> dot::Nodes<'a, GraphNode> {
        (0..self.nodes.len()).collect()
    }

    fn edges(&self) -> dot::Edges<'a, GraphEdge> {
        let mut edges: Vec<GraphEdge> = Vec::new();

        for (i, node) in self.nodes.iter().enumerate() {
            match node {
                LogicExpr::BinaryOp(_, l, r) => {
                    if let Some(target) = self.position(l) {
                        edges.push((i, "L", target));
                    }
                    if let Some(target) = self.position(r) {
                        edges.push((i, "R", target));
                    }
                }
                LogicExpr::Not(f) => {
                    if let Some(target) = self.position(f) {
                        edges.push((i, "", target));
                    }
                }
                LogicExpr::Symbol(_) => {}
            }
        }

        edges.into_iter().unique().collect()
    }

    fn source(&self, e: &GraphEdge) -> GraphNode {
        e.0
    }

    fn target(&self, e: &GraphEdge) -> GraphNode {
        e.2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_shared_subtrees() {
        let expr = parse("(a & b) + -(a & b)").expect("parse");
        let tree = ParseTree::new(&expr);

        // root, (a & b), a, b, not
        assert_eq!(tree.nodes.len(), 5);
        assert_eq!(tree.nodes[0], expr);
    }

    #[test]
    fn test_render_dot() {
        let expr = parse("-a -> b").expect("parse");
        let mut buffer = Vec::new();
        ParseTree::new(&expr)
            .render_dot(&mut buffer)
            .expect("render");

        let output = String::from_utf8(buffer).expect("utf-8");
        assert!(output.starts_with("digraph parse_tree {"));
        assert!(output.contains("n_0 -> n_1"));
        assert!(output.contains("n_0 -> n_3"));
        assert!(output.contains("n_1 -> n_2"));
        assert!(output.contains("label=\"Implies\""));
        assert!(output.contains("label=\"Var b\""));
    }
}
