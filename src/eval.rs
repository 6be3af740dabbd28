//! Canonicalizing evaluator.
//!
//! Every subtree of an expression is turned into a [`LogicalElement`] named by its canonical
//! label. Labels double as memo keys, so structurally identical subtrees collapse into one
//! element per pass, and therefore into one column of the truth table.

use crate::parser::{BinaryOperator, LogicExpr};
use crate::symbols::Assignment;
use log::trace;
use rustc_hash::FxHashMap;

/// One distinct subexpression as seen during a single evaluation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalElement {
    /// Canonical label, also the deduplication key
    pub label: String,
    pub value: bool,
    /// A bare variable
    pub is_primitive: bool,
    /// Produced by the comma operator; never shown as a column
    pub is_join: bool,
    /// Position in the pass's registration sequence
    pub created_order: usize,
}

impl LogicalElement {
    pub const fn is_displayed(&self) -> bool {
        !self.is_join
    }

    pub const fn is_derived(&self) -> bool {
        !self.is_join && !self.is_primitive
    }
}

/// The memo table of one pass, in registration order, plus the element of the whole expression.
#[derive(Debug, Clone)]
pub struct Evaluation {
    elements: Vec<LogicalElement>,
    index: FxHashMap<String, usize>,
    root: usize,
}

impl Evaluation {
    /// Evaluate `expr` under `assignment` with a fresh memo table.
    pub fn new(expr: &LogicExpr, assignment: &Assignment) -> Self {
        let mut evaluation = Self {
            elements: Vec::new(),
            index: FxHashMap::default(),
            root: 0,
        };

        evaluation.root = evaluation.visit(expr, assignment);
        evaluation
    }

    pub fn elements(&self) -> &[LogicalElement] {
        &self.elements
    }

    pub fn root(&self) -> &LogicalElement {
        &self.elements[self.root]
    }

    pub fn get(&self, label: &str) -> Option<&LogicalElement> {
        self.index.get(label).map(|&i| &self.elements[i])
    }

    pub fn primitives(&self) -> impl Iterator<Item = &LogicalElement> {
        self.elements.iter().filter(|e| e.is_primitive)
    }

    pub fn derived(&self) -> impl Iterator<Item = &LogicalElement> {
        self.elements.iter().filter(|e| e.is_derived())
    }

    fn visit(&mut self, expr: &LogicExpr, assignment: &Assignment) -> usize {
        match expr {
            LogicExpr::Symbol(name) => {
                let value = assignment.get(name);
                self.register(name.clone(), value, true, false)
            }
            LogicExpr::Not(f) => {
                let operand = self.visit(f, assignment);
                let operand = &self.elements[operand];
                let label = format!("¬{}", operand.label);
                let value = !operand.value;
                self.register(label, value, false, false)
            }
            LogicExpr::BinaryOp(op, l, r) => {
                let l = self.visit(l, assignment);
                let r = self.visit(r, assignment);
                let (p, q) = (&self.elements[l], &self.elements[r]);

                let label = format!("({} {} {})", p.label, op.glyph(), q.label);
                let value = apply(*op, p.value, q.value);
                self.register(label, value, false, *op == BinaryOperator::Join)
            }
        }
    }

    fn register(&mut self, label: String, value: bool, is_primitive: bool, is_join: bool) -> usize {
        if let Some(&existing) = self.index.get(&label) {
            return existing;
        }

        let created_order = self.elements.len();

        trace!("#{} {} = {}", created_order, label, value);

        self.index.insert(label.clone(), created_order);
        self.elements.push(LogicalElement {
            label,
            value,
            is_primitive,
            is_join,
            created_order,
        });

        created_order
    }
}

/// Truth function of a binary operator. A join conjoins like AND.
pub const fn apply(op: BinaryOperator, p: bool, q: bool) -> bool {
    match op {
        BinaryOperator::And | BinaryOperator::Join => p && q,
        BinaryOperator::Or => p || q,
        BinaryOperator::Xor => (p || q) && !(p && q),
        BinaryOperator::Implies => !p || q,
        BinaryOperator::Iff => !(p || q) || (p && q),
    }
}
