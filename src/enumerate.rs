use crate::eval::Evaluation;
use crate::parser::LogicExpr;
use crate::symbols::{Assignment, VariableRegistry};
use log::{debug, trace};

/// Values of the displayed elements of one evaluation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowValues {
    /// The row index; bit `n - 1 - i` holds the value of the `i`-th discovered variable
    pub index: u128,
    pub primitives: Vec<bool>,
    pub derived: Vec<bool>,
}

/// Lazily evaluates an expression under every assignment of its free variables.
///
/// A reference pass with the empty assignment fixes the variable order, the derived labels and
/// the title. Each call to [`next`](Iterator::next) then runs one fresh pass, so dropping the
/// iterator early is enough to abort the enumeration.
#[derive(Debug, Clone)]
pub struct Enumerator<'a> {
    expr: &'a LogicExpr,
    registry: VariableRegistry,
    derived: Vec<String>,
    title: String,
    next_row: u128,
    row_count: u128,
}

impl<'a> Enumerator<'a> {
    pub fn new(expr: &'a LogicExpr) -> Self {
        let reference = Evaluation::new(expr, &Assignment::empty());

        let registry = VariableRegistry::new(reference.primitives().map(|e| e.label.as_str()));
        let derived: Vec<String> = reference.derived().map(|e| e.label.clone()).collect();
        let title = reference.root().label.clone();
        let row_count = registry.row_count();

        debug!(
            "{}: {} variable(s), {} derived column(s), {} row(s)",
            title,
            registry.len(),
            derived.len(),
            row_count
        );

        Self {
            expr,
            registry,
            derived,
            title,
            next_row: 0,
            row_count,
        }
    }

    /// Canonical label of the whole expression.
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn primitive_labels(&self) -> impl Iterator<Item = &str> {
        self.registry.symbols().iter().map(|s| s.name.as_ref())
    }

    pub fn derived_labels(&self) -> impl Iterator<Item = &str> {
        self.derived.iter().map(String::as_str)
    }

    pub fn row_count(&self) -> u128 {
        self.row_count
    }

    pub fn rows_remaining(&self) -> u128 {
        self.row_count - self.next_row
    }
}

impl Iterator for Enumerator<'_> {
    type Item = RowValues;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_row >= self.row_count {
            return None;
        }

        let index = self.next_row;
        self.next_row += 1;

        let evaluation = Evaluation::new(self.expr, &self.registry.assignment(index));

        // canonicalization depends only on the tree, never on the assignment
        debug_assert!(evaluation
            .derived()
            .map(|e| e.label.as_str())
            .eq(self.derived_labels()));

        let row = RowValues {
            index,
            primitives: evaluation.primitives().map(|e| e.value).collect(),
            derived: evaluation.derived().map(|e| e.value).collect(),
        };

        trace!("row {}: {:?} | {:?}", index, row.primitives, row.derived);

        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.rows_remaining()) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use test_log::test;

    #[test]
    fn test_reference_pass() {
        let expr = parse("(b & a) + -b").expect("parse");
        let enumerator = Enumerator::new(&expr);

        assert_eq!(enumerator.primitive_labels().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(
            enumerator.derived_labels().collect::<Vec<_>>(),
            vec!["(b ∧ a)", "¬b", "((b ∧ a) ∨ ¬b)"]
        );
        assert_eq!(enumerator.title(), "((b ∧ a) ∨ ¬b)");
        assert_eq!(enumerator.row_count(), 4);
    }

    #[test]
    fn test_rows_in_ascending_bit_order() {
        let expr = parse("a & b").expect("parse");
        let rows: Vec<RowValues> = Enumerator::new(&expr).collect();

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].primitives, vec![false, false]);
        assert_eq!(rows[1].primitives, vec![false, true]);
        assert_eq!(rows[2].primitives, vec![true, false]);
        assert_eq!(rows[3].primitives, vec![true, true]);
        assert_eq!(
            rows.iter().map(|r| r.derived[0]).collect::<Vec<_>>(),
            vec![false, false, false, true]
        );
    }

    #[test]
    fn test_single_variable() {
        let expr = parse("a").expect("parse");
        let mut enumerator = Enumerator::new(&expr);
        assert_eq!(enumerator.size_hint(), (2, Some(2)));
        assert_eq!(enumerator.title(), "a");
        assert_eq!(enumerator.derived_labels().count(), 0);

        assert!(enumerator.next().is_some());
        assert_eq!(enumerator.rows_remaining(), 1);
        assert!(enumerator.next().is_some());
        assert!(enumerator.next().is_none());
    }

    #[test]
    fn test_early_abort() {
        let expr = parse("a & b & c & d").expect("parse");
        let mut enumerator = Enumerator::new(&expr);

        let first: Vec<u128> = enumerator.by_ref().take(3).map(|r| r.index).collect();
        assert_eq!(first, vec![0, 1, 2]);
        assert_eq!(enumerator.rows_remaining(), 13);
    }
}
