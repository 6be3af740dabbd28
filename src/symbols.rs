use log::{debug, warn};
use rustc_hash::FxHashMap;
use std::{
    fmt::{self, Display},
    rc::Rc,
};

/// A free variable of an expression, numbered in discovery order.
#[derive(Debug, Clone)]
pub struct NamedSymbol {
    pub name: Rc<str>,
    pub id: usize,
}

impl fmt::Display for NamedSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.name, f)
    }
}

/// Maps every free variable to the bit of the row index that drives it.
///
/// The first discovered variable owns the most significant bit and the last one owns bit 0,
/// so the leftmost column changes slowest when rows are enumerated in ascending order.
#[derive(Debug, Clone, Default)]
pub struct VariableRegistry {
    symbols: Vec<NamedSymbol>,
    index: FxHashMap<Rc<str>, usize>,
}

impl VariableRegistry {
    /// Widest registry whose row count fits a `u128`. Beyond it the row count saturates at
    /// `u128::MAX`, and variables whose bit would lie past bit 127 read as false in every row.
    pub const MAX_VARIABLES: usize = 127;

    pub fn new<'a, I>(names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut registry = Self::default();

        for name in names {
            if registry.index.contains_key(name) {
                continue;
            }

            let symbol = NamedSymbol {
                name: Rc::from(name),
                id: registry.symbols.len(),
            };

            registry.index.insert(symbol.name.clone(), symbol.id);
            registry.symbols.push(symbol);
        }

        debug!(
            "registered {} variable(s): {}",
            registry.len(),
            registry
        );

        if registry.len() > Self::MAX_VARIABLES {
            warn!(
                "{} variables exceed the {}-variable row index, the table is incomplete",
                registry.len(),
                Self::MAX_VARIABLES
            );
        }

        registry
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbols(&self) -> &[NamedSymbol] {
        &self.symbols
    }

    /// Bit position of `symbol` within a row index.
    pub fn bit(&self, symbol: &NamedSymbol) -> usize {
        self.len() - 1 - symbol.id
    }

    /// Number of rows needed to enumerate every assignment, `u128::MAX` past
    /// [`MAX_VARIABLES`](Self::MAX_VARIABLES).
    pub fn row_count(&self) -> u128 {
        u32::try_from(self.len())
            .ok()
            .and_then(|n| 1u128.checked_shl(n))
            .unwrap_or(u128::MAX)
    }

    /// The assignment that belongs to row `row`.
    pub fn assignment(&self, row: u128) -> Assignment {
        let values = self
            .symbols
            .iter()
            .map(|symbol| {
                let value = u32::try_from(self.bit(symbol))
                    .ok()
                    .and_then(|bit| row.checked_shr(bit))
                    .is_some_and(|shifted| shifted & 1 == 1);
                (symbol.name.clone(), value)
            })
            .collect();

        Assignment { values }
    }
}

impl Display for VariableRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, symbol) in self.symbols.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}=bit{}", symbol, self.bit(symbol))?;
        }
        Ok(())
    }
}

/// Truth values for the variables of one evaluation pass.
///
/// Variables without a value read as false; the empty assignment is used by the
/// reference pass, which only cares about structure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    values: FxHashMap<Rc<str>, bool>,
}

impl Assignment {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> bool {
        self.values.get(name).copied().unwrap_or(false)
    }
}

impl<'a> FromIterator<(&'a str, bool)> for Assignment {
    fn from_iter<T: IntoIterator<Item = (&'a str, bool)>>(iter: T) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(name, value)| (Rc::from(name), value))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_first_symbol_owns_highest_bit() {
        let registry = VariableRegistry::new(["a", "b", "c", "a"]);

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.row_count(), 8);

        let bits: Vec<usize> = registry
            .symbols()
            .iter()
            .map(|s| registry.bit(s))
            .collect();
        assert_eq!(bits, vec![2, 1, 0]);
    }

    #[test]
    fn test_assignment_from_row() {
        let registry = VariableRegistry::new(["a", "b"]);

        let row2 = registry.assignment(2);
        assert!(row2.get("a"));
        assert!(!row2.get("b"));

        let row1 = registry.assignment(1);
        assert!(!row1.get("a"));
        assert!(row1.get("b"));
    }

    #[test]
    fn test_empty_registry() {
        let registry = VariableRegistry::new(Vec::<&str>::new());

        assert!(registry.is_empty());
        assert_eq!(registry.row_count(), 1);
        assert_eq!(registry.assignment(0), Assignment::empty());
    }

    #[test]
    fn test_row_count_saturates_past_the_limit() {
        let names: Vec<String> = (0..VariableRegistry::MAX_VARIABLES + 2)
            .map(|i| format!("v{}", i))
            .collect();
        let registry = |n: usize| VariableRegistry::new(names[..n].iter().map(String::as_str));

        let widest = registry(VariableRegistry::MAX_VARIABLES);
        assert_eq!(widest.row_count(), 1u128 << 127);
        assert!(widest.assignment(1u128 << 126).get("v0"));

        assert_eq!(registry(128).row_count(), u128::MAX);

        // v0 would need bit 128
        let too_wide = registry(129);
        assert_eq!(too_wide.row_count(), u128::MAX);
        assert!(!too_wide.assignment(u128::MAX - 1).get("v0"));
        assert!(too_wide.assignment(u128::MAX - 1).get("v1"));
    }

    #[test]
    fn test_unknown_variables_are_false() {
        let assignment: Assignment = [("p", true)].into_iter().collect();

        assert!(assignment.get("p"));
        assert!(!assignment.get("q"));
    }
}
