use crate::enumerate::{Enumerator, RowValues};
use crate::parser::LogicExpr;
use log::debug;
use std::fmt::{self, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Single cell of a truth table.
///
/// Every column that belongs to a subexpression holds either [`True`] or [`False`].
/// The separator column between the variables and the derived subexpressions
/// holds [`Blank`] in every row, so that each row is exactly as wide as the header.
///
/// [`True`]: TruthTableEntry::True
/// [`False`]: TruthTableEntry::False
/// [`Blank`]: TruthTableEntry::Blank
pub enum TruthTableEntry {
    /// The subexpression is true under this row's assignment
    True,
    /// The subexpression is false under this row's assignment
    False,
    /// Separator cell, carries no value
    Blank,
}

impl TruthTableEntry {
    pub fn is_blank(self) -> bool {
        self == Self::Blank
    }

    pub const fn as_bool(self) -> Option<bool> {
        match self {
            Self::True => Some(true),
            Self::False => Some(false),
            Self::Blank => None,
        }
    }
}

impl From<bool> for TruthTableEntry {
    fn from(value: bool) -> Self {
        if value {
            Self::True
        } else {
            Self::False
        }
    }
}

impl Display for TruthTableEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::True => "1",
            Self::False => "0",
            Self::Blank => "",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// A free variable
    Primitive,
    /// The divider between variables and derived subexpressions
    Separator,
    /// A compound subexpression
    Derived,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub label: String,
    pub kind: ColumnKind,
}

impl Column {
    pub fn new(label: &str, kind: ColumnKind) -> Self {
        Self {
            label: label.to_string(),
            kind,
        }
    }

    pub fn is_primitive(&self) -> bool {
        self.kind == ColumnKind::Primitive
    }

    pub fn is_separator(&self) -> bool {
        self.kind == ColumnKind::Separator
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub entries: Vec<TruthTableEntry>,
}

impl Row {
    fn new(values: RowValues) -> Self {
        let entries = values
            .primitives
            .into_iter()
            .map(TruthTableEntry::from)
            .chain([TruthTableEntry::Blank])
            .chain(values.derived.into_iter().map(TruthTableEntry::from))
            .collect();

        Self { entries }
    }

    /// The boolean cells, separator skipped.
    pub fn values(&self) -> impl Iterator<Item = bool> + '_ {
        self.entries.iter().filter_map(|e| e.as_bool())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOptions {
    /// Label of the separator column
    pub separator: String,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            separator: " ".to_string(),
        }
    }
}

/// Column headers and one row per assignment, ready to be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthTable {
    /// Canonical label of the whole expression
    pub title: String,
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
}

impl TruthTable {
    /// See [`build_truth_table`](crate::build_truth_table) for the width limit.
    pub fn build(expr: &LogicExpr) -> Self {
        Self::build_with(expr, &TableOptions::default())
    }

    pub fn build_with(expr: &LogicExpr, options: &TableOptions) -> Self {
        let enumerator = Enumerator::new(expr);
        let (title, columns) = Self::header(&enumerator, options);
        let rows = enumerator.map(Row::new).collect();

        Self::assemble(title, columns, rows)
    }

    /// Like [`build_with`](Self::build_with), but consults `proceed` with the index of every row
    /// before computing it. Returns `None` as soon as `proceed` declines.
    pub fn build_until<F>(expr: &LogicExpr, options: &TableOptions, mut proceed: F) -> Option<Self>
    where
        F: FnMut(u128) -> bool,
    {
        let mut enumerator = Enumerator::new(expr);
        let (title, columns) = Self::header(&enumerator, options);
        let mut rows = Vec::new();

        loop {
            let index = enumerator.row_count() - enumerator.rows_remaining();
            if enumerator.rows_remaining() > 0 && !proceed(index) {
                debug!("enumeration aborted before row {}", index);
                return None;
            }

            match enumerator.next() {
                Some(values) => rows.push(Row::new(values)),
                None => break,
            }
        }

        Some(Self::assemble(title, columns, rows))
    }

    fn header(enumerator: &Enumerator<'_>, options: &TableOptions) -> (String, Vec<Column>) {
        let columns = enumerator
            .primitive_labels()
            .map(|label| Column::new(label, ColumnKind::Primitive))
            .chain([Column::new(&options.separator, ColumnKind::Separator)])
            .chain(
                enumerator
                    .derived_labels()
                    .map(|label| Column::new(label, ColumnKind::Derived)),
            )
            .collect();

        (enumerator.title().to_string(), columns)
    }

    fn assemble(title: String, columns: Vec<Column>, rows: Vec<Row>) -> Self {
        debug_assert!(rows.iter().all(|row| row.entries.len() == columns.len()));

        debug!("{}: {} column(s) x {} row(s)", title, columns.len(), rows.len());

        Self {
            title,
            columns,
            rows,
        }
    }

    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| !c.is_separator() && c.label == label)
    }

    /// Every row's value for the column labelled `label`.
    pub fn column_values(&self, label: &str) -> Option<Vec<bool>> {
        let index = self.column_index(label)?;
        self.rows
            .iter()
            .map(|row| row.entries[index].as_bool())
            .collect()
    }

    pub fn primitive_count(&self) -> usize {
        self.columns.iter().filter(|c| c.is_primitive()).count()
    }

    pub fn derived_count(&self) -> usize {
        self.columns
            .iter()
            .filter(|c| c.kind == ColumnKind::Derived)
            .count()
    }
}
