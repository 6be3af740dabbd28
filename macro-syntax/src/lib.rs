pub use rstruth;

/// Build the truth table of an inline expression, e.g. `truth_table!(a & -b, c)`.
///
/// Panics when the tokens do not form a valid expression.
#[macro_export]
macro_rules! truth_table {
    ($($expr:tt)+) => {{
        let input = stringify!($($expr)+);
        let expr = $crate::rstruth::parse(input).expect("could not parse expression");

        $crate::rstruth::build_truth_table(&expr)
    }};
}
