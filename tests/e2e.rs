use pretty_assertions::assert_eq;
use rstruth::truth_table_io::render_csv;
use rstruth::*;
use std::fs;
use std::path::Path;

fn file_table<P: AsRef<Path>>(file: P) -> TruthTable {
    let src = fs::read_to_string(file).expect("Could not open input file");
    let expr = parse(src.trim()).expect("Could not parse input file");

    build_truth_table(&expr)
}

fn file_assert_constant<P: AsRef<Path>>(file: P, expected: bool) {
    let table = file_table(file);

    let root = table
        .column_values(&table.title)
        .expect("the expression has no column of its own");

    assert!(root.iter().all(|&v| v == expected), "{}", table.title);
}

fn file_assert_csv<P: AsRef<Path>>(file: P, reference: P) {
    let table = file_table(file);

    let mut buffer = Vec::new();
    render_csv(&table, &mut buffer).expect("Could not render table");

    let rendered = String::from_utf8(buffer).expect("Rendered CSV is not UTF-8");
    let reference = fs::read_to_string(reference).expect("Could not open reference file");

    assert_eq!(rendered, reference);
}

#[test]
fn test_files_tautology() {
    for file in glob::glob("tests/data/*_is_tautology.txt").unwrap() {
        let f = file.unwrap();
        println!("testing {}", f.display());
        file_assert_constant(f, true);
    }
}

#[test]
fn test_files_contradiction() {
    for file in glob::glob("tests/data/*_is_contradiction.txt").unwrap() {
        let f = file.unwrap();
        println!("testing {}", f.display());
        file_assert_constant(f, false);
    }
}

#[test]
fn test_modus_ponens_csv() {
    file_assert_csv("tests/data/modus_ponens.txt", "tests/data/modus_ponens.csv");
}

#[test]
fn test_parity_csv() {
    file_assert_csv("tests/data/parity.txt", "tests/data/parity.csv");
}
