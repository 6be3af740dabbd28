//! Renderers that turn a [`TruthTable`] into text, HTML, LaTeX or CSV.

use crate::truth_table::TruthTable;
use itertools::Itertools;
use std::io;
use std::io::Write;

const HTML_STYLE: &str = concat!(
    "*{margin:0; padding:0;}",
    "body{font-family:\"Helvetica Neue\", sans-serif; padding:20px;}",
    "h1{margin:10px 0px;font-weight:normal;}",
    "table{text-align:center;border-collapse:collapse;}",
    "tr:nth-child(odd){background:#eee}",
    "td,th{padding:2px 5px;border:1px solid #ccc;}",
);

/// Aligned plain-text table; every cell is centred under its header.
pub fn render_text<W: Write>(table: &TruthTable, writer: &mut W) -> io::Result<()> {
    let widths: Vec<usize> = table
        .columns
        .iter()
        .map(|c| c.label.chars().count().max(1))
        .collect();

    writeln!(writer, "Truth table for {}", table.title)?;
    writeln!(writer)?;

    let header = table
        .columns
        .iter()
        .zip(&widths)
        .map(|(c, &w)| format!("{:^w$}", c.label))
        .join("  ");
    writeln!(writer, "{}", header.trim_end())?;

    let rule = table
        .columns
        .iter()
        .zip(&widths)
        .map(|(c, &w)| if c.is_separator() { " ".repeat(w) } else { "-".repeat(w) })
        .join("  ");
    writeln!(writer, "{}", rule.trim_end())?;

    for row in &table.rows {
        let line = row
            .entries
            .iter()
            .zip(&widths)
            .map(|(e, &w)| format!("{:^w$}", e))
            .join("  ");
        writeln!(writer, "{}", line.trim_end())?;
    }

    Ok(())
}

/// Standalone HTML document with a heading and a zebra-striped table.
pub fn render_html<W: Write>(table: &TruthTable, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "<!DOCTYPE html>")?;
    write!(
        writer,
        "<h1>Truth table for {}</h1>",
        escape_html(&table.title)
    )?;
    write!(writer, "<style>{}</style>", HTML_STYLE)?;
    write!(writer, "<table>")?;

    write!(
        writer,
        "<tr><th>{}</th></tr>",
        table
            .columns
            .iter()
            .map(|c| escape_html(&c.label))
            .join("</th><th>")
    )?;

    for row in &table.rows {
        write!(
            writer,
            "<tr><td>{}</td></tr>",
            row.entries.iter().join("</td><td>")
        )?;
    }

    writeln!(writer, "</table>")?;

    Ok(())
}

/// A `tabular` environment; the separator column becomes a vertical rule.
pub fn render_latex<W: Write>(table: &TruthTable, writer: &mut W) -> io::Result<()> {
    let alignment: String = table
        .columns
        .iter()
        .map(|c| if c.is_separator() { '|' } else { 'c' })
        .collect();

    writeln!(writer, "% truth table for {}", table.title)?;
    writeln!(writer, "\\begin{{tabular}}{{{}}}", alignment)?;

    let header = table
        .columns
        .iter()
        .filter(|c| !c.is_separator())
        .map(|c| format!("${}$", latex_label(&c.label)))
        .join(" & ");
    writeln!(writer, "{} \\\\", header)?;
    writeln!(writer, "\\hline")?;

    for row in &table.rows {
        writeln!(writer, "{} \\\\", row.values().map(u8::from).join(" & "))?;
    }

    writeln!(writer, "\\end{{tabular}}")?;

    Ok(())
}

/// CSV with a header record; the separator column is left out.
pub fn render_csv<W: Write>(table: &TruthTable, writer: &mut W) -> io::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(
        table
            .columns
            .iter()
            .filter(|c| !c.is_separator())
            .map(|c| c.label.as_str()),
    )?;

    for row in &table.rows {
        csv_writer.write_record(row.values().map(|v| if v { "1" } else { "0" }))?;
    }

    csv_writer.flush()
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            c => escaped.push(c),
        }
    }

    escaped
}

fn latex_label(label: &str) -> String {
    let mut latex = String::with_capacity(label.len() * 2);

    for c in label.chars() {
        match c {
            '∧' => latex.push_str("\\land"),
            '∨' => latex.push_str("\\lor"),
            '⊕' => latex.push_str("\\oplus"),
            '→' => latex.push_str("\\rightarrow"),
            '≡' => latex.push_str("\\equiv"),
            '¬' => latex.push_str("\\lnot "),
            c => latex.push(c),
        }
    }

    latex
}
