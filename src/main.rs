use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use log::{info, LevelFilter};
use rstruth::parser_io::ParseTree;
use rstruth::truth_table_io::{render_csv, render_html, render_latex, render_text};
use rstruth::{parse, TableOptions, TruthTable, VariableRegistry};
use std::fs::File;
use std::io;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    /// Aligned plain-text columns
    Text,
    /// Standalone HTML document
    Html,
    /// LaTeX tabular environment
    Latex,
    /// Comma separated values
    Csv,
}

#[derive(Parser, Debug)]
#[clap(author, version, about = "Prints the truth table of a propositional logic expression", long_about = None)]
struct Args {
    #[clap(value_parser, value_name = "EXPRESSION")]
    /// The expression, e.g. "(a -> b) & a, b"
    expression: Option<String>,

    #[clap(value_enum, short, long, default_value_t = Format::Text)]
    /// Output format of the truth table
    format: Format,

    #[clap(value_parser, short, long)]
    /// The output filename (or stdout if not provided)
    output: Option<PathBuf>,

    #[clap(long)]
    /// Print the parse tree in dot (GraphViz) format instead of a truth table
    dot: bool,

    #[clap(long, value_name = "N", default_value_t = 16)]
    /// Refuse expressions with more than N distinct variables
    max_vars: usize,

    #[clap(long, value_name = "LABEL", default_value = " ")]
    /// Header of the column between the variables and the derived subexpressions
    separator: String,

    #[clap(short, long, action = clap::ArgAction::Count)]
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    verbose: u8,

    #[clap(short, long)]
    /// Disable all log output
    quiet: bool,
}

fn init_logging(args: &Args) -> anyhow::Result<()> {
    let level = if args.quiet {
        LevelFilter::Off
    } else {
        match args.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    simplelog::TermLogger::init(
        level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )
    .context("cannot initialise logger")
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logging(&args)?;

    let Some(src) = args.expression.as_deref() else {
        println!("No expression");
        println!("Usage: rstruth \"logical expression\" > output.txt");
        return Ok(());
    };

    let expr = parse(src).with_context(|| format!("cannot parse expression {:?}", src))?;

    let mut writer = if let Some(output_file) = &args.output {
        let file = File::create(output_file)
            .with_context(|| format!("cannot create {}", output_file.display()))?;
        Box::new(BufWriter::new(file)) as Box<dyn Write>
    } else {
        Box::new(BufWriter::new(io::stdout())) as Box<dyn Write>
    };

    if args.dot {
        ParseTree::new(&expr).render_dot(&mut writer)?;
        writer.flush()?;
        return Ok(());
    }

    let variables = expr.symbols().len();
    let limit = args.max_vars.min(VariableRegistry::MAX_VARIABLES);
    if variables > limit {
        bail!(
            "expression has {} distinct variables, the limit is {} (see --max-vars)",
            variables,
            limit
        );
    }

    let options = TableOptions {
        separator: args.separator.clone(),
    };
    let table = TruthTable::build_with(&expr, &options);

    info!(
        "truth table for {}: {} column(s), {} row(s)",
        table.title,
        table.columns.len(),
        table.rows.len()
    );

    match args.format {
        Format::Text => render_text(&table, &mut writer),
        Format::Html => render_html(&table, &mut writer),
        Format::Latex => render_latex(&table, &mut writer),
        Format::Csv => render_csv(&table, &mut writer),
    }
    .context("cannot write truth table")?;

    writer.flush()?;

    Ok(())
}
