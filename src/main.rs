use clap::{Parser, ValueEnum};
use log::{info, LevelFilter};
use std::fs::{self, File};
use std::io::{self, BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};
use truthtab::generator::{generate, GenerateError, GeneratorOptions, DEFAULT_MAX_VARIABLES};
use truthtab::output::{write_csv, write_grid};
use truthtab::parser::{parse_input, FunctionDefinition};
use truthtab::parser_io::SyntaxTree;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Bordered text table
    Grid,
    /// Comma-separated values
    Csv,
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(value_parser, value_name = "DEFINITION")]
    /// Function definitions such as "f(x,y) = x ∧ y̅"; when omitted, definitions are read interactively
    definitions: Vec<String>,

    #[clap(short, long, value_parser, value_name = "FILE", conflicts_with = "definitions")]
    /// Read function definitions from a file, one per line
    input: Option<PathBuf>,

    #[clap(short, long)]
    /// Show the evaluation steps for every function
    steps: bool,

    #[clap(short, long, value_enum, default_value_t = OutputFormat::Grid)]
    /// Output format of the truth table
    format: OutputFormat,

    #[clap(long, value_name = "N", default_value_t = DEFAULT_MAX_VARIABLES)]
    /// Refuse to tabulate more than N free variables (2^N rows)
    max_variables: usize,

    #[clap(long, value_parser, value_name = "FILE")]
    /// Write the syntax tree of every function in dot (GraphViz) format
    dot: Option<PathBuf>,

    #[clap(short, long, action = clap::ArgAction::Count)]
    /// Increase logging verbosity (RUST_LOG overrides)
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse_from(argfile::expand_args_from(
        wild::args_os(),
        argfile::parse_fromfile,
        argfile::PREFIX,
    )?);

    env_logger::Builder::new()
        .filter_level(match args.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .parse_default_env()
        .init();

    if !args.definitions.is_empty() {
        let text = args.definitions.join("\n");
        return tabulate(&args, &parse_input(&text));
    }

    if let Some(input) = &args.input {
        info!("reading definitions from {}", input.display());
        let text = fs::read_to_string(input)?;
        return tabulate(&args, &parse_input(&text));
    }

    interactive(&args)
}

/// Reads definitions from stdin until the user stops entering them.
fn interactive(args: &Args) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!("\nEnter logical functions (one per line). Enter an empty line to finish:");
        println!("Example format: g1(x,y) = (x ∨ y\u{0305}) ∧ (x ∨ y)");

        let mut input_lines = Vec::new();
        while let Some(line) = lines.next().transpose()? {
            if line.trim().is_empty() {
                break;
            }
            input_lines.push(line);
        }

        if input_lines.is_empty() {
            println!("No functions entered. Exiting...");
            return Ok(());
        }

        tabulate(args, &parse_input(&input_lines.join("\n")))?;

        print!("\nDo you want to enter more functions? (y/n): ");
        io::stdout().flush()?;

        match lines.next().transpose()? {
            Some(answer) if answer.trim().eq_ignore_ascii_case("y") => continue,
            _ => return Ok(()),
        }
    }
}

/// Generates and prints the truth table of `functions`.
///
/// Empty input and oversized tables are reported, not raised.
fn tabulate(args: &Args, functions: &[FunctionDefinition]) -> anyhow::Result<()> {
    let options = GeneratorOptions {
        max_variables: args.max_variables,
    };

    let table = match generate(functions, options) {
        Ok(table) => table,
        Err(GenerateError::NoFunctions) => {
            println!("No valid functions found. Please check your input format.");
            return Ok(());
        }
        Err(e) => {
            println!("Cannot generate truth table: {e}");
            return Ok(());
        }
    };

    if let Some(path) = &args.dot {
        write_syntax_trees(path, functions)?;
    }

    let headers = table.headers(args.steps);
    let records = table.records(args.steps);

    match args.format {
        OutputFormat::Grid => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            if args.steps {
                writeln!(writer, "\nTruth Table with Detailed Steps:")?;
            } else {
                writeln!(writer, "\nTruth Table:")?;
            }
            write_grid(&mut writer, &headers, &records)?;
            writer.flush()?;
        }
        OutputFormat::Csv => write_csv(io::stdout().lock(), &headers, &records)?,
    }

    Ok(())
}

fn write_syntax_trees(path: &Path, functions: &[FunctionDefinition]) -> anyhow::Result<()> {
    let mut f = BufWriter::new(File::create(path)?);

    for definition in functions {
        match SyntaxTree::from_definition(definition) {
            Ok(tree) => tree.render_dot(&mut f)?,
            Err(e) => log::warn!("no syntax tree for {}: {e}", definition.name),
        }
    }

    f.flush()?;
    info!("wrote syntax trees to {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_args() {
        Args::command().debug_assert();
    }

    #[test]
    fn input_file_excludes_definitions() -> Result<(), clap::Error> {
        assert!(Args::try_parse_from(["truthtab", "-i", "defs.txt", "f = x"]).is_err());

        let args = Args::try_parse_from(["truthtab", "-i", "defs.txt"])?;
        assert_eq!(args.input, Some(PathBuf::from("defs.txt")));
        assert!(args.definitions.is_empty());

        Ok(())
    }
}
