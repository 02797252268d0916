use clap::{ArgGroup, Parser};
use ltl2nga::automata::dot::{state_explanations, to_dot};
use ltl2nga::{translate_with_options, Options};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::error::Error;
use std::fs::File;
use std::io::{self, Read, Write};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[clap(group(
    ArgGroup::new("input_source")
        .required(false)
        .args(&["filein", "input"]),
))]
struct Args {
    /// Read the formula from a file (`-` for stdin)
    #[arg(short = 'I', long)]
    filein: Option<String>,

    /// The formula itself, in prefix notation (e.g. `U p0 p1`)
    #[arg(short = 'i', long)]
    input: Option<String>,

    /// Write the dot graph to a file (`-` for stdout)
    #[arg(short = 'O', long)]
    fileout: Option<String>,

    /// Abort if the tableau would enumerate more candidate states than this
    #[arg(long)]
    state_limit: Option<usize>,

    /// Raise the log level (-v: debug, -vv: trace)
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,

    #[arg(trailing_var_arg = true)]
    direct_input: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    let input = if let Some(file_path) = args.filein {
        if file_path == "-" {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        } else {
            let mut file = File::open(file_path)?;
            let mut buffer = String::new();
            file.read_to_string(&mut buffer)?;
            buffer
        }
    } else if let Some(input_str) = args.input {
        input_str
    } else if !args.direct_input.is_empty() {
        args.direct_input.join(" ")
    } else {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    };

    let automaton = translate_with_options(
        &input,
        Options {
            state_limit: args.state_limit,
        },
    )?;

    let output = to_dot(&automaton);
    if let Some(file_path) = args.fileout {
        if file_path == "-" {
            io::stdout().write_all(output.as_bytes())?;
        } else {
            let mut file = File::create(file_path)?;
            file.write_all(output.as_bytes())?;
        }
    } else {
        io::stdout().write_all(output.as_bytes())?;
    }

    // detailed explanation of each a_i state
    let mut stdout = io::stdout();
    for line in state_explanations(&automaton) {
        writeln!(stdout, "{line}")?;
    }

    Ok(())
}
