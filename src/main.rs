use clap::{Parser as ClapParser, Subcommand};
use jsonb_field::cli::{self, CheckOptions, CliError, CompileOptions};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "jsonb-field")]
#[command(about = "Render and evaluate jsonb column lookups such as field__k__l=\"m\"")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render conditions as a SQL WHERE body with bound parameters
    Compile {
        /// Conditions of the form path=operand (operand is JSON or a bare string)
        #[arg(required = true)]
        conditions: Vec<String>,

        /// Name of the jsonb column
        #[arg(short, long, default_value = "field")]
        column: String,

        /// Table or alias qualifying the column
        #[arg(short, long)]
        table: Option<String>,

        /// Use $1, $2, ... placeholders instead of %s
        #[arg(long)]
        numbered: bool,
    },

    /// Apply conditions to a JSON array of rows and print the matches
    Check {
        /// Conditions of the form path=operand (operand is JSON or a bare string)
        #[arg(required = true)]
        conditions: Vec<String>,

        /// Name of the jsonb column
        #[arg(short, long, default_value = "field")]
        column: String,

        /// JSON rows (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate the conditions, don't read rows
        #[arg(long)]
        syntax_only: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compile {
            conditions,
            column,
            table,
            numbered,
        } => run_compile(CompileOptions {
            column,
            table,
            conditions,
            numbered,
        }),
        Commands::Check {
            conditions,
            column,
            input,
            pretty,
            syntax_only,
        } => run_check(conditions, column, input, pretty, syntax_only),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_compile(options: CompileOptions) -> Result<(), CliError> {
    let compiled = cli::execute_compile(&options)?;
    println!("{}", compiled.sql);
    for (position, param) in compiled.params.iter().enumerate() {
        println!("  ${} = {}", position + 1, param);
    }
    Ok(())
}

fn run_check(
    conditions: Vec<String>,
    column: String,
    input: Option<String>,
    pretty: bool,
    syntax_only: bool,
) -> Result<(), CliError> {
    let input = match input {
        Some(s) => Some(s),
        None if !syntax_only && !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Some(buffer)
        }
        None => None,
    };

    let options = CheckOptions {
        column,
        conditions,
        input,
        syntax_only,
    };

    let result = cli::execute_check(&options)?;
    println!("{}", result.render(pretty));
    Ok(())
}
