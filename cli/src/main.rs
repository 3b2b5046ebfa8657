use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

use brine_fbs_compiler::error::FbsError;
use brine_fbs::{generate_swift, load_schema, namespace_prefixes, schema_to_json};

#[derive(Parser)]
#[command(name = "brine-fbs-cli")]
#[command(about = "Generate Swift from FlatBuffers schemas", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Swift code from a `.fbs` schema and everything it includes
    GenSwift {
        /// Input `.fbs` schema file
        #[arg(short, long)]
        input: PathBuf,

        /// Output `.swift` file (if omitted, prints to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Leave out `import FlatBuffersSwift`
        #[arg(long)]
        no_import: bool,
    },

    /// Print one `public enum` container per distinct namespace
    Namespaces {
        /// Input `.fbs` schema files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output `.swift` file (if omitted, prints to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the parsed schema as JSON
    Dump {
        /// Input `.fbs` schema file
        #[arg(short, long)]
        input: PathBuf,
    },
}

/// Enable with `RUST_LOG=brine_fbs=debug` or `RUST_LOG=trace`.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn write_or_print(output: Option<&PathBuf>, text: &str) -> Result<(), FbsError> {
    match output {
        Some(out_path) => {
            fs::write(out_path, text)?;
            eprintln!("Written to {}", out_path.display());
        }
        None => println!("{}", text),
    }
    Ok(())
}

fn main() -> Result<(), FbsError> {
    init_tracing();
    let cli = Cli::parse();

    match &cli.command {
        Commands::GenSwift { input, output, no_import } => {
            let swift = generate_swift(input, !no_import)?;
            tracing::info!(input = %input.display(), bytes = swift.len(), "generated swift");
            write_or_print(output.as_ref(), &swift)
        }

        Commands::Namespaces { inputs, output } => {
            let schemas = inputs
                .iter()
                .map(|path| load_schema(path))
                .collect::<Result<Vec<_>, _>>()?;
            write_or_print(output.as_ref(), &namespace_prefixes(&schemas))
        }

        Commands::Dump { input } => {
            let schema = load_schema(input)?;
            println!("{}", schema_to_json(&schema)?);
            Ok(())
        }
    }
}
