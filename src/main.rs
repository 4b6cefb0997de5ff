use clap::{Args, Parser, Subcommand};
use puc::settings::{CliOptions, Config, FormatOptions, OptionResolver};
use puc::si::{self, PucError};
use std::io::BufRead;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "puc")]
#[command(about = "Format numbers with SI prefixes and units", long_about = None)]
struct Cli {
    /// Config file with formatting defaults and unit aliases
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Format a single value
    Format {
        /// Value to format (e.g. "1030e-9")
        #[arg(allow_hyphen_values = true)]
        value: f64,

        /// Unit, optionally with " ", "_" or "!" modifiers, or @alias from the config
        unit: Option<String>,

        #[command(flatten)]
        options: FormatArgs,
    },

    /// Format every line read from stdin ("1030e-9 m" or a bare number)
    Batch {
        /// Unit for lines without one
        unit: Option<String>,

        #[command(flatten)]
        options: FormatArgs,
    },

    /// Show the SI prefix chosen for a decimal exponent
    Prefix {
        #[arg(allow_hyphen_values = true)]
        exponent: f64,
    },

    /// Print the SI prefix table
    Table,

    /// Evaluate a JSON request, e.g. '{"value": 0.911, "unit": "%"}'
    Json { request: String },
}

#[derive(Args)]
struct FormatArgs {
    /// Number of significant digits
    #[arg(short, long)]
    precision: Option<u32>,

    /// Reference values whose closest spacing sets the precision
    #[arg(short, long, value_delimiter = ',', allow_hyphen_values = true)]
    reference: Option<Vec<f64>>,

    /// Also print the multiplier and prefix
    #[arg(short, long)]
    verbose: bool,

    /// Make the output safe to use in a filename
    #[arg(short, long)]
    file_compatible: bool,
}

impl FormatArgs {
    fn to_cli_options(&self, unit: Option<String>) -> CliOptions {
        CliOptions {
            unit,
            digits: self.precision,
            references: self.reference.clone(),
            verbose: self.verbose,
            file_compatible: self.file_compatible,
        }
    }
}

fn main() {
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::empty(),
    };
    let resolver = OptionResolver::new(config);

    match cli.command {
        Commands::Format {
            value,
            unit,
            options,
        } => {
            let options = resolver.resolve(&options.to_cli_options(unit))?;
            println!("{}", render(value, &options)?);
        }
        Commands::Batch { unit, options } => batch(&resolver, unit, &options)?,
        Commands::Prefix { exponent } => {
            let prefix = si::get_prefix(exponent);
            println!(
                "exponent {} -> multiplier 10^{} prefix '{}'",
                exponent, prefix.multiplier, prefix.symbol
            );
        }
        Commands::Table => print_table(),
        Commands::Json { request } => println!("{}", si::format_json(&request)?),
    }

    Ok(())
}

fn render(value: f64, options: &FormatOptions) -> Result<String, PucError> {
    let formatted = si::format_verbose(
        value,
        &options.unit,
        &options.precision,
        options.file_compatible,
    )?;

    if options.verbose {
        Ok(format!(
            "{}\t{}\t{}",
            formatted.text, formatted.multiplier, formatted.prefix
        ))
    } else {
        Ok(formatted.text)
    }
}

fn batch(
    resolver: &OptionResolver,
    default_unit: Option<String>,
    args: &FormatArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = std::io::stdin();

    for (index, line) in stdin.lock().lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let (value, unit) = match si::split_quantity(&line) {
            Some(quantity) => quantity,
            None => {
                tracing::warn!(line = index + 1, input = %line, "not a number, skipping");
                continue;
            }
        };

        let unit = if unit.is_empty() {
            default_unit.clone()
        } else {
            Some(unit.to_string())
        };

        let options = resolver.resolve(&args.to_cli_options(unit))?;
        println!("{}", render(value, &options)?);
    }

    Ok(())
}

fn print_table() {
    println!("{:>12}  {:>10}  symbol", "exponent <=", "multiplier");
    for prefix in si::SI_PREFIXES.iter() {
        let symbol = if prefix.symbol.is_empty() {
            "(none)"
        } else {
            prefix.symbol
        };
        println!("{:>12}  {:>10}  {}", prefix.threshold, prefix.multiplier, symbol);
    }
    println!("{:>12}  {:>10}  (none)", "else", 0);
}
