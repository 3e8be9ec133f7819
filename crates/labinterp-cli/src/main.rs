mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "labinterp",
    version,
    about = "Rule-based clinical interpretation of laboratory results"
)]
struct Cli {
    /// Log rule matches and lookups to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Replacement reference data; each file overrides the bundled default.
#[derive(clap::Args)]
struct DataArgs {
    /// Test catalog JSON file
    #[arg(long, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Alias table JSON file
    #[arg(long, value_name = "FILE")]
    aliases: Option<PathBuf>,

    /// Rule table JSON file
    #[arg(long, value_name = "FILE")]
    rules: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interpret a set of results and print the report
    Interpret {
        /// Observations JSON: a list of {testName, value} or form state by category
        input_file: PathBuf,

        #[command(flatten)]
        data: DataArgs,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Print only the unique interpretation messages
        #[arg(long)]
        flat: bool,
    },
    /// Check a single value against a reference range
    Check {
        /// Result value, e.g. "105" or "Positive"
        value: String,
        /// Reference range, e.g. "70-100", "<5.7", ">40" or "Negative"
        range: String,
    },
    /// Estimated average glucose from an HbA1c percentage
    Eag {
        /// HbA1c in %
        hba1c: String,
    },
    /// Inspect and validate rule tables
    Rules {
        #[command(subcommand)]
        action: RulesAction,
    },
    /// Look up reference ranges and known interferences for a test
    Reference {
        /// Test name, as spelled in the catalog or any known alias
        test: String,

        /// Base URL of a reference provider, used when no local entry exists
        #[arg(long, env = "LABINTERP_BIOREF_URL")]
        url: Option<String>,

        /// API key for the reference provider
        #[arg(long, env = "LABINTERP_BIOREF_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Header carrying the API key
        #[arg(long, env = "LABINTERP_BIOREF_AUTH_HEADER", default_value = "Authorization")]
        auth_header: String,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
}

#[derive(Subcommand)]
enum RulesAction {
    /// List rule groups and how many rules each holds
    List {
        /// Rule table to list instead of the bundled one
        #[arg(long, value_name = "FILE")]
        rules: Option<PathBuf>,
    },
    /// Explain every rule in a group in plain language
    Explain {
        /// Group key, e.g. "Blood Sugar"
        group: String,

        /// Rule table to read instead of the bundled one
        #[arg(long, value_name = "FILE")]
        rules: Option<PathBuf>,
    },
    /// Validate a custom rule file
    Validate {
        /// Path to JSON rule file
        file: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "labinterp=debug,labinterp_core=debug"
    } else {
        "labinterp=warn,labinterp_core=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Interpret {
            input_file,
            data,
            output,
            flat,
        } => commands::interpret::run(
            input_file,
            data.catalog,
            data.aliases,
            data.rules,
            &output,
            flat,
        ),
        Commands::Check { value, range } => commands::check::check(&value, &range),
        Commands::Eag { hba1c } => commands::check::eag(&hba1c),
        Commands::Rules { action } => match action {
            RulesAction::List { rules } => commands::rules::list(rules),
            RulesAction::Explain { group, rules } => commands::rules::explain(&group, rules),
            RulesAction::Validate { file } => commands::rules::validate(&file),
        },
        Commands::Reference {
            test,
            url,
            api_key,
            auth_header,
            output,
        } => commands::reference::run(&test, url, api_key, auth_header, &output),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
