use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use semconv_audit::config::{DEFAULT_MAX_EXAMPLES, RegistryOptions};
use semconv_audit::diagnostics::InputError;
use semconv_audit::model::{self, FilterReport, PresenceRatio};
use semconv_audit::{Result, load, render};

#[derive(Parser)]
#[command(name = "semconv-audit")]
#[command(version)]
#[command(about = "Semantic-convention audit for captured spans", long_about = None)]
struct Cli {
    /// Verbose diagnostics on stderr (overrides RUST_LOG)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split checker violations into real issues, known SDK lag and unknown deprecations.
    Filter {
        /// Analysis document with a top-level `violations` list.
        #[arg(long)]
        analysis: PathBuf,

        /// Output path (default: <analysis>_filtered.json).
        #[arg(short = 'o', long)]
        out: Option<PathBuf>,
    },

    /// Infer a semantic-convention registry from a captured span corpus.
    Registry {
        /// JSON array of span records.
        #[arg(long)]
        spans: PathBuf,

        #[arg(short = 'o', long)]
        out: PathBuf,

        /// Registry namespace (default: first span's service.name, else "myapp").
        #[arg(long)]
        namespace: Option<String>,

        /// Presence percentage above which a span attribute is `required`.
        #[arg(long, default_value_t = PresenceRatio::DEFAULT_PERCENT)]
        required_percent: u32,

        /// Examples kept per attribute.
        #[arg(long, default_value_t = DEFAULT_MAX_EXAMPLES)]
        max_examples: usize,

        /// Keep only the N most frequent attributes per span group.
        #[arg(long)]
        max_span_attributes: Option<usize>,
    },
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match cli.cmd {
        Commands::Filter { analysis, out } => {
            let out = out.unwrap_or_else(|| load::filtered_output_path(&analysis));

            // 1) Load the checker output.
            let document = load::load_analysis(&analysis)?;

            // 2) Classify + recommend.
            let report = FilterReport::from_analysis(document)
                .map_err(|e| InputError::malformed(&analysis, e.to_string()))?;

            // 3) Write report.
            let json = render::render_filter_report(&report)?;
            load::write_text(&out, &json)?;
            print!("{}", render::filter_summary(&report, &out)?);
        }
        Commands::Registry {
            spans,
            out,
            namespace,
            required_percent,
            max_examples,
            max_span_attributes,
        } => {
            let options = RegistryOptions {
                required_percent,
                max_examples,
                max_span_attributes,
            };

            // 1) Load the corpus.
            let corpus = load::load_spans(&spans)?;
            let namespace = match namespace
                .as_deref()
                .map(model::registry::normalize_namespace)
            {
                Some(ns) if !ns.is_empty() => ns,
                _ => model::namespace_from_spans(&corpus),
            };

            // 2) Aggregate.
            let stats = model::aggregate(&corpus);

            // 3) Synthesize + write YAML.
            let registry = model::synthesize(&stats, &namespace, &options);
            let yaml = render::render_registry(&registry)?;
            load::write_text(&out, &yaml)?;
            print!("{}", render::registry_summary(&stats, &registry, &out)?);
        }
    }

    Ok(())
}
