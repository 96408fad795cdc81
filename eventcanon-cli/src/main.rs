use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use eventcanon_core::config::{parse_toggles, CanonConfig};
use eventcanon_core::logging::init_tracing;
use eventcanon_protocol::{Event, Metadata};
use eventcanon_rules::{RuleEngine, RuleRegistry, Verdict};
use tracing::{info, warn};

mod report;

use report::{print_domains, print_dropped, print_rules};

#[derive(Parser)]
#[command(name = "eventcanon")]
#[command(about = "Filter and rename tracking events into the canonical analytics taxonomy", long_about = None)]
struct Cli {
    /// Rule file or directory layered over the built-in tables
    #[arg(long, global = true, env = "EVENTCANON_RULES_PATH")]
    rules_path: Option<PathBuf>,
    /// Rules to switch on, as comma separated domain/rule_id entries
    #[arg(long, global = true)]
    enable: Option<String>,
    /// Rules to switch off, as comma separated domain/rule_id entries
    #[arg(long, global = true)]
    disable: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one event, or NDJSON events from a file or stdin
    Evaluate(EvaluateArgs),
    /// Show a domain's allowlist and rules in scan order
    Rules {
        #[arg(short, long)]
        domain: String,
    },
    /// List registered domains
    Domains,
    /// Show version information
    Version,
}

#[derive(Args)]
struct EvaluateArgs {
    #[arg(short, long)]
    domain: String,
    /// Single event as inline JSON
    #[arg(short, long, conflicts_with = "file")]
    event: Option<String>,
    /// NDJSON file, one event per line (stdin when omitted)
    #[arg(short, long)]
    file: Option<PathBuf>,
    /// Metadata JSON passed along with every event
    #[arg(long)]
    metadata: Option<String>,
    /// Report dropped events and the reason on stderr
    #[arg(long, default_value_t = false)]
    explain: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = CanonConfig::from_env().context("loading configuration")?;
    init_tracing(config.log_level.as_deref().or(Some("warn")))
        .context("initialising logging")?;

    if cli.rules_path.is_some() {
        config.rules_path = cli.rules_path.clone();
    }
    if let Some(raw) = &cli.enable {
        config.enable_rules = parse_toggles(raw).context("parsing --enable")?;
    }
    if let Some(raw) = &cli.disable {
        config.disable_rules = parse_toggles(raw).context("parsing --disable")?;
    }

    let registry = || RuleRegistry::from_config(&config).context("building rule registry");

    match cli.command {
        Commands::Evaluate(args) => {
            let engine = registry()?.engine(&args.domain)?;
            let metadata = match &args.metadata {
                Some(raw) => {
                    Metadata::new(serde_json::from_str(raw).context("parsing --metadata")?)
                }
                None => Metadata::empty(),
            };
            let stdout = io::stdout();
            let mut out = stdout.lock();

            match (&args.event, &args.file) {
                (Some(raw), _) => {
                    let event: Event = serde_json::from_str(raw).context("parsing --event")?;
                    emit(&engine, event, &metadata, args.explain, &mut out)?;
                }
                (None, Some(path)) => {
                    let file = File::open(path)
                        .with_context(|| format!("opening {}", path.display()))?;
                    let reader = BufReader::new(file);
                    evaluate_lines(&engine, reader, &metadata, args.explain, &mut out)?;
                }
                (None, None) => {
                    let stdin = io::stdin();
                    evaluate_lines(&engine, stdin.lock(), &metadata, args.explain, &mut out)?;
                }
            }
        }
        Commands::Rules { domain } => {
            let engine = registry()?.engine(&domain)?;
            print_rules(engine.rule_set());
        }
        Commands::Domains => print_domains(&registry()?),
        Commands::Version => {
            println!("eventcanon v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn evaluate_lines<R: BufRead, W: Write>(
    engine: &RuleEngine,
    reader: R,
    metadata: &Metadata,
    explain: bool,
    out: &mut W,
) -> Result<()> {
    let (mut seen, mut forwarded) = (0usize, 0usize);
    for (index, line) in reader.lines().enumerate() {
        let line = line.context("reading events")?;
        if line.trim().is_empty() {
            continue;
        }
        seen += 1;
        match serde_json::from_str::<Event>(&line) {
            Ok(event) => {
                if emit(engine, event, metadata, explain, out)? {
                    forwarded += 1;
                }
            }
            Err(err) => warn!(line = index + 1, error = %err, "skipping malformed event"),
        }
    }
    info!(domain = %engine.domain(), seen, forwarded, "evaluation finished");
    if seen > 0 && forwarded == 0 && explain {
        eprintln!("no events forwarded");
    }
    Ok(())
}

fn emit<W: Write>(
    engine: &RuleEngine,
    event: Event,
    metadata: &Metadata,
    explain: bool,
    out: &mut W,
) -> Result<bool> {
    let original = event.name().map(str::to_owned);
    match engine.evaluate(event, metadata) {
        Verdict::Transformed(event) => {
            serde_json::to_writer(&mut *out, &event)?;
            writeln!(out)?;
            Ok(true)
        }
        Verdict::Dropped(reason) => {
            if explain {
                print_dropped(original.as_deref(), reason);
            }
            Ok(false)
        }
    }
}
