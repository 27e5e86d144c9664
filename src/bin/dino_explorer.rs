//! Terminal front end for the dinosaur catalog.
//!
//! Loads the catalog once, then either answers a single query (`list`,
//! `facets`, `show`), checks catalog files (`validate`), or runs an
//! interactive `browse` session over stdin/stdout.

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use dino_explorer::observability::{LogFormat, init_logging};
use dino_explorer::session::render;
use dino_explorer::{
    Catalog, CatalogError, CatalogSource, ExplorerConfig, ExplorerSession, Facet, FacetFilter,
    FacetOptions, FilterState, ImageSource, Outcome, RecordDetail, facet_counts, filter,
    run_session,
};
use std::io::{self, Write};
use std::path::PathBuf;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

#[derive(Parser, Debug)]
#[command(name = "dino-explorer", version, about = "Search and filter the dinosaur catalog")]
struct Cli {
    /// Catalog JSON file (defaults to the repository copy, then the built-in one).
    #[arg(long, global = true, env = "DINO_EXPLORER_CATALOG")]
    catalog: Option<PathBuf>,

    /// Directory that local image keys resolve against.
    #[arg(long, global = true, env = "DINO_EXPLORER_ASSETS")]
    assets: Option<PathBuf>,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the records that match the given filters.
    List(ListArgs),
    /// Print the distinct diet and period values.
    Facets(OutputArgs),
    /// Print the detail view for one record.
    Show(ShowArgs),
    /// Load catalog files and report integrity problems.
    Validate(ValidateArgs),
    /// Interactive session reading commands from stdin.
    Browse(FilterArgs),
}

#[derive(Args, Debug)]
struct FilterArgs {
    /// Case-insensitive substring of the name or description.
    #[arg(long, default_value = "")]
    search: String,
    /// Exact diet value, or "all".
    #[arg(long, default_value = "all")]
    diet: String,
    /// Exact period value, or "all".
    #[arg(long, default_value = "all")]
    period: String,
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Emit JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct ListArgs {
    #[command(flatten)]
    filter: FilterArgs,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct ShowArgs {
    /// Exact record name.
    name: String,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct ValidateArgs {
    /// Files to check; defaults to the configured catalog.
    paths: Vec<PathBuf>,
}

impl FilterArgs {
    fn state(&self) -> FilterState {
        FilterState::new(
            self.search.clone(),
            FacetFilter::parse(&self.diet),
            FacetFilter::parse(&self.period),
        )
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_format);

    let config = ExplorerConfig::resolve(cli.catalog.clone(), cli.assets.clone())?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Validate(args) => validate(&config, &args.paths, &mut out),
        Command::List(args) => list(&config.load_catalog()?, &args, &mut out),
        Command::Facets(args) => facets(&config.load_catalog()?, &args, &mut out),
        Command::Show(args) => show(&config.load_catalog()?, &args, &mut out),
        Command::Browse(args) => {
            let catalog = config.load_catalog()?;
            let mut session = ExplorerSession::with_state(&catalog, args.state());
            run_session(&mut session, io::stdin().lock(), &mut out)
        }
    }
}

fn list<W: Write>(catalog: &Catalog, args: &ListArgs, out: &mut W) -> Result<()> {
    let state = args.filter.state();
    if args.output.json {
        let visible = filter(catalog, &state);
        serde_json::to_writer_pretty(&mut *out, &visible)?;
        writeln!(out)?;
        return Ok(());
    }
    let session = ExplorerSession::with_state(catalog, state);
    render(out, &Outcome::Results(session.results()))
}

fn facets<W: Write>(catalog: &Catalog, args: &OutputArgs, out: &mut W) -> Result<()> {
    let options = FacetOptions::from_records(catalog);
    if args.json {
        serde_json::to_writer_pretty(&mut *out, &options)?;
        writeln!(out)?;
        return Ok(());
    }
    render(out, &Outcome::Facets(options))
}

fn show<W: Write>(catalog: &Catalog, args: &ShowArgs, out: &mut W) -> Result<()> {
    let Some(record) = catalog.find(&args.name) else {
        bail!("No dinosaur named '{}'", args.name);
    };
    let detail = RecordDetail::from_record(record);
    if args.output.json {
        serde_json::to_writer_pretty(&mut *out, &detail)?;
        writeln!(out)?;
        return Ok(());
    }
    render(out, &Outcome::Detail(Box::new(detail)))
}

fn validate<W: Write>(config: &ExplorerConfig, paths: &[PathBuf], out: &mut W) -> Result<()> {
    let mut targets: Vec<(String, Result<Catalog>)> = Vec::new();
    if paths.is_empty() {
        let label = match &config.catalog {
            CatalogSource::File(path) => path.display().to_string(),
            CatalogSource::Builtin => "<builtin>".to_string(),
        };
        targets.push((label, config.load_catalog()));
    } else {
        for path in paths {
            let assets = config.asset_root.as_deref().or(path.parent());
            let loaded = Catalog::load_with_assets(path, assets)
                .with_context(|| format!("loading catalog {}", path.display()));
            targets.push((path.display().to_string(), loaded));
        }
    }

    let mut failures = 0usize;
    for (label, loaded) in targets {
        match loaded {
            Ok(catalog) => write_validation(out, &label, &catalog)?,
            Err(err) => {
                failures += 1;
                let kind = if err.downcast_ref::<CatalogError>().is_some() {
                    "integrity"
                } else {
                    "load"
                };
                writeln!(out, "{label}: FAILED ({kind})\n  {err:#}")?;
            }
        }
    }

    if failures > 0 {
        bail!("{failures} catalog(s) failed validation");
    }
    Ok(())
}

fn write_validation<W: Write>(out: &mut W, label: &str, catalog: &Catalog) -> Result<()> {
    writeln!(
        out,
        "{label}: ok ({} records, schema {})",
        catalog.len(),
        catalog.schema_version()
    )?;
    for facet in [Facet::Diet, Facet::Period] {
        let counts = facet_counts(catalog, facet)
            .into_iter()
            .map(|(value, count)| format!("{value}={count}"))
            .collect::<Vec<_>>();
        writeln!(out, "  {}: {}", facet.label(), counts.join(", "))?;
    }
    for record in catalog.iter() {
        if let ImageSource::Unresolved(raw) = &record.image {
            writeln!(out, "  unresolved image for {}: {raw}", record.name)?;
        }
    }
    Ok(())
}
