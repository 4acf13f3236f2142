//! A command line tool for translating transcript changes into genomic HGVS
//! notation.
//!
//! ```shell
//! cargo run --release --bin=hgvsg --features=binaries -- \
//!     translate --old X 53239699 1642_1643GT>AA
//! ```
//!
//! Three subcommands are provided:
//!
//! * `parse` parses a genomic expression such as
//!   `5:g.149439278_149439301delinsGC`.
//! * `translate` translates a single transcript change anchored at a genomic
//!   position.
//! * `batch` translates a file of `chromosome:position:change` lines
//!   (optionally gzipped), continuing past lines that fail.

use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use clap_verbosity_flag::Verbosity;
use flate2::read::GzDecoder;
use hgvsg::Assembly;
use hgvsg::Variant;
use hgvsg::genomic;
use hgvsg::genomic::Parsed;
use hgvsg::reference;
use hgvsg::reference::Reference;
use hgvsg::transcript;
use hgvsg::transcript::Query;
use hgvsg::transcript::Resolution;
use omics::coordinate::position::Number;
use tracing::info;
use tracing::warn;
use tracing_log::AsTrace as _;
use tracing_subscriber::EnvFilter;

////////////////////////////////////////////////////////////////////////////////////////
// Reference services
////////////////////////////////////////////////////////////////////////////////////////

/// A reference sequence service.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum Service {
    /// A SeqRepo REST service.
    #[default]
    Seqrepo,

    /// The Ensembl REST API.
    Ensembl,
}

/// Options for connecting to the reference service.
#[derive(clap::Args, Debug)]
struct ReferenceArgs {
    /// The reference sequence service.
    #[arg(long, value_enum, default_value_t)]
    service: Service,

    /// The base URL of the service (defaults to the service's usual location).
    #[arg(long)]
    url: Option<String>,

    /// The timeout for each request to the service, in seconds.
    #[arg(long, default_value_t = 30)]
    timeout: u64,
}

impl ReferenceArgs {
    /// Connects to the requested service.
    fn connect(&self, assembly: Assembly) -> Result<Box<dyn Reference + Send + Sync>> {
        let timeout = Duration::from_secs(self.timeout);

        let reference: Box<dyn Reference + Send + Sync> = match self.service {
            Service::Seqrepo => {
                let mut builder = reference::seqrepo::Builder::default().timeout(timeout);
                if let Some(url) = &self.url {
                    builder = builder.base_url(url);
                }

                let seqrepo = builder.try_build().context("building SeqRepo client")?;
                info!("using SeqRepo at {}", seqrepo.base_url());
                Box::new(seqrepo)
            }
            Service::Ensembl => {
                let mut builder = reference::ensembl::Builder::default().timeout(timeout);
                if let Some(url) = &self.url {
                    builder = builder.server(assembly, url);
                }

                let ensembl = builder.try_build().context("building Ensembl client")?;
                info!("using Ensembl at {}", ensembl.server(assembly));
                Box::new(ensembl)
            }
        };

        Ok(reference)
    }
}

////////////////////////////////////////////////////////////////////////////////////////
// Output
////////////////////////////////////////////////////////////////////////////////////////

/// Prints a variant as a tab-delimited line.
fn print(variant: &Variant) {
    println!("{}\t{}", variant.region(), variant.identifier());
}

/// Opens a file of queries, decompressing it if it ends in `.gz`.
fn open(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;

    Ok(match path.extension().is_some_and(|ext| ext == "gz") {
        true => Box::new(BufReader::new(GzDecoder::new(file))),
        false => Box::new(BufReader::new(file)),
    })
}

////////////////////////////////////////////////////////////////////////////////////////
// Subcommands
////////////////////////////////////////////////////////////////////////////////////////

#[derive(Subcommand, Debug)]
enum Command {
    /// Parses a genomic expression (e.g., `17:g.7577610T>C`).
    Parse {
        /// The genomic expression.
        hgvs: String,

        /// Use the GRCh37 accessions.
        #[arg(long, visible_alias = "grch37")]
        old: bool,
    },

    /// Translates a transcript change anchored at a genomic position.
    Translate {
        /// The chromosome (`1`-`22`, `X`, or `Y`).
        chromosome: String,

        /// The 1-based genomic position of the first transcript position.
        position: Number,

        /// The transcript change (e.g., `1642_1643GT>AA`).
        change: String,

        /// Use GRCh37 instead of GRCh38.
        #[arg(long, visible_alias = "grch37")]
        old: bool,

        /// Fail when the alleles match the reference on neither strand.
        #[arg(long)]
        strict: bool,

        #[command(flatten)]
        reference: ReferenceArgs,
    },

    /// Translates a file of `chromosome:position:change` lines.
    Batch {
        /// The file of queries (optionally gzipped).
        file: PathBuf,

        /// Use GRCh37 instead of GRCh38.
        #[arg(long, visible_alias = "grch37")]
        old: bool,

        /// Fail when the alleles match the reference on neither strand.
        #[arg(long)]
        strict: bool,

        #[command(flatten)]
        reference: ReferenceArgs,
    },
}

fn parse(hgvs: &str, old: bool) -> Result<()> {
    let parser = genomic::Parser::for_assembly(Assembly::from_old_flag(old));
    let parsed = parser
        .attempt(hgvs)
        .with_context(|| format!("parsing `{hgvs}`"))?;

    if let Parsed::Fallback(_) = parsed {
        info!("`{hgvs}` was only recognized as a substitution");
    }

    print(parsed.variant());
    Ok(())
}

fn translate(
    chromosome: &str,
    position: Number,
    change: &str,
    old: bool,
    strict: bool,
    reference: &ReferenceArgs,
) -> Result<()> {
    let assembly = Assembly::from_old_flag(old);
    let translator = transcript::Builder::default()
        .reference(reference.connect(assembly)?)?
        .strict(strict)
        .try_build()?;

    let translation = translator
        .translate(chromosome, position, change, assembly)
        .with_context(|| format!("translating `{change}` at {chromosome}:{position}"))?;

    match translation.resolution() {
        Resolution::Resolved(orientation) => {
            info!("{} ({orientation})", translation.genomic())
        }
        Resolution::Mismatch(mismatch) => warn!("{mismatch}"),
        Resolution::NotApplicable => info!("{}", translation.genomic()),
    }

    print(translation.variant());
    Ok(())
}

fn batch(file: &Path, old: bool, strict: bool, reference: &ReferenceArgs) -> Result<()> {
    let assembly = Assembly::from_old_flag(old);
    let translator = transcript::Builder::default()
        .reference(reference.connect(assembly)?)?
        .strict(strict)
        .try_build()?;

    let mut malformed = 0usize;
    let mut failure = None;

    let queries = open(file)?
        .lines()
        .enumerate()
        .map_while(|(i, result)| match result {
            Ok(line) => Some((i, line)),
            Err(err) => {
                failure = Some(err);
                None
            }
        })
        .filter_map(|(i, line)| {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                return None;
            }

            match line.parse::<Query>() {
                Ok(query) => Some(query),
                Err(err) => {
                    malformed += 1;
                    warn!("line {}: {err}", i + 1);
                    None
                }
            }
        });

    let mut results = translator.translate_all(queries, assembly);
    for variant in results.by_ref() {
        print(&variant);
    }

    let summary = results.summary();
    drop(results);

    if let Some(err) = failure {
        return Err(err).with_context(|| format!("reading {}", file.display()));
    }

    info!("{summary}, {malformed} malformed");

    if summary.succeeded() == 0 && summary.total() + malformed > 0 {
        bail!("no queries in {} could be translated", file.display());
    }

    Ok(())
}

////////////////////////////////////////////////////////////////////////////////////////
// Main
////////////////////////////////////////////////////////////////////////////////////////

/// Translates transcript-relative changes into genomic HGVS notation.
#[derive(Parser)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbose: Verbosity,
}

fn main() -> Result<()> {
    let args = Args::parse();

    match std::env::var("RUST_LOG") {
        Ok(_) => tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init(),
        Err(_) => tracing_subscriber::fmt()
            .with_max_level(args.verbose.log_level_filter().as_trace())
            .with_writer(std::io::stderr)
            .init(),
    };

    match &args.command {
        Command::Parse { hgvs, old } => parse(hgvs, *old),
        Command::Translate {
            chromosome,
            position,
            change,
            old,
            strict,
            reference,
        } => translate(chromosome, *position, change, *old, *strict, reference),
        Command::Batch {
            file,
            old,
            strict,
            reference,
        } => batch(file, *old, *strict, reference),
    }
}
