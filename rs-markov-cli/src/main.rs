use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use env_logger::Env;
use log::info;
use rs_markov_core::config::DEFAULT_ALPHABET_SIZE;
use rs_markov_core::{FrequencyModel, GenerationConfig, ModelConfig, generate};

mod corpus;

#[derive(Parser, Debug)]
#[command(author, version, about = "Character-level Markov text generator", long_about = None)]
struct Cli {
	/// Increase verbosity (-v, -vv)
	#[arg(short = 'v', long, global = true, action = ArgAction::Count)]
	verbose: u8,

	/// Decrease verbosity (-q, -qq)
	#[arg(short = 'q', long, global = true, action = ArgAction::Count)]
	quiet: u8,

	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
	/// Generate a trajectory of T symbols from an order-K model of the corpus
	Generate(GenerateArgs),
	/// Print the k-gram statistics of the corpus
	Inspect(InspectArgs),
}

#[derive(Args, Debug)]
struct CorpusArgs {
	/// Read the corpus from a file instead of stdin
	#[arg(short, long, value_name = "PATH")]
	input: Option<PathBuf>,

	/// Number of symbols in the alphabet (code points 0..A)
	#[arg(long, value_name = "A", default_value_t = DEFAULT_ALPHABET_SIZE)]
	alphabet_size: usize,
}

#[derive(Args, Debug)]
struct GenerateArgs {
	/// Order of the model (k-gram length)
	#[arg(value_name = "K")]
	order: usize,

	/// Total number of symbols to emit, seed included
	#[arg(value_name = "T")]
	length: usize,

	/// Seed the random source for a reproducible trajectory
	#[arg(long, value_name = "N")]
	seed: Option<u64>,

	#[command(flatten)]
	corpus: CorpusArgs,
}

#[derive(Args, Debug)]
struct InspectArgs {
	/// Order of the model (k-gram length)
	#[arg(value_name = "K")]
	order: usize,

	/// Emit a JSON summary instead of the text listing
	#[arg(long)]
	json: bool,

	#[command(flatten)]
	corpus: CorpusArgs,
}

fn main() -> Result<()> {
	let cli = Cli::parse();
	init_logging(cli.verbose, cli.quiet);

	match cli.command {
		Commands::Generate(args) => run_generate(args),
		Commands::Inspect(args) => run_inspect(args),
	}
}

/// Sets up `env_logger` from `RUST_LOG` (default `info`); `-v`/`-q` override it.
fn init_logging(verbose: u8, quiet: u8) {
	use log::LevelFilter;

	let level = match (quiet, verbose) {
		(0, 0) => None,
		(1, _) => Some(LevelFilter::Warn),
		(q, _) if q > 1 => Some(LevelFilter::Error),
		(_, 1) => Some(LevelFilter::Debug),
		_ => Some(LevelFilter::Trace),
	};

	let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
	builder.format_timestamp_millis();
	if let Some(level) = level {
		builder.filter_level(level);
	}
	let _ = builder.try_init();
}

fn load_model(source: &CorpusArgs, order: usize) -> Result<(String, FrequencyModel)> {
	let text = corpus::read_corpus(source.input.as_deref()).with_context(|| match &source.input {
		Some(path) => format!("failed to read corpus from {}", path.display()),
		None => "failed to read corpus from stdin".to_owned(),
	})?;

	let config = ModelConfig::new(order).with_alphabet_size(source.alphabet_size);
	let model = FrequencyModel::with_config(&text, &config)
		.with_context(|| format!("failed to build an order-{order} model"))?;
	info!(
		"order-{order} model: {} distinct k-grams over {} symbols",
		model.len(),
		model.total_occurrences()
	);
	Ok((text, model))
}

fn run_generate(args: GenerateArgs) -> Result<()> {
	let (text, model) = load_model(&args.corpus, args.order)?;

	let mut config = GenerationConfig::new(args.length);
	if let Some(seed) = args.seed {
		config = config.with_seed(seed);
	}
	let mut rng = config.rng();

	let trajectory = generate(&model, &text, config.length, &mut rng)
		.with_context(|| format!("failed to generate {} symbols", config.length))?;

	let mut stdout = io::stdout().lock();
	writeln!(stdout, "{trajectory}").context("failed to write trajectory")?;
	Ok(())
}

fn run_inspect(args: InspectArgs) -> Result<()> {
	let (_, model) = load_model(&args.corpus, args.order)?;

	let mut stdout = io::stdout().lock();
	if args.json {
		serde_json::to_writer_pretty(&mut stdout, &model.summary()).context("failed to serialize summary")?;
		writeln!(stdout)?;
	} else {
		write!(stdout, "{model}").context("failed to write model listing")?;
	}
	Ok(())
}
