use std::fs;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use charlm_core::model::language_model::LanguageModel;

/// Trains a character-level window model on a corpus file and prints the
/// generated text.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
	/// Window length used as the predictive context
	window_length: usize,

	/// Seed text the generation starts from
	seed_text: String,

	/// Total length of the generated text, seed included
	target_length: usize,

	/// Path of the corpus file to train on
	corpus: PathBuf,

	/// Use an OS-seeded random source instead of the fixed seed
	#[arg(long)]
	random: bool,

	/// Seed used when --random is not set
	#[arg(long, default_value_t = 20)]
	seed: u64,

	/// Print the learned table to stderr before the generated text
	#[arg(long)]
	dump: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	tracing_subscriber::fmt::init();
	let cli = Cli::parse();

	let corpus = fs::read_to_string(&cli.corpus)?;
	info!("corpus {} loaded ({} bytes)", cli.corpus.display(), corpus.len());

	let mut model = if cli.random {
		LanguageModel::new(cli.window_length)?
	} else {
		LanguageModel::with_seed(cli.window_length, cli.seed)?
	};

	model.train(&corpus);
	info!("trained {} windows", model.table().len());

	if cli.dump {
		eprint!("{model}");
	}

	println!("{}", model.generate(&cli.seed_text, cli.target_length));

	Ok(())
}
