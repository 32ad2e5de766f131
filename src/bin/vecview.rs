//! vecview: print derived vectors, or roll and grade a challenge.

use std::error::Error;
use std::io::Write;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tabwriter::TabWriter;
use tracing_subscriber::{fmt, EnvFilter};

use vecview_engine::{
    ChallengeEngine, ChallengeTarget, EngineConfig, RandomGenerator, RawVectorFields, Rounded,
    SceneSnapshot, Toggles,
};

#[derive(Parser)]
#[command(name = "vecview")]
#[command(about = "3D vector playground: derived vectors and challenges")]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show v1, v2, v3 and the toggled operations
    Show(ShowArgs),
    /// Generate a random challenge and grade v1/v2 against it
    Challenge(ChallengeArgs),
}

#[derive(Args)]
struct ShowArgs {
    #[arg(long, default_value = "1,2,1", allow_hyphen_values = true)]
    v1: String,
    #[arg(long, default_value = "2,-1,1", allow_hyphen_values = true)]
    v2: String,
    #[arg(long, default_value = "0,0,0", allow_hyphen_values = true)]
    v3: String,
    #[arg(long)]
    sum: bool,
    #[arg(long)]
    difference: bool,
    #[arg(long)]
    cross: bool,
    #[arg(long)]
    dot: bool,
}

#[derive(Args)]
struct ChallengeArgs {
    /// RNG seed for a reproducible challenge
    #[arg(long)]
    seed: Option<u64>,
    /// Answer for v1 (defaults to the first seed vector)
    #[arg(long, allow_hyphen_values = true)]
    v1: Option<String>,
    /// Answer for v2 (defaults to the second seed vector)
    #[arg(long, allow_hyphen_values = true)]
    v2: Option<String>,
}

fn show(args: ShowArgs, config: &EngineConfig) -> Result<(), Box<dyn Error>> {
    let snapshot = SceneSnapshot {
        v1: RawVectorFields::from_csv(&args.v1),
        v2: RawVectorFields::from_csv(&args.v2),
        v3: RawVectorFields::from_csv(&args.v3),
        toggles: Toggles {
            sum: args.sum,
            difference: args.difference,
            dot_product: args.dot,
            cross_product: args.cross,
        },
        active_challenge: None,
    };
    let view = snapshot.derive();

    let mut tw = TabWriter::new(std::io::stdout()).padding(2).minwidth(10);
    writeln!(tw, "Name\tVector\t|v|\tColor")?;
    for d in view.drawable(config.draw_epsilon) {
        writeln!(tw, "{}\t{}\t{:.2}\t{}", d.name, Rounded(&d.vector, 2), d.vector.norm(), d.color)?;
    }
    tw.flush()?;

    match &view.dot_product {
        Some(info) if args.dot => println!("v1 · v2 = {:.2}", info.scalar),
        None => println!("v1 and v2 must both be valid vectors for derived results"),
        _ => {}
    }
    Ok(())
}

async fn challenge(args: ChallengeArgs, config: &EngineConfig) -> Result<(), Box<dyn Error>> {
    let generator = match args.seed {
        Some(seed) => RandomGenerator::with_seed(seed),
        None => RandomGenerator::new(),
    };
    let engine = ChallengeEngine::with_config(Arc::new(generator), config);
    let challenge = engine.request_challenge(config.generator_request()).await?;

    println!("Operation: {}", challenge.operation());
    for (i, v) in challenge.vectors().iter().enumerate() {
        println!("Seed v{}: {}", i + 1, Rounded(v, 2));
    }
    match challenge.target() {
        ChallengeTarget::Vector(t) => println!("Target vector: {}", Rounded(&t, 2)),
        ChallengeTarget::Scalar(s) => println!("Target dot product: {s:.2}"),
    }

    let mut snapshot = SceneSnapshot::default();
    snapshot.load_challenge(challenge);
    if let Some(text) = args.v1 {
        snapshot.v1 = RawVectorFields::from_csv(&text);
    }
    if let Some(text) = args.v2 {
        snapshot.v2 = RawVectorFields::from_csv(&text);
    }

    let result = snapshot.grade(config.tolerance())?;
    println!("{}", result.feedback());
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let config = EngineConfig::default().with_env_overrides();
    let outcome = match cli.command {
        Commands::Show(args) => show(args, &config),
        Commands::Challenge(args) => challenge(args, &config).await,
    };

    if let Err(e) = outcome {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
