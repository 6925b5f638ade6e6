//! zkbench CLI
//!
//! Drives the benchmark circuits against one or both Groth16 proving
//! backends: artifact retrieval and backend initialization happen first,
//! outside the measured interval, then trials run strictly sequentially
//! and the per-trial latencies print as a table with a final average row.

mod circuits;

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail, ensure};
use backends::{
    ArtifactStore, BackendError, FullProver, Groth16Prover, ProvingBackend, generate_proving_key,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use harness::{TimingTable, run_trials};
use serde_json::Value;

use crate::circuits::{CircuitPlan, PLANS, PlanInput};

#[derive(Parser)]
#[command(
    name = "zkbench",
    version,
    about = "Compare Groth16 proving backends on identical circuit inputs"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a benchmark circuit against one or both proving backends
    Run(RunArgs),
    /// List the built-in benchmark circuits
    List,
}

#[derive(Args)]
struct RunArgs {
    /// Benchmark circuit to run
    #[arg(long, value_enum)]
    circuit: CircuitId,

    /// Which proving backend(s) to benchmark
    #[arg(long, value_enum, default_value = "both")]
    backend: BackendChoice,

    /// Number of timed trials per backend
    #[arg(long, default_value_t = 10)]
    iterations: u32,

    /// Base URL to fetch circuit artifacts from
    #[arg(long, env = "ZKBENCH_BASE_URL", conflicts_with = "artifacts_dir")]
    base_url: Option<String>,

    /// Local directory holding circuit artifacts
    #[arg(long, env = "ZKBENCH_ARTIFACTS_DIR")]
    artifacts_dir: Option<PathBuf>,

    /// Derive the proving key with a local circuit-specific setup instead
    /// of fetching it
    #[arg(long)]
    setup: bool,

    /// Verify one extra untimed proof per backend after the trials
    #[arg(long)]
    verify: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum CircuitId {
    Keccak256,
    Sha256,
    Rsa,
    Semaphore,
}

impl CircuitId {
    fn plan(self) -> &'static CircuitPlan {
        let name = match self {
            Self::Keccak256 => "keccak256",
            Self::Sha256 => "sha256",
            Self::Rsa => "rsa",
            Self::Semaphore => "semaphore",
        };
        circuits::find(name).expect("built-in circuit")
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum BackendChoice {
    Persistent,
    OneShot,
    Both,
}

/// Which input builder a backend run uses.
#[derive(Clone, Copy)]
enum InputShape {
    Persistent,
    OneShot,
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match Cli::parse().command {
        Command::Run(args) => run(args).await,
        Command::List => {
            list();
            Ok(())
        }
    }
}

async fn run(args: RunArgs) -> Result<()> {
    let plan = args.circuit.plan();
    let store = match (&args.base_url, &args.artifacts_dir) {
        (Some(url), None) => ArtifactStore::from_url(url.as_str())?,
        (None, Some(dir)) => ArtifactStore::from_dir(dir.clone()),
        _ => bail!("exactly one of --base-url or --artifacts-dir is required"),
    };

    // One-time setup, excluded from every measured interval.
    let circuit_wasm = store
        .materialize(plan.circuit_wasm)
        .await
        .with_context(|| format!("fetching {}", plan.circuit_wasm))?;
    let r1cs = store
        .materialize(plan.r1cs)
        .await
        .with_context(|| format!("fetching {}", plan.r1cs))?;
    let proving_key = if args.setup {
        generate_proving_key(&circuit_wasm, &r1cs)?
    } else {
        store.fetch(plan.proving_key).await.with_context(|| {
            format!(
                "fetching {}; pass --setup to derive a key locally",
                plan.proving_key
            )
        })?
    };
    let fixture = match plan.input {
        PlanInput::Fixture { artifact } => Some(
            store
                .fetch_json(artifact)
                .await
                .with_context(|| format!("fetching {artifact}"))?,
        ),
        PlanInput::Random { .. } => None,
    };

    if matches!(args.backend, BackendChoice::Persistent | BackendChoice::Both) {
        let prover = Groth16Prover::load(&circuit_wasm, &r1cs, &proving_key)?;
        bench(plan, &prover, InputShape::Persistent, fixture.as_ref(), &args).await?;
    }
    if matches!(args.backend, BackendChoice::OneShot | BackendChoice::Both) {
        let prover = FullProver::new(circuit_wasm, r1cs, proving_key);
        bench(plan, &prover, InputShape::OneShot, fixture.as_ref(), &args).await?;
    }
    Ok(())
}

async fn bench(
    plan: &CircuitPlan,
    backend: &dyn ProvingBackend,
    shape: InputShape,
    fixture: Option<&Value>,
    args: &RunArgs,
) -> Result<()> {
    tracing::info!(
        circuit = plan.name,
        backend = backend.name(),
        iterations = args.iterations,
        "running benchmark"
    );

    let samples = run_trials(
        || {
            let input = build_input(plan, shape, fixture).map_err(BackendError::from)?;
            Ok(async move { backend.prove(&input).await })
        },
        args.iterations,
    )
    .await
    .map_err(|e| anyhow!("{} benchmark failed: {e}", backend.name()))?;

    let table = TimingTable::from_samples(format!("{} / {}", plan.name, backend.name()), &samples);
    let mut stdout = std::io::stdout().lock();
    table.render(&mut stdout)?;

    if args.verify {
        let input = build_input(plan, shape, fixture)?;
        let artifact = backend.prove(&input).await?;
        let verified = backend.verify(&artifact)?;
        ensure!(verified, "{}: proof failed verification", backend.name());
        tracing::debug!(proof = %hex::encode(artifact.to_bytes()), "proof bytes");
        tracing::info!(backend = backend.name(), "proof verified");
    }
    Ok(())
}

fn build_input(
    plan: &CircuitPlan,
    shape: InputShape,
    fixture: Option<&Value>,
) -> Result<encoder::NamedCircuitInput, encoder::EncodeError> {
    match shape {
        InputShape::Persistent => plan.persistent_input(fixture),
        InputShape::OneShot => plan.one_shot_input(fixture),
    }
}

fn list() {
    for plan in &PLANS {
        println!(
            "{:<12} input: {:<38} limbs: {:<3} artifacts: {}, {}, {}",
            plan.name,
            plan.input_description(),
            plan.limb_count,
            plan.circuit_wasm,
            plan.r1cs,
            plan.proving_key,
        );
    }
}
