use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use fastrand::Rng;
use plotly::{
    common::{Mode, Title},
    layout::Axis,
    Layout, Plot, Scatter,
};
use swarmfit::{
    algorithms::particles::{SwarmUpdateMethod, TrackingSwarmObserver, PSO},
    core::{CtrlCAbortSignal, Engine},
    observers::DebugObserver,
    test_functions::PressureVessel,
    Float,
};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "swarmfit",
    about = "Minimize the pressure vessel design cost with a particle swarm"
)]
struct Cli {
    /// Number of particles in the swarm
    #[arg(long, default_value_t = 50)]
    pop: usize,

    /// Number of iterations after initialization
    #[arg(long, default_value_t = 500)]
    iterations: usize,

    /// Lower velocity limit for each of the four parameters (comma separated)
    #[arg(
        long,
        value_delimiter = ',',
        num_args = 1..,
        allow_negative_numbers = true,
        default_values_t = vec![-2.0, -2.0, -2.0, -2.0]
    )]
    vmin: Vec<Float>,

    /// Upper velocity limit for each of the four parameters (comma separated)
    #[arg(
        long,
        value_delimiter = ',',
        num_args = 1..,
        allow_negative_numbers = true,
        default_values_t = vec![2.0, 2.0, 2.0, 2.0]
    )]
    vmax: Vec<Float>,

    /// Inertial weight
    #[arg(long, default_value_t = 0.6)]
    omega: Float,

    /// Cognitive weight (pull towards the particle's own best)
    #[arg(long, default_value_t = 1.7)]
    phi1: Float,

    /// Social weight (pull towards the swarm's best)
    #[arg(long, default_value_t = 1.7)]
    phi2: Float,

    /// Optional random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// When the global best becomes visible to the other particles
    #[arg(long, value_enum, default_value_t = UpdateChoice::Asynchronous)]
    update_method: UpdateChoice,

    /// Write the run summary to this file as a Python pickle
    #[arg(long)]
    output: Option<PathBuf>,

    /// Record every particle at every iteration and write them to this file as a Python pickle
    #[arg(long)]
    track: Option<PathBuf>,

    /// Draw the convergence curve (global best per iteration) to this HTML file
    #[arg(long)]
    plot: Option<PathBuf>,

    /// Log the global best after every iteration
    #[arg(long)]
    verbose: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum UpdateChoice {
    Asynchronous,
    Synchronous,
}

impl From<UpdateChoice> for SwarmUpdateMethod {
    fn from(value: UpdateChoice) -> Self {
        match value {
            UpdateChoice::Asynchronous => Self::Asynchronous,
            UpdateChoice::Synchronous => Self::Synchronous,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let rng = cli.seed.map_or_else(Rng::new, Rng::with_seed);
    let mut engine: Engine<()> = Engine::new(PSO::new(4, rng)).setup(|e| {
        e.configure(|c| {
            c.with_n_particles(cli.pop)
                .with_iterations(cli.iterations)
                .with_position_bounds(PressureVessel::default_bounds().into_inner())
                .with_velocity_limits(&cli.vmin, &cli.vmax)
                .with_omega(cli.omega)
                .with_c1(cli.phi1)
                .with_c2(cli.phi2)
                .with_update_method(cli.update_method.into())
        })
        .with_abort_signal(CtrlCAbortSignal::new())
        .with_parameter_names(["x1", "x2", "x3", "x4"].map(String::from))
    });
    if cli.verbose {
        engine.with_observer(DebugObserver::build());
    }
    let tracker = cli.track.as_ref().map(|_| TrackingSwarmObserver::build());
    if let Some(tracker) = &tracker {
        engine.with_observer(tracker.clone());
    }

    engine
        .minimize(&PressureVessel)
        .context("particle swarm run failed")?;

    println!("{}", engine.result);
    println!("Convergence:");
    for (iteration, score) in engine.result.convergence(10) {
        println!("{iteration:>8}  {score:.6e}");
    }

    if let Some(path) = &cli.plot {
        plot_convergence(&engine.result.history, path)?;
        info!(path = %path.display(), "wrote convergence plot");
    }
    if let Some(path) = &cli.output {
        let mut writer = BufWriter::new(
            File::create(path).with_context(|| format!("could not create {}", path.display()))?,
        );
        serde_pickle::to_writer(&mut writer, &engine.result, Default::default())
            .context("could not write the run summary")?;
        info!(path = %path.display(), "wrote run summary");
    }
    if let (Some(path), Some(tracker)) = (&cli.track, &tracker) {
        let mut writer = BufWriter::new(
            File::create(path).with_context(|| format!("could not create {}", path.display()))?,
        );
        serde_pickle::to_writer(&mut writer, &*tracker.read(), Default::default())
            .context("could not write the swarm history")?;
        info!(path = %path.display(), "wrote swarm history");
    }
    Ok(())
}

fn plot_convergence(history: &[Float], path: &Path) -> Result<()> {
    let iterations: Vec<usize> = (0..history.len()).collect();
    let curve = Scatter::new(iterations, history.to_vec())
        .mode(Mode::Lines)
        .name("Global best");
    let layout = Layout::new()
        .title(Title::with_text("Convergence curve"))
        .x_axis(Axis::new().title(Title::with_text("Iteration number")))
        .y_axis(Axis::new().title(Title::with_text("Global optimal value")));
    let mut plot = Plot::new();
    plot.add_trace(curve);
    plot.set_layout(layout);
    std::fs::write(path, plot.to_html())
        .with_context(|| format!("could not write {}", path.display()))
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
