//! Synapse CLI
//!
//! Run the neural assembly timeline and the transformation flow headlessly,
//! inspect the phase table, device heuristics and effective configuration.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::{Duration, Instant};
use synapse_animation::{
    FlowDriver, FlowTick, PhaseTimeline, TimelineController, TimelineOptions, TimerGuard,
    TransformationFlow,
};
use synapse_core::{
    Catalog, EnvMotion, FlowState, QualityTier, SceneNode, SynapseConfig, Translator, Viewport,
    PHASES,
};
use synapse_widgets::{
    format_time, recommend_quality, DeviceProbe, NativeProbe, PhaseExplainer, QualitySelector,
};
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;

use config::ConfigSource;

#[derive(Parser)]
#[command(name = "synapse")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Synapse neural assembly animation CLI", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to ./synapse.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the phase table
    Phases,

    /// Play the timeline headlessly and log its progress
    Play {
        /// Give up after this many seconds
        #[arg(short, long, default_value = "30")]
        seconds: u64,

        /// Playback speed multiplier (overrides the config)
        #[arg(long)]
        speed: Option<f64>,
    },

    /// Run the transformation flow and print the visited states
    Flow {
        /// Number of full five-state cycles
        #[arg(short, long, default_value = "1")]
        cycles: usize,

        /// Drive the flow from its real interval instead of simulating ticks
        #[arg(long)]
        realtime: bool,
    },

    /// Detect device capabilities and recommend a quality tier
    Probe,

    /// Print the effective configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over --verbose
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let (config, source) = config::resolve(cli.config.as_deref())?;
    debug!("Using configuration from {}", source);

    match cli.command {
        Commands::Phases => cmd_phases(&config),
        Commands::Play { seconds, speed } => cmd_play(&config, seconds, speed),
        Commands::Flow { cycles, realtime } => cmd_flow(&config, cycles, realtime),
        Commands::Probe => cmd_probe(&config),
        Commands::Config => cmd_config(&config, &source),
    }
}

fn catalog(config: &SynapseConfig) -> Result<Catalog> {
    Catalog::load(config.display.locale).context("Failed to load translations")
}

fn cmd_phases(config: &SynapseConfig) -> Result<()> {
    let catalog = catalog(config)?;
    for phase in PHASES.iter() {
        println!(
            "{}  {:<16} {:>5} - {:<5} {}",
            phase.index + 1,
            catalog.t(&phase.name_key(), &[]),
            format_time(phase.start_ms as f64),
            format_time(phase.end_ms as f64),
            phase.primary_color.to_hex_string(),
        );
        println!("   {}", catalog.t(&phase.description_key(), &[]));
    }
    Ok(())
}

/// A layered node grid sized for the quality tier
fn scene_nodes(tier: QualityTier) -> Vec<SceneNode> {
    const LAYERS: u32 = 5;
    let per_layer = tier.max_nodes() / LAYERS as usize;
    (0..LAYERS)
        .flat_map(|layer| {
            (0..per_layer).map(move |i| {
                SceneNode::new(
                    format!("n{}-{}", layer, i),
                    (layer as f32 + 0.5) / LAYERS as f32,
                    (i as f32 + 0.5) / per_layer as f32,
                    layer,
                )
            })
        })
        .collect()
}

fn cmd_play(config: &SynapseConfig, seconds: u64, speed: Option<f64>) -> Result<()> {
    let catalog = catalog(config)?;
    let mut quality = QualitySelector::new(config.display.quality);
    quality.detect(&NativeProbe::new());
    let nodes = scene_nodes(quality.effective_tier());

    let frame_interval = Duration::from_millis(config.timeline.frame_interval_ms);
    let loop_playback = config.timeline.loop_playback;
    let options = TimelineOptions {
        initial_speed: speed.unwrap_or(config.timeline.speed),
        ..TimelineOptions::from(&config.timeline)
    };
    let autoplay = options.autoplay;

    let controller = TimelineController::new(
        Box::new(move || {
            Box::new(
                PhaseTimeline::new()
                    .with_clock(frame_interval)
                    .with_loop(loop_playback),
            )
        }),
        options,
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_time()
        .build()
        .context("Failed to start async runtime")?;

    info!(
        "Playing {} nodes at {} quality",
        nodes.len(),
        quality.effective_tier()
    );

    runtime.block_on(async {
        controller
            .initialize(&nodes, Viewport::new(1280.0, 720.0))
            .await;
        if let Some(error) = controller.state().error {
            anyhow::bail!("Timeline unavailable: {}", error);
        }
        if controller.apply_motion_preference(&EnvMotion) {
            info!("Reduced motion requested by the environment");
        }
        if !autoplay {
            controller.play();
        }

        let explainer = PhaseExplainer::from_config(&config.display);
        let deadline = Instant::now() + Duration::from_secs(seconds);
        let mut ticker = tokio::time::interval(Duration::from_millis(250));
        let mut last_phase = None;

        loop {
            ticker.tick().await;
            let state = controller.state();
            if let Some(error) = &state.error {
                warn!("Timeline reported: {}", error);
                controller.clear_error();
            }
            if last_phase != Some(state.current_phase) {
                last_phase = Some(state.current_phase);
                let view = explainer.view(&state, &catalog);
                info!("{} - {}", view.announcement, view.description);
            }
            debug!(
                "{} / {} ({:.1}%)",
                format_time(state.elapsed_ms()),
                format_time(state.duration_ms as f64),
                state.progress * 100.0
            );

            if !state.is_playing && state.progress >= 1.0 {
                info!("Timeline complete");
                break;
            }
            if Instant::now() >= deadline {
                warn!("Stopped after {}s", seconds);
                break;
            }
        }
        Ok::<(), anyhow::Error>(())
    })?;

    debug!(
        "Final state: {}",
        serde_json::to_string_pretty(&controller.get_debug_info())?
    );
    controller.destroy();
    Ok(())
}

fn cmd_flow(config: &SynapseConfig, cycles: usize, realtime: bool) -> Result<()> {
    let catalog = catalog(config)?;
    let label = |state: FlowState| catalog.t(&format!("transformation.flow.{}", state.name()), &[]);
    let advances = cycles * FlowState::COUNT;

    let driver = if realtime {
        FlowDriver::Interval
    } else {
        FlowDriver::Manual
    };
    let flow = TransformationFlow::with_driver(TimerGuard::global(), &config.flow, driver);
    let (sender, receiver) = mpsc::channel();
    flow.on_stage_change(move |state| {
        let _ = sender.send(state);
    });

    println!("0  {:<14} {:?}", label(FlowState::Intention), FlowState::Intention.coordinates());
    flow.play();

    let mut ticks = 0usize;
    let mut visited = 0usize;
    while visited < advances {
        let state = if realtime {
            let per_state = config.flow.base_duration_ms as f64 * config.flow.specification_multiplier;
            let timeout = Duration::from_millis(per_state as u64 * 2);
            receiver
                .recv_timeout(timeout)
                .context("Flow interval stopped advancing")?
        } else {
            ticks += 1;
            let outcome = flow.tick();
            flow.settle();
            match outcome {
                FlowTick::Advanced(state) => {
                    // Drain the listener copy of this advance
                    let _ = receiver.try_recv();
                    state
                }
                _ => continue,
            }
        };
        visited += 1;
        println!("{}  {:<14} {:?}", state.index(), label(state), state.coordinates());
    }
    flow.reset();

    if !realtime {
        info!("{} advances in {} ticks of {}ms", advances, ticks, config.flow.tick_ms);
    }
    Ok(())
}

fn cmd_probe(config: &SynapseConfig) -> Result<()> {
    let catalog = catalog(config)?;
    let probe = NativeProbe::new();
    match probe.probe() {
        Ok(caps) => {
            let cores = caps
                .cpu_cores
                .map_or_else(|| "unknown".to_string(), |c| c.to_string());
            let memory = caps
                .memory_gb
                .map_or_else(|| "unknown".to_string(), |m| format!("{:.1} GB", m));
            let gpu = match caps.gpu_available {
                Some(true) => "available",
                Some(false) => "none",
                None => "unknown",
            };
            println!("CPU cores: {}", cores);
            println!("Memory:    {}", memory);
            println!("GPU:       {}", gpu);
        }
        Err(error) => warn!("Capability detection failed: {}", error),
    }

    let tier = recommend_quality(&probe);
    let mut selector = QualitySelector::new(config.display.quality);
    selector.detect(&probe);
    if let Some(hint) = selector.recommendation_label(&catalog) {
        println!("{}", hint);
    }
    println!(
        "Effective: {} (mode {})",
        selector.effective_tier(),
        selector.mode().name()
    );
    debug!("Recommended tier {} for {} max nodes", tier, tier.max_nodes());
    Ok(())
}

fn cmd_config(config: &SynapseConfig, source: &ConfigSource) -> Result<()> {
    info!("Configuration from {}", source);
    let rendered = config
        .to_toml_string()
        .context("Failed to render configuration")?;
    print!("{}", rendered);
    Ok(())
}
