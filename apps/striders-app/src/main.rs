//! Striders robot configuration CLI.
//!
//! Provides three modes of operation:
//! - `tasks`: List registered task ids
//! - `tables`: Resolve a task's robot and print the derived parameter tables
//! - `info`: Print workspace crate versions

use clap::{Parser, Subcommand};

use striders_core::error::StridersError;
use striders_env::registry::TaskRegistry;
use striders_zoo::humanoid::name_directory;
use striders_zoo::velocity::{register_tasks, TASK_VELOCITY_ROUGH};

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

/// Striders robot configuration toolkit.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered task ids.
    Tasks,

    /// Resolve a task's robot and print the derived parameter tables.
    Tables {
        /// Task id to resolve.
        #[arg(short, long, default_value = TASK_VELOCITY_ROUGH)]
        task: String,
    },

    /// Print crate information.
    Info,
}

fn main() {
    tracing_subscriber::fmt().init();
    if let Err(e) = run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), StridersError> {
    let cli = Cli::parse();

    // The registry is built once here and passed down; task lookup never
    // relies on global state.
    let mut registry = TaskRegistry::new();
    register_tasks(&mut registry)?;

    match cli.command.unwrap_or(Commands::Tasks) {
        Commands::Tasks => {
            for id in registry.task_ids() {
                println!("{id}");
            }
        }
        Commands::Tables { task } => print_tables(&registry, &task)?,
        Commands::Info => print_info(),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Modes
// ---------------------------------------------------------------------------

fn print_tables(registry: &TaskRegistry, task: &str) -> Result<(), StridersError> {
    let env = registry.env_cfg(task)?;
    let rl = registry.rl_cfg(task)?;
    let dir = name_directory();
    let resolved = env.entity.resolve(&dir)?;

    println!("Task '{task}' (experiment '{}')", rl.experiment_name);
    println!(
        "  episode_length_s={} decimation={} terrain={}",
        env.episode_length_s,
        env.decimation,
        if env.terrain.is_some() { "rough" } else { "flat" },
    );

    println!("Joints ({}):", resolved.joints.joint_count());
    let mut joints: Vec<&String> = resolved.joints.stiffness.keys().collect();
    joints.sort();
    for joint in joints {
        let scale = resolved
            .joints
            .action_scale
            .get(joint)
            .map_or_else(|| "n/a".to_string(), |s| format!("{s:.4}"));
        println!(
            "  {joint:<28} kp={:>8.3} kd={:>7.3} effort={:>5.1} armature={:.6} scale={scale}",
            resolved.joints.stiffness[joint],
            resolved.joints.damping[joint],
            resolved.joints.effort_limit[joint],
            resolved.joints.armature[joint],
        );
    }

    println!("Geoms ({}):", resolved.geoms.len());
    let mut geoms: Vec<&String> = resolved.geoms.keys().collect();
    geoms.sort();
    for geom in geoms {
        let params = &resolved.geoms[geom];
        println!(
            "  {geom:<28} condim={:?} priority={:?} friction={:?} contype={:?} conaffinity={:?}",
            params.condim, params.priority, params.friction, params.contype, params.conaffinity,
        );
    }

    println!("Sensors ({}):", resolved.sensors.len());
    for sensor in &resolved.sensors {
        println!("  {} ({:?} vs {:?})", sensor.name, sensor.primary, sensor.secondary);
    }

    Ok(())
}

fn print_info() {
    println!("striders {}", env!("CARGO_PKG_VERSION"));
    for name in [
        "striders-core",
        "striders-actuator",
        "striders-entity",
        "striders-env",
        "striders-zoo",
    ] {
        println!("  {name}");
    }
}
