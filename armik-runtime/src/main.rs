// Copyright (C) 2024 Laixer Equipment B.V.
// All rights reserved.
//
// This software may be modified and distributed under the terms
// of the included license.  See the LICENSE file for details.

use std::path::PathBuf;

use clap::{Parser, ValueHint};

use armik::command::ServoCommand;
use armik::core::{InverseKinematics, Target};
use armik::path::{Arc, Line, Path, Sweep};

#[derive(Parser)]
#[command(author = "Copyright (C) 2024 Laixer Equipment B.V.")]
#[command(version, propagate_version = true)]
#[command(about = "Armik arm kinematics tool", long_about = None)]
struct Args {
    /// Configuration file.
    #[arg(short, long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,
    /// Level of verbosity.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Commands.
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Solve a single target.
    Solve {
        /// Target X.
        #[arg(allow_negative_numbers = true)]
        x: f64,
        /// Target Y.
        #[arg(allow_negative_numbers = true)]
        y: f64,
        /// Target Z.
        #[arg(allow_negative_numbers = true)]
        z: f64,
        /// Append the gripper angles.
        #[arg(long, value_enum)]
        gripper: Option<GripperState>,
    },
    /// Sweep a path through the solver.
    Sweep {
        #[command(subcommand)]
        path: PathCommand,
    },
    /// Jog the arm from standard input.
    Jog,
    /// Sample the reachable workspace.
    Sample {
        /// Grid spacing.
        #[arg(long)]
        step: Option<u32>,
    },
}

#[derive(clap::Subcommand)]
enum PathCommand {
    /// Full circle around the base.
    Circle {
        /// Circle radius.
        #[arg(long, default_value_t = 100.0)]
        radius: f64,
        /// Circle height.
        #[arg(long, default_value_t = -100.0, allow_negative_numbers = true)]
        height: f64,
        /// Number of points.
        #[arg(long, default_value_t = 360)]
        samples: usize,
    },
    /// Half circle in front of the base.
    Semicircle {
        /// Circle radius.
        #[arg(long, default_value_t = 100.0)]
        radius: f64,
        /// Circle height.
        #[arg(long, default_value_t = 120.0, allow_negative_numbers = true)]
        height: f64,
        /// Number of points.
        #[arg(long, default_value_t = 180)]
        samples: usize,
    },
    /// Straight line between two points.
    Line {
        /// Start point as X,Y,Z.
        #[arg(long, value_parser = parse_target, allow_hyphen_values = true)]
        from: Target,
        /// End point as X,Y,Z.
        #[arg(long, value_parser = parse_target, allow_hyphen_values = true)]
        to: Target,
        /// Number of points.
        #[arg(long, default_value_t = 50)]
        samples: usize,
    },
    /// Targets from a JSON program file.
    Program {
        /// Program file.
        #[arg(value_hint = ValueHint::FilePath)]
        path: PathBuf,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum GripperState {
    Open,
    Closed,
}

fn parse_target(s: &str) -> Result<Target, String> {
    let values = s
        .split(',')
        .map(|v| v.trim().parse::<f64>().map_err(|e| e.to_string()))
        .collect::<Result<Vec<_>, _>>()?;

    match values.as_slice() {
        [x, y, z] => Ok(Target::new(*x, *y, *z)),
        _ => Err(format!("expected X,Y,Z, got '{}'", s)),
    }
}

fn main() -> anyhow::Result<()> {
    use log::LevelFilter;

    let args = Args::parse();

    let mut log_config = simplelog::ConfigBuilder::new();
    log_config.set_time_level(LevelFilter::Off);
    log_config.set_thread_level(LevelFilter::Off);
    log_config.set_target_level(LevelFilter::Off);
    log_config.set_location_level(LevelFilter::Off);

    let log_level = match args.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    simplelog::TermLogger::init(
        log_level,
        log_config.build(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let config = match &args.config {
        Some(path) => std::fs::read_to_string(path)?.parse::<armik::Config>()?,
        None => {
            let local_config = std::env::current_dir()?.join(armik::consts::LOCAL_CONFIG_FILE);

            // Try read configuration from global system location first, then from local directory.
            armik::Config::try_from_file(vec![
                PathBuf::from(armik::consts::DEFAULT_CONFIG_PATH),
                local_config,
            ])?
        }
    };

    log::debug!("Configured: {}", config);
    log::trace!("{:#?}", config);

    let solver = config.solver();

    match args.command {
        Command::Solve { x, y, z, gripper } => {
            let target = Target::new(x, y, z);

            let angles = solver
                .solve(&target)
                .angles()
                .ok_or_else(|| anyhow::anyhow!("Target point {} is out of reach", target))?;

            let command = match gripper {
                Some(GripperState::Open) => ServoCommand::with_gripper(angles, config.gripper.open),
                Some(GripperState::Closed) => {
                    ServoCommand::with_gripper(angles, config.gripper.closed)
                }
                None => ServoCommand::new(angles),
            };

            println!("{}", command);
        }
        Command::Sweep { path } => {
            let targets: Vec<Target> = match path {
                PathCommand::Circle {
                    radius,
                    height,
                    samples,
                } => Arc::circle(radius, height, samples).targets(),
                PathCommand::Semicircle {
                    radius,
                    height,
                    samples,
                } => Arc::semicircle(radius, height, samples).targets(),
                PathCommand::Line { from, to, samples } => Line::new(from, to, samples).targets(),
                PathCommand::Program { path } => {
                    armik::program::Program::load(&path)?.into_iter().collect()
                }
            };

            sweep(&solver, targets, config.bounds);
        }
        Command::Jog => jog(&solver, &config)?,
        Command::Sample { step } => {
            let step = step.unwrap_or(config.sampler.step);
            sample(&solver, step, config.sampler.margin);
        }
    }

    Ok(())
}

fn sweep(solver: &InverseKinematics, targets: Vec<Target>, bounds: armik::workspace::Bounds) {
    log::info!("Starting path sweep of {} points", targets.len());

    let mut skipped = 0;

    for (target, solution) in Sweep::new(solver, targets).bounded(bounds) {
        match ServoCommand::from_solution(solution) {
            Some(command) => {
                log::debug!("Moving to {} -> {}", target, command);
                println!("{}", command);
            }
            None => {
                log::warn!("Skipping point {}: out of reach", target);
                skipped += 1;
            }
        }
    }

    log::info!("Path sequence complete, {} points skipped", skipped);
}

fn jog(solver: &InverseKinematics, config: &armik::Config) -> anyhow::Result<()> {
    use armik::jog::{Jog, JogCommand};

    fn print_help() {
        println!("Commands:");
        println!("  x+ | x-  X axis (left/right)");
        println!("  y+ | y-  Y axis (up/down)");
        println!("  z+ | z-  Z axis (forward/back)");
        println!("  g        toggle gripper");
        println!("  r        reset to home");
        println!("  ?        help");
        println!("  q        quit");
    }

    fn send(jog: &Jog, solver: &InverseKinematics) {
        match jog.command(solver) {
            Some(command) => println!("{}", command),
            None => log::warn!("Position {} unreachable", jog.position()),
        }
    }

    let mut jog = Jog::from_config(config);

    print_help();
    send(&jog, solver);

    for line in std::io::stdin().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<JogCommand>() {
            Ok(command) => command,
            Err(e) => {
                log::error!("{}", e);
                continue;
            }
        };

        match command {
            JogCommand::Quit => break,
            JogCommand::Help => print_help(),
            command => {
                if jog.apply(command) {
                    log::debug!("Position: {} Gripper: {}", jog.position(), jog.gripper());
                    send(&jog, solver);
                }
            }
        }
    }

    log::info!("Controller stopped");

    Ok(())
}

fn sample(solver: &InverseKinematics, step: u32, margin: u32) {
    log::info!("Starting workspace analysis (step: {})", step);

    let start = std::time::Instant::now();

    let report = armik::workspace::Sampler::new(step, margin).run(solver);

    let spot_target = Target::from(armik::consts::SPOT_CHECK_TARGET);
    let spot = solver.solve(&spot_target);

    println!("Successes: {}", report.reachable.len());
    println!("Failures: {}", report.unreachable);
    println!("Reachable: {:.1}%", report.ratio() * 100.0);
    println!("Time elapsed: {:.2} seconds", start.elapsed().as_secs_f64());
    println!(
        "Specific test {}: {}",
        spot_target,
        if spot.is_reachable() {
            "SUCCESS"
        } else {
            "FAILED"
        }
    );
}
