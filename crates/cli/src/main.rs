#![deny(unsafe_code)]
//! Headless command-line front end for the electrostatic field visualizer.
//!
//! Subcommands:
//! - `render [INPUTS]...`: run N ticks, write the intensity map as PNG
//! - `probe [INPUTS]...`: run N ticks, print the probe series
//! - `sample [INPUTS]... --x X --y Y`: print the field at a world point
//! - `export [INPUTS]... -o FILE`: write the charges as a charge list file
//! - `list`: print the built-in scenarios
//!
//! `INPUTS` are classified like the classic launch arguments: an integer picks
//! a scenario, an existing file is loaded as a charge list.

mod error;

use clap::{Args, Parser, Subcommand};
use efield_core::{
    write_charge_list, GridSpacing, LaunchArgs, ProbeSample, Session, SimulationConfig, Vector2D,
    Viewport, SCENARIOS,
};
use efield_render::{render, RenderOptions};
use error::CliError;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "efield", about = "Electrostatic field visualizer")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

/// Arguments shared by every command that builds a session.
#[derive(Args)]
struct SessionArgs {
    /// Scenario number (0-4) and/or path to a charge list file.
    #[arg(allow_negative_numbers = true)]
    inputs: Vec<String>,

    /// Viewport width in pixels.
    #[arg(short = 'W', long, default_value_t = 800)]
    width: usize,

    /// Viewport height in pixels.
    #[arg(short = 'H', long, default_value_t = 800)]
    height: usize,

    /// Simulation settings as a JSON object (see `list --json`).
    #[arg(long, default_value = "{}")]
    params: String,
}

#[derive(Subcommand)]
enum Command {
    /// Advance the simulation and write the intensity map as a PNG.
    Render {
        #[command(flatten)]
        session: SessionArgs,

        /// Background grid spacing as <W>x<H> pixels.
        #[arg(short = 'g', long = "grid")]
        grid: Option<GridSpacing>,

        /// Number of ticks to run before rendering.
        #[arg(short, long, default_value_t = 0)]
        steps: usize,

        /// Output file path.
        #[arg(short, long, default_value = "field.png")]
        output: PathBuf,

        /// Draw only the intensity map.
        #[arg(long)]
        no_overlay: bool,
    },
    /// Run the probes and print their field magnitude series.
    Probe {
        #[command(flatten)]
        session: SessionArgs,

        /// Number of ticks to record.
        #[arg(short, long, default_value_t = 100)]
        steps: usize,

        /// Also place the free probe at world point X,Y.
        #[arg(long, allow_hyphen_values = true)]
        at: Option<String>,
    },
    /// Print the field vector at a world point.
    Sample {
        #[command(flatten)]
        session: SessionArgs,

        #[arg(long, allow_negative_numbers = true)]
        x: f32,

        #[arg(long, allow_negative_numbers = true)]
        y: f32,
    },
    /// Write the session's charges as a charge list file.
    Export {
        #[command(flatten)]
        session: SessionArgs,

        /// Output file path.
        #[arg(short, long)]
        output: PathBuf,
    },
    /// List built-in scenarios and simulation settings.
    List,
}

/// Builds a session from the shared arguments, returning the launch-time
/// grid spacing along with it.
fn build_session(args: &SessionArgs) -> Result<(Session, GridSpacing), CliError> {
    let params: serde_json::Value = serde_json::from_str(&args.params)
        .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
    let config = SimulationConfig::from_json(&params);
    let viewport = Viewport::new(args.width, args.height)?;
    let launch = LaunchArgs::parse(&args.inputs);
    // A failed file load is already logged; the session keeps scenario 0.
    let (session, _) = Session::from_launch(config, viewport, &launch.source);
    Ok((session, launch.grid_spacing))
}

/// Parses `X,Y` as a world point.
fn parse_point(s: &str) -> Result<Vector2D, CliError> {
    let invalid = || CliError::Input(format!("invalid point '{s}', expected X,Y"));
    let (x, y) = s.split_once(',').ok_or_else(invalid)?;
    let x: f32 = x.trim().parse().map_err(|_| invalid())?;
    let y: f32 = y.trim().parse().map_err(|_| invalid())?;
    if !x.is_finite() || !y.is_finite() {
        return Err(invalid());
    }
    Ok(Vector2D::new(x, y))
}

fn describe_source(session: &Session) -> String {
    match session.scenario() {
        Some(s) => format!("scenario {} ({})", s.index(), s.name()),
        None => "charge list".to_string(),
    }
}

fn print_series(label: &str, series: &[ProbeSample]) {
    println!("{label}:");
    for sample in series {
        println!(
            "  {:>7.2}s  {:.4e}",
            sample.time_offset_seconds, sample.field_magnitude
        );
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            if cli.json {
                let scenarios: Vec<_> = SCENARIOS
                    .iter()
                    .map(|s| {
                        serde_json::json!({
                            "index": s.index(),
                            "name": s.name(),
                            "animated": s.is_animated(),
                            "charges": s.charges(),
                        })
                    })
                    .collect();
                let info = serde_json::json!({
                    "scenarios": scenarios,
                    "params": SimulationConfig::param_schema(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Scenarios:");
                for s in SCENARIOS {
                    let animated = if s.is_animated() { " (animated)" } else { "" };
                    println!("  {} {}{animated}", s.index(), s.name());
                    for c in s.charges() {
                        println!(
                            "      ({:>5.1}, {:>5.1})  {:+.1}",
                            c.position.x, c.position.y, c.magnitude
                        );
                    }
                }
            }
        }
        Command::Render {
            session: args,
            grid,
            steps,
            output,
            no_overlay,
        } => {
            let (mut session, launch_grid) = build_session(&args)?;
            for _ in 0..steps {
                session.step();
            }
            let options = RenderOptions {
                grid_spacing: grid.unwrap_or(launch_grid),
                overlay: !no_overlay,
                ..RenderOptions::default()
            };
            let frame = render(&mut session, &options);
            efield_render::snapshot::write_png(&frame, &output)?;

            let source = describe_source(&session);
            if cli.json {
                let info = serde_json::json!({
                    "source": source,
                    "charges": session.charges().len(),
                    "width": frame.width(),
                    "height": frame.height(),
                    "steps": steps,
                    "max_intensity": session.cache().max_intensity(),
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {source} ({}x{}, {steps} steps) -> {}",
                    frame.width(),
                    frame.height(),
                    output.display()
                );
            }
        }
        Command::Probe {
            session: args,
            steps,
            at,
        } => {
            let (mut session, _) = build_session(&args)?;
            if let Some(at) = at {
                session.place_probe(parse_point(&at)?);
            }
            for _ in 0..steps {
                session.step();
            }
            let probes = session.probes();
            let orbiting = probes.orbiting().series();
            let free = probes.free().map(|p| p.series());
            if cli.json {
                let info = serde_json::json!({
                    "orbiting": orbiting,
                    "free": free,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                print_series("orbiting probe", orbiting);
                if let Some(free) = free {
                    print_series("free probe", free);
                }
            }
        }
        Command::Sample { session: args, x, y } => {
            let (session, _) = build_session(&args)?;
            let point = Vector2D::new(x, y);
            let field = session.field_at(point);
            if cli.json {
                let info = serde_json::json!({
                    "point": point,
                    "field": field,
                    "magnitude": field.magnitude(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!(
                    "E({x}, {y}) = ({:.4e}, {:.4e})  |E| = {:.4e}",
                    field.x,
                    field.y,
                    field.magnitude()
                );
            }
        }
        Command::Export {
            session: args,
            output,
        } => {
            let (session, _) = build_session(&args)?;
            write_charge_list(&output, session.charges().as_slice())?;
            if cli.json {
                let info = serde_json::json!({
                    "source": describe_source(&session),
                    "charges": session.charges().len(),
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "wrote {} charges -> {}",
                    session.charges().len(),
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
