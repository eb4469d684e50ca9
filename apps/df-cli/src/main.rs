use clap::{Args, Parser, Subcommand, ValueEnum};
use df_app::{
    AppError, AppResult, JunctionStatus, ResolveReport, SizingWindow, apply_resolution, build_bom,
    check_design, export_bom, load_design, resolve_design, resolve_junction, save_design,
    size_duct, suggest_sizes,
};
use df_model::{AirCoefficients, ConstraintProfile, Severity, Shape, SizingConstraints, Violation};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "df-cli")]
#[command(about = "DuctFlow CLI - Duct fitting, sizing and validation tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate design file syntax and structure
    Validate {
        /// Path to the design YAML file
        design_path: PathBuf,
    },
    /// Check every entity against its service and industrial constraints
    Check {
        /// Path to the design YAML file
        design_path: PathBuf,
        /// Validate entities on the rayon pool
        #[arg(long)]
        parallel: bool,
    },
    /// Resolve junctions into fittings
    Resolve {
        /// Path to the design YAML file
        design_path: PathBuf,
        /// Only resolve this junction
        #[arg(short, long)]
        junction: Option<String>,
        /// Write the design with the inserted fittings to this file
        #[arg(short, long)]
        write: Option<PathBuf>,
    },
    /// Size a duct at the maximum velocity of a window
    Size {
        #[command(flatten)]
        sizing: SizingArgs,
        /// Width to height ratio for rectangular ducts
        #[arg(long)]
        aspect: Option<f64>,
    },
    /// List candidate sizes across a velocity window
    Suggest {
        #[command(flatten)]
        sizing: SizingArgs,
    },
    /// Build the bill of materials for everything that passes validation
    Bom {
        /// Path to the design YAML file
        design_path: PathBuf,
        /// Output JSON file path (optional, prints a table otherwise)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
struct SizingArgs {
    /// Airflow in CFM
    airflow: f64,
    #[arg(long, value_enum, default_value_t = ShapeArg::Round)]
    shape: ShapeArg,
    /// Design file providing services, windows and air coefficients
    #[arg(long)]
    design: Option<PathBuf>,
    /// Service whose velocity window applies
    #[arg(long)]
    service: Option<String>,
    /// Minimum velocity in FPM (requires --max-velocity)
    #[arg(long)]
    min_velocity: Option<f64>,
    /// Maximum velocity in FPM (requires --min-velocity)
    #[arg(long)]
    max_velocity: Option<f64>,
    /// Site elevation in feet, for air density correction
    #[arg(long)]
    elevation: Option<f64>,
    /// Air temperature in °F, for air density correction
    #[arg(long)]
    temperature: Option<f64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ShapeArg {
    Round,
    #[value(alias = "rect")]
    Rectangular,
}

impl From<ShapeArg> for Shape {
    fn from(arg: ShapeArg) -> Self {
        match arg {
            ShapeArg::Round => Shape::Round,
            ShapeArg::Rectangular => Shape::Rectangular,
        }
    }
}

fn main() -> AppResult<()> {
    // Initialize tracing; RUST_LOG=debug shows pipeline decisions
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { design_path } => cmd_validate(&design_path),
        Commands::Check {
            design_path,
            parallel,
        } => cmd_check(&design_path, parallel),
        Commands::Resolve {
            design_path,
            junction,
            write,
        } => cmd_resolve(&design_path, junction.as_deref(), write.as_deref()),
        Commands::Size { sizing, aspect } => cmd_size(&sizing, aspect),
        Commands::Suggest { sizing } => cmd_suggest(&sizing),
        Commands::Bom {
            design_path,
            output,
        } => cmd_bom(&design_path, output.as_deref()),
    }
}

fn cmd_validate(design_path: &Path) -> AppResult<()> {
    println!("Validating design: {}", design_path.display());
    let design = load_design(design_path)?;
    println!("✓ Design is valid");
    println!("  Services:  {}", design.profile.services.len());
    println!("  Entities:  {}", design.entities.len());
    println!("  Junctions: {}", design.junctions.len());
    Ok(())
}

fn cmd_check(design_path: &Path, parallel: bool) -> AppResult<()> {
    let design = load_design(design_path)?;
    let report = check_design(&design, parallel);

    for (id, status) in &report.statuses {
        if status.is_clean() {
            continue;
        }
        let label = design.entity(*id).map(|e| e.kind_label()).unwrap_or("entity");
        println!("{} {}:", label, id);
        let groups = status.grouped();
        print_violations("error", &groups.errors);
        print_violations("warning", &groups.warnings);
        print_violations("info", &groups.infos);
    }

    let blocked = report.blocked().count();
    println!();
    println!(
        "Checked {} entities: {} errors, {} warnings, {} infos",
        report.statuses.len(),
        report.count(Severity::Error),
        report.count(Severity::Warning),
        report.count(Severity::Info)
    );
    if blocked == 0 {
        println!("✓ Design is ready for export");
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "{} entities have blocking violations",
            blocked
        )))
    }
}

fn print_violations(label: &str, violations: &[&Violation]) {
    for v in violations {
        println!("  {:<8} {}", label, v.message);
        if let Some(fix) = &v.suggested_fix {
            println!("           fix: {}", fix);
        }
    }
}

fn cmd_resolve(
    design_path: &Path,
    junction: Option<&str>,
    write: Option<&Path>,
) -> AppResult<()> {
    let mut design = load_design(design_path)?;
    let report = match junction {
        Some(id) => {
            let def = design.junction(id)?;
            ResolveReport {
                junctions: vec![resolve_junction(&design, def, design.next_entity_id())?],
            }
        }
        None => resolve_design(&design)?,
    };

    for outcome in &report.junctions {
        let mark = match outcome.status {
            JunctionStatus::Fitted => "✓",
            JunctionStatus::Manual => "-",
            JunctionStatus::Rejected => "✗",
        };
        println!(
            "{} {} ({}): {}",
            mark, outcome.junction_id, outcome.topology, outcome.preview.tooltip_text
        );
        for fitting in &outcome.fittings {
            println!("    {} {}", fitting.id, fitting.fitting_type.label());
        }
    }

    println!();
    println!(
        "Resolved {} junctions: {} fitted, {} manual, {} rejected",
        report.junctions.len(),
        report.count(JunctionStatus::Fitted),
        report.count(JunctionStatus::Manual),
        report.count(JunctionStatus::Rejected)
    );

    if let Some(path) = write {
        apply_resolution(&mut design, &report);
        save_design(path, &design)?;
        println!("✓ Design written to {}", path.display());
    }
    Ok(())
}

/// Profile and coefficients for the sizing commands. Without a design file
/// only explicit limits can be used.
fn sizing_inputs(args: &SizingArgs) -> AppResult<(ConstraintProfile, AirCoefficients)> {
    let profile = match &args.design {
        Some(path) => load_design(path)?.profile,
        None => ConstraintProfile::default(),
    };
    let coefficients = match (args.elevation, args.temperature) {
        (None, None) => profile.coefficients,
        (elevation, temperature) => {
            AirCoefficients::at_site(elevation.unwrap_or(0.0), temperature.unwrap_or(70.0))
        }
    };
    Ok((profile, coefficients))
}

fn sizing_window(args: &SizingArgs, profile: &ConstraintProfile) -> AppResult<SizingConstraints> {
    SizingWindow::from_args(args.service.as_deref(), args.min_velocity, args.max_velocity)?
        .resolve(profile)
}

fn cmd_size(args: &SizingArgs, aspect: Option<f64>) -> AppResult<()> {
    let (profile, coefficients) = sizing_inputs(args)?;
    let window = sizing_window(args, &profile)?;
    let result = size_duct(
        args.airflow,
        &window,
        args.shape.into(),
        aspect,
        &coefficients,
    )?;

    println!("Airflow:       {:.0} CFM", args.airflow);
    println!("Section:       {}", result.section);
    println!("Area:          {:.3} sq ft", result.area_sq_ft);
    println!("Velocity:      {:.0} FPM", result.velocity_fpm);
    println!("Equiv. diam.:  {:.2} in", result.equivalent_diameter_in);
    println!("Pressure drop: {:.4} in. w.g./100 ft", result.pressure_drop);
    Ok(())
}

fn cmd_suggest(args: &SizingArgs) -> AppResult<()> {
    let (profile, coefficients) = sizing_inputs(args)?;
    let window = sizing_window(args, &profile)?;
    let options = suggest_sizes(args.airflow, &window, args.shape.into(), &coefficients)?;

    println!(
        "{:>10}  {:<24}  {:>14}  Recommendation",
        "FPM", "Section", "in. w.g./100ft"
    );
    for option in &options {
        println!(
            "{:>10.0}  {:<24}  {:>14.4}  {}",
            option.velocity_fpm,
            option.result.section.to_string(),
            option.result.pressure_drop,
            option.recommendation.label()
        );
    }
    Ok(())
}

fn cmd_bom(design_path: &Path, output: Option<&Path>) -> AppResult<()> {
    let design = load_design(design_path)?;
    let report = build_bom(&design);

    if let Some(path) = output {
        export_bom(path, &report)?;
        println!("✓ BOM written to {}", path.display());
    } else {
        for line in &report.line_items {
            let material = line.material.map(|m| m.label()).unwrap_or("-");
            let qty = match line.total_length_ft {
                Some(ft) => format!("{:.1} ft", ft),
                None => format!("{}", line.quantity),
            };
            let price = line
                .extended_price
                .map(|p| format!("{:.2}", p))
                .unwrap_or_default();
            println!(
                "{:<26} {:<20} {:<22} {:>10} {:>10}",
                line.item, material, line.size, qty, price
            );
        }
        if let Some(total) = report.total_price {
            println!("Total: {:.2}", total);
        }
        println!("Fingerprint: {}", report.fingerprint);
    }

    for exclusion in &report.excluded {
        println!("Excluded {}: {:?}", exclusion.entity_id, exclusion.reason);
    }
    Ok(())
}
