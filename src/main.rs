use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use colored::*;
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use fitplan::config::{load_profile, AppConfig};
use fitplan::export::{self, text, ExportFormat};
use fitplan::logging::{init_logging, LogFormat};
use fitplan::metabolic::{weekly_pace, BmiReading, MetabolicCalculator};
use fitplan::vocabulary::{canonical_keys, Catalog, Localizer, Namespace};
use fitplan::{FitPlanError, PlanGenerator, Profile};

/// FitPlan - Training & Nutrition Plan Generator
///
/// Turns a fitness profile into a four-week periodized training plan with
/// daily calorie and macronutrient targets.
#[derive(Parser)]
#[command(name = "fitplan")]
#[command(author = "FitPlan Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Training & nutrition plan generator", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log format (pretty, json, compact)
    #[arg(long, value_name = "FORMAT")]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a four-week plan
    Generate {
        /// Profile file (JSON or TOML)
        #[arg(short, long)]
        profile: PathBuf,

        /// Output format (json, text)
        #[arg(short = 'f', long)]
        format: Option<String>,

        /// Output file path (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Localization catalog (TOML)
        #[arg(long, value_name = "FILE")]
        catalog: Option<PathBuf>,
    },

    /// Show a single week of the cycle
    Week {
        /// Profile file (JSON or TOML)
        #[arg(short, long)]
        profile: PathBuf,

        /// Cycle week (1-4, default: the unscaled baseline week)
        #[arg(short, long, default_value = "2")]
        week: u8,

        /// Output format (json, text)
        #[arg(short = 'f', long)]
        format: Option<String>,

        /// Localization catalog (TOML)
        #[arg(long, value_name = "FILE")]
        catalog: Option<PathBuf>,
    },

    /// Show BMI, energy expenditure and macro targets
    Nutrition {
        /// Profile file (JSON or TOML)
        #[arg(short, long)]
        profile: PathBuf,
    },

    /// Weekly weight change needed to reach a target by a date
    Pace {
        /// Current weight (kg)
        #[arg(long)]
        weight: Decimal,

        /// Target weight (kg)
        #[arg(long)]
        target: Decimal,

        /// Target date (YYYY-MM-DD)
        #[arg(long)]
        target_date: NaiveDate,

        /// Reference date (YYYY-MM-DD, default: today)
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// List vocabulary keys or check a catalog's coverage
    Vocabulary {
        /// Catalog to check for unmapped keys
        #[arg(long, value_name = "FILE")]
        catalog: Option<PathBuf>,
    },

    /// Configure application settings
    Config {
        /// Write a default configuration file
        #[arg(long)]
        init: bool,

        /// Print the effective configuration
        #[arg(long)]
        show: bool,
    },
}

#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Value")]
    value: String,
}

impl MetricRow {
    fn new(metric: &str, value: impl ToString) -> Self {
        Self {
            metric: metric.to_string(),
            value: value.to_string(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let app_config = match &cli.config {
        Some(path) => AppConfig::load_from_file(path)?,
        None => AppConfig::load_or_default()?,
    };

    let mut log_config = app_config.logging.clone().with_verbosity(cli.verbose);
    if let Some(format) = &cli.log_format {
        log_config.format = format.parse::<LogFormat>().map_err(anyhow::Error::msg)?;
    }
    init_logging(&log_config)?;

    let generator = PlanGenerator::new(app_config.planner.clone())?;

    match cli.command {
        Commands::Generate {
            profile,
            format,
            output,
            catalog,
        } => {
            let profile = load_valid_profile(&profile)?;
            let format = resolve_format(format.as_deref(), &app_config)?;
            let localizer = load_catalog(catalog.as_deref().or(app_config.output.catalog.as_deref()))?;

            let plan = generator.generate(&profile);

            match output {
                Some(path) => {
                    export::export_plan(&plan, format, &localizer, &path)?;
                    println!("{}", format!("✓ Plan written to {}", path.display()).green());
                }
                None => println!("{}", export::render_plan(&plan, format, &localizer)?),
            }
        }

        Commands::Week {
            profile,
            week,
            format,
            catalog,
        } => {
            let profile = load_valid_profile(&profile)?;
            let format = resolve_format(format.as_deref(), &app_config)?;
            let localizer = load_catalog(catalog.as_deref().or(app_config.output.catalog.as_deref()))?;

            let week = generator.generate_week(&profile, week);

            match format {
                ExportFormat::Json => println!(
                    "{}",
                    serde_json::to_string_pretty(&week).context("Failed to serialize week")?
                ),
                ExportFormat::Text => print!("{}", text::render_week(&week, &localizer)?),
            }
        }

        Commands::Nutrition { profile } => {
            let profile = load_valid_profile(&profile)?;
            let localizer = Catalog::english();

            let bmi = BmiReading::from_measurements(profile.weight_kg, profile.height_cm);
            let nutrition = generator.nutrition(&profile);
            let estimate = MetabolicCalculator::new(&generator.config().metabolic).profile_estimate(&profile);

            println!("{}", "Nutrition targets".cyan().bold());
            let rows = vec![
                MetricRow::new(
                    "BMI",
                    format!("{} ({})", bmi.value, localizer.translate(Namespace::Bmi, bmi.category.key())),
                ),
                MetricRow::new("BMR (kcal)", estimate.bmr),
                MetricRow::new("TDEE (kcal)", nutrition.tdee),
                MetricRow::new("Calories (kcal)", nutrition.calories),
                MetricRow::new("Protein (g)", format!("{}–{}", nutrition.protein_g.low, nutrition.protein_g.high)),
                MetricRow::new("Fat (g)", format!("{}–{}", nutrition.fat_g.low, nutrition.fat_g.high)),
                MetricRow::new("Carbs (g)", nutrition.carbs_g),
            ];
            let mut table = Table::new(rows);
            table.with(Style::rounded());
            println!("{}", table);
            println!(
                "{}",
                localizer
                    .translate(Namespace::Rationale, nutrition.rationale.key())
                    .dimmed()
            );
            println!();

            println!("{}", "Profile estimate".cyan().bold());
            let rows = vec![
                MetricRow::new("Calories (kcal)", estimate.calories),
                MetricRow::new("Protein (g)", estimate.protein_g),
                MetricRow::new("Fat (g)", estimate.fat_g),
                MetricRow::new("Carbs (g)", estimate.carbs_g),
            ];
            let mut table = Table::new(rows);
            table.with(Style::rounded());
            println!("{}", table);
        }

        Commands::Pace {
            weight,
            target,
            target_date,
            today,
        } => {
            let today = today.unwrap_or_else(|| chrono::Local::now().date_naive());

            match weekly_pace(weight, target, target_date, today) {
                Some(pace) => println!(
                    "{}",
                    format!("{} kg/week until {}", pace, target_date.format("%Y-%m-%d")).green()
                ),
                None => println!(
                    "{}",
                    format!("Target date {} is not after {}", target_date, today).yellow()
                ),
            }
        }

        Commands::Vocabulary { catalog } => {
            let keys = canonical_keys(&generator.config().splits);

            match catalog {
                Some(path) => {
                    let catalog = Catalog::load_from_file(&path)?;
                    let missing = catalog.missing_keys(&keys);
                    if missing.is_empty() {
                        println!(
                            "{}",
                            format!("✓ Catalog '{}' covers all {} keys", catalog.locale, keys.len()).green()
                        );
                    } else {
                        println!(
                            "{}",
                            format!("{} of {} keys unmapped in '{}':", missing.len(), keys.len(), catalog.locale)
                                .yellow()
                                .bold()
                        );
                        for key in missing {
                            println!("  {}", key);
                        }
                    }
                }
                None => {
                    for key in keys {
                        println!("{}", key);
                    }
                }
            }
        }

        Commands::Config { init, show } => {
            let path = cli.config.clone().unwrap_or_else(AppConfig::default_config_path);

            if init {
                let mut config = AppConfig::default();
                config.save_to_file(&path)?;
                println!("{}", format!("✓ Configuration written to {}", path.display()).green());
            } else if show {
                let content = toml::to_string_pretty(&app_config).context("Failed to serialize configuration")?;
                println!("{}", content);
            } else {
                println!("Configuration file: {}", path.display());
            }
        }
    }

    Ok(())
}

/// Load a profile and reject it before generation if invalid
fn load_valid_profile(path: &Path) -> Result<Profile> {
    let profile = load_profile(path)?;

    profile.validate().map_err(|err| {
        let err = FitPlanError::from(err);
        tracing::warn!(severity = ?err.severity(), error = %err, "Profile rejected");
        anyhow::anyhow!(err.user_message())
    })?;

    Ok(profile)
}

fn resolve_format(requested: Option<&str>, app_config: &AppConfig) -> Result<ExportFormat> {
    match requested {
        Some(format) => Ok(format.parse::<ExportFormat>()?),
        None => Ok(app_config.output.format),
    }
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => Catalog::load_from_file(path),
        None => Ok(Catalog::english()),
    }
}
