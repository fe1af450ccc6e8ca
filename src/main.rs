use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use clap::{Parser, Subcommand};
use colored::*;
use std::io::Write;
use std::path::PathBuf;
use tabled::{settings::Style, Table, Tabled};

use liftrs::backup;
use liftrs::config::AppConfig;
use liftrs::database::Database;
use liftrs::error::LiftrsError;
use liftrs::logging::{init_logging, LogConfig, LogFormat, LogLevel};
use liftrs::models::{Exercise, Workout};
use liftrs::onerm::OneRmCalculator;
use liftrs::suggest::{SuggestionEngine, SuggestionMethod};
use liftrs::trend::{chronological, TrendCalculator};

/// liftrs - Strength Progress Tracking CLI
///
/// A Rust-based tool for logging weight training sets and estimating
/// strength progress from the one-rep max trend of each exercise.
#[derive(Parser)]
#[command(name = "liftrs")]
#[command(author = "liftrs Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Strength progress tracking CLI", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Sets a custom database file
    #[arg(long, value_name = "FILE", global = true)]
    database: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL", global = true)]
    log_level: Option<LogLevel>,

    /// Log format (pretty, json, compact)
    #[arg(long, value_name = "FORMAT", global = true)]
    log_format: Option<LogFormat>,

    /// Also write logs to this file
    #[arg(long, value_name = "FILE", global = true)]
    log_file: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage tracked exercises
    Exercise {
        #[command(subcommand)]
        command: ExerciseCommands,
    },

    /// Manage logged sets
    Log {
        #[command(subcommand)]
        command: LogCommands,
    },

    /// Show the logged history of an exercise
    History {
        /// Exercise name or id
        exercise: String,

        /// Show only the most recent N sets (0 shows all)
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Fit and display the progress trend of an exercise
    Trend {
        /// Exercise name or id
        exercise: String,
    },

    /// Suggest weight and reps for the next set
    Suggest {
        /// Exercise name or id
        exercise: String,

        /// Target rep count (defaults to the last logged reps)
        #[arg(short, long)]
        reps: Option<u32>,
    },

    /// Manage workouts
    Workout {
        #[command(subcommand)]
        command: WorkoutCommands,
    },

    /// Export all data as CSV backup files
    Export {
        /// Backup directory
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Restore all data from a CSV backup, replacing the current store
    Import {
        /// Backup directory
        #[arg(short, long)]
        input: PathBuf,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Render an exercise progress chart as SVG
    #[cfg(feature = "charts")]
    Chart {
        /// Exercise name or id
        exercise: String,

        /// Output SVG path
        #[arg(short, long)]
        output: PathBuf,

        /// Trailing sessions to display (0 shows all)
        #[arg(short, long)]
        window: Option<usize>,
    },

    /// Configure application settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ExerciseCommands {
    /// Add a new exercise
    Add {
        /// Exercise name
        name: String,

        /// Smallest weight increment available in the gym
        #[arg(short, long)]
        step: Option<f64>,
    },

    /// List exercises with their latest estimated one-rep max
    List {
        /// Include hidden exercises
        #[arg(short, long)]
        all: bool,
    },

    /// Change an exercise's name or weight increment
    Edit {
        /// Exercise name or id
        exercise: String,

        /// New name
        #[arg(short, long)]
        name: Option<String>,

        /// New weight increment
        #[arg(short, long)]
        step: Option<f64>,
    },

    /// Delete an exercise and all its logged sets
    Rm {
        /// Exercise name or id
        exercise: String,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Hide an exercise from listings without deleting its history
    Hide {
        /// Exercise name or id
        exercise: String,

        /// Unhide instead
        #[arg(short, long)]
        undo: bool,
    },
}

#[derive(Subcommand)]
enum LogCommands {
    /// Record a completed set
    Add {
        /// Exercise name or id
        exercise: String,

        /// Weight lifted
        weight: f64,

        /// Repetitions completed
        reps: u32,

        /// Date of the set (YYYY-MM-DD, defaults to now)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Correct a logged set's weight, reps or date
    Edit {
        /// Set id as shown by history
        id: i64,

        /// Corrected weight
        #[arg(short, long)]
        weight: Option<f64>,

        /// Corrected rep count
        #[arg(short, long)]
        reps: Option<u32>,

        /// Corrected date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Delete a logged set
    Rm {
        /// Set id as shown by history
        id: i64,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum WorkoutCommands {
    /// Create a new workout
    Create {
        /// Workout name
        name: String,
    },

    /// Append an exercise to a workout
    Add {
        /// Workout name or id
        workout: String,

        /// Exercise name or id
        exercise: String,
    },

    /// Remove an exercise from a workout, keeping its history
    Remove {
        /// Workout name or id
        workout: String,

        /// Exercise name or id
        exercise: String,
    },

    /// List workouts, most recently viewed first
    List,

    /// Show a workout's exercises with next-set suggestions
    Show {
        /// Workout name or id
        workout: String,
    },

    /// Delete a workout; exercises and their logged sets are kept
    Rm {
        /// Workout name or id
        workout: String,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Get a configuration value
    Get {
        /// Dotted key, e.g. regression.window
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Dotted key, e.g. regression.weighted
        key: String,

        /// New value
        value: String,
    },

    /// List all configuration values
    List,
}

#[derive(Tabled)]
struct ExerciseRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Step")]
    step: String,
    #[tabled(rename = "Last trained")]
    last_trained: String,
    #[tabled(rename = "Est. 1RM")]
    one_rm: String,
}

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "Reps")]
    reps: u32,
    #[tabled(rename = "Est. 1RM")]
    one_rm: String,
}

#[derive(Tabled)]
struct WorkoutRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Exercise")]
    name: String,
    #[tabled(rename = "Next set")]
    next_set: String,
    #[tabled(rename = "Based on")]
    basis: String,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{} {:#}", "error:".red().bold(), err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let Cli {
        config: config_path,
        database,
        log_level,
        log_format,
        log_file,
        verbose,
        command,
    } = Cli::parse();

    // Explicit --log-level wins over -v counting
    let level = log_level.unwrap_or(match verbose {
        0 => LogLevel::Warn,
        1 => LogLevel::Info,
        2 => LogLevel::Debug,
        _ => LogLevel::Trace,
    });
    let log_config = LogConfig {
        level,
        format: log_format.unwrap_or(LogFormat::Compact),
        file_path: log_file,
        ..LogConfig::default()
    };
    init_logging(&log_config)?;

    let mut config = match &config_path {
        Some(path) => AppConfig::load_from_file(path)?,
        None => AppConfig::load_or_default(),
    };

    match command {
        Commands::Exercise { command } => match command {
            ExerciseCommands::Add { name, step } => {
                let mut db = open_database(database, &config)?;
                let step = step.unwrap_or(config.settings.default_weight_step);
                if !Exercise::valid_step(step) {
                    bail!("weight step must be a positive number, got {}", step);
                }
                let exercise = db.add_exercise(&name, step)?;
                println!(
                    "{} {} (id {}, step {})",
                    "✓ Added".green().bold(),
                    exercise.name,
                    exercise.id,
                    exercise.weight_step
                );
            }

            ExerciseCommands::List { all } => {
                let db = open_database(database, &config)?;
                let exercises = db.list_exercises(all)?;
                if exercises.is_empty() {
                    println!("{}", "No exercises yet. Add one with exercise add.".yellow());
                    return Ok(());
                }
                let mut rows = Vec::with_capacity(exercises.len());
                for exercise in &exercises {
                    let logs = chronological(&db.logs_for_exercise(exercise.id)?, 0);
                    let one_rm = logs
                        .last()
                        .and_then(|log| OneRmCalculator::estimate(log.weight, log.reps).ok());
                    rows.push(ExerciseRow {
                        id: exercise.id,
                        name: if exercise.hidden {
                            format!("{} (hidden)", exercise.name)
                        } else {
                            exercise.name.clone()
                        },
                        step: exercise.weight_step.to_string(),
                        last_trained: match db.last_trained(exercise.id)? {
                            Some(date) => date.format("%Y-%m-%d").to_string(),
                            None => "-".to_string(),
                        },
                        one_rm: match one_rm {
                            Some(value) => format!("{:.1}", value),
                            None => "-".to_string(),
                        },
                    });
                }
                let mut table = Table::new(rows);
                table.with(Style::rounded());
                println!("{}", table);
            }

            ExerciseCommands::Edit {
                exercise,
                name,
                step,
            } => {
                let mut db = open_database(database, &config)?;
                let mut record = resolve_exercise(&db, &exercise)?;
                if name.is_none() && step.is_none() {
                    bail!("nothing to change; pass --name or --step");
                }
                if let Some(name) = name {
                    record.name = name;
                }
                if let Some(step) = step {
                    record.weight_step = step;
                    if !record.has_valid_step() {
                        bail!("weight step must be a positive number, got {}", step);
                    }
                }
                db.update_exercise(&record)?;
                println!(
                    "{} {} (step {})",
                    "✓ Updated".green().bold(),
                    record.name,
                    record.weight_step
                );
            }

            ExerciseCommands::Rm { exercise, yes } => {
                let mut db = open_database(database, &config)?;
                let record = resolve_exercise(&db, &exercise)?;
                let sets = db.logs_for_exercise(record.id)?.len();
                let prompt = format!("Delete {} and {} logged sets?", record.name, sets);
                if !yes && !confirm(&prompt)? {
                    println!("Aborted.");
                    return Ok(());
                }
                db.delete_exercise(record.id)?;
                println!("{} {}", "✓ Deleted".red().bold(), record.name);
            }

            ExerciseCommands::Hide { exercise, undo } => {
                let mut db = open_database(database, &config)?;
                let mut record = resolve_exercise(&db, &exercise)?;
                record.hidden = !undo;
                db.update_exercise(&record)?;
                if undo {
                    println!("{} {}", "✓ Unhid".green().bold(), record.name);
                } else {
                    println!("{} {}", "✓ Hid".green().bold(), record.name);
                }
            }
        },

        Commands::Log { command } => match command {
            LogCommands::Add {
                exercise,
                weight,
                reps,
                date,
            } => {
                let mut db = open_database(database, &config)?;
                let record = resolve_exercise(&db, &exercise)?;
                let date = match date {
                    Some(raw) => parse_date(&raw)?,
                    None => Utc::now(),
                };
                let log = db.add_log(record.id, date, weight, reps)?;
                println!(
                    "{} {} x {} for {} (set #{})",
                    "✓ Logged".green().bold(),
                    log.weight,
                    log.reps,
                    record.name,
                    log.id
                );
                match OneRmCalculator::estimate(weight, reps) {
                    Ok(one_rm) => {
                        println!("  {}", format!("estimated 1RM: {:.1}", one_rm).dimmed())
                    }
                    Err(err) => {
                        let err = LiftrsError::from(err);
                        println!("  {}", err.user_message().yellow());
                    }
                }
            }

            LogCommands::Edit {
                id,
                weight,
                reps,
                date,
            } => {
                let mut db = open_database(database, &config)?;
                let mut log = db.get_log(id)?;
                if weight.is_none() && reps.is_none() && date.is_none() {
                    bail!("nothing to change; pass --weight, --reps or --date");
                }
                if let Some(weight) = weight {
                    log.weight = weight;
                }
                if let Some(reps) = reps {
                    log.reps = reps;
                }
                if let Some(raw) = date {
                    log.date = parse_date(&raw)?;
                }
                db.update_log(&log)?;
                let record = db.get_exercise(log.exercise_id)?;
                println!(
                    "{} set #{}: {} x {} for {} on {}",
                    "✓ Updated".green().bold(),
                    log.id,
                    log.weight,
                    log.reps,
                    record.name,
                    log.date.format("%Y-%m-%d")
                );
            }

            LogCommands::Rm { id, yes } => {
                let mut db = open_database(database, &config)?;
                let log = db.get_log(id)?;
                let record = db.get_exercise(log.exercise_id)?;
                let prompt = format!(
                    "Delete {} x {} for {} logged {}?",
                    log.weight,
                    log.reps,
                    record.name,
                    log.date.format("%Y-%m-%d")
                );
                if !yes && !confirm(&prompt)? {
                    println!("Aborted.");
                    return Ok(());
                }
                db.delete_log(log.id)?;
                println!("{} set #{}", "✓ Deleted".red().bold(), log.id);
            }
        },

        Commands::History { exercise, limit } => {
            let db = open_database(database, &config)?;
            let record = resolve_exercise(&db, &exercise)?;
            let logs = chronological(&db.logs_for_exercise(record.id)?, limit);
            if logs.is_empty() {
                println!(
                    "{}",
                    format!("No sets logged for {} yet.", record.name).yellow()
                );
                return Ok(());
            }
            println!("{}", format!("History for {}", record.name).cyan().bold());
            let rows: Vec<HistoryRow> = logs
                .iter()
                .map(|log| HistoryRow {
                    id: log.id,
                    date: log.date.format("%Y-%m-%d %H:%M").to_string(),
                    weight: log.weight.to_string(),
                    reps: log.reps,
                    one_rm: match OneRmCalculator::estimate(log.weight, log.reps) {
                        Ok(value) => format!("{:.1}", value),
                        Err(_) => "-".to_string(),
                    },
                })
                .collect();
            let mut table = Table::new(rows);
            table.with(Style::rounded());
            println!("{}", table);
        }

        Commands::Trend { exercise } => {
            let db = open_database(database, &config)?;
            let record = resolve_exercise(&db, &exercise)?;
            let logs = db.logs_for_exercise(record.id)?;
            match TrendCalculator::with_config(config.regression).fit(&logs) {
                Ok(fit) => {
                    println!(
                        "{}",
                        format!("Progress trend for {}", record.name).cyan().bold()
                    );
                    println!("  Sessions fitted: {}", fit.sessions);
                    println!("  Slope: {:+.2} per session", fit.line.slope);
                    println!(
                        "  Latest est. 1RM: {:.1}",
                        fit.line.value_at((fit.sessions - 1) as f64)
                    );
                    println!("  Projected next session: {:.1}", fit.next_session_estimate());
                }
                Err(err) => {
                    let err = LiftrsError::from(err);
                    if err.severity().to_tracing_level() == tracing::Level::WARN {
                        tracing::warn!(exercise = %record.name, error = %err, "trend unavailable");
                    } else {
                        tracing::error!(exercise = %record.name, error = %err, "trend unavailable");
                    }
                    println!("{}", err.user_message().yellow());
                }
            }
        }

        Commands::Suggest { exercise, reps } => {
            let db = open_database(database, &config)?;
            let record = resolve_exercise(&db, &exercise)?;
            let logs = db.logs_for_exercise(record.id)?;
            let engine = SuggestionEngine::with_config(config.regression);
            match engine.suggest_next_set(&logs, record.weight_step, reps) {
                Some(set) => {
                    let basis = match set.method {
                        SuggestionMethod::TrendProjection => "progress trend",
                        SuggestionMethod::LastLogged => "last logged weight",
                    };
                    println!(
                        "{}",
                        format!("Next set for {}", record.name).green().bold()
                    );
                    println!("  {} x {}", set.weight, set.reps);
                    println!("  {}", format!("based on {}", basis).dimmed());
                }
                None => {
                    println!(
                        "{}",
                        format!("No sets logged for {} yet.", record.name).yellow()
                    );
                }
            }
        }

        Commands::Workout { command } => match command {
            WorkoutCommands::Create { name } => {
                let mut db = open_database(database, &config)?;
                let workout = db.create_workout(&name)?;
                println!(
                    "{} {} (id {})",
                    "✓ Created".magenta().bold(),
                    workout.name,
                    workout.id
                );
            }

            WorkoutCommands::Add { workout, exercise } => {
                let mut db = open_database(database, &config)?;
                let workout = resolve_workout(&db, &workout)?;
                let record = resolve_exercise(&db, &exercise)?;
                let entry = db.add_exercise_to_workout(workout.id, record.id)?;
                println!(
                    "{} {} to {} (position {})",
                    "✓ Added".magenta().bold(),
                    record.name,
                    workout.name,
                    entry.position + 1
                );
            }

            WorkoutCommands::Remove { workout, exercise } => {
                let mut db = open_database(database, &config)?;
                let workout = resolve_workout(&db, &workout)?;
                let record = resolve_exercise(&db, &exercise)?;
                db.remove_exercise_from_workout(workout.id, record.id)?;
                println!(
                    "{} {} from {}",
                    "✓ Removed".magenta().bold(),
                    record.name,
                    workout.name
                );
            }

            WorkoutCommands::List => {
                let db = open_database(database, &config)?;
                let workouts = db.list_workouts()?;
                if workouts.is_empty() {
                    println!(
                        "{}",
                        "No workouts yet. Create one with workout create.".yellow()
                    );
                    return Ok(());
                }
                for workout in workouts {
                    let count = db.workout_exercises(workout.id)?.len();
                    println!(
                        "{} {} ({} exercises, viewed {})",
                        format!("#{}", workout.id).dimmed(),
                        workout.name.bold(),
                        count,
                        workout.last_viewed.format("%Y-%m-%d")
                    );
                }
            }

            WorkoutCommands::Show { workout } => {
                let mut db = open_database(database, &config)?;
                let workout = resolve_workout(&db, &workout)?;
                db.touch_workout(workout.id)?;
                let exercises = db.workout_exercises(workout.id)?;
                if exercises.is_empty() {
                    println!(
                        "{}",
                        "Workout is empty. Add exercises with workout add.".yellow()
                    );
                    return Ok(());
                }
                println!("{}", workout.name.magenta().bold());
                let engine = SuggestionEngine::with_config(config.regression);
                let mut rows = Vec::with_capacity(exercises.len());
                for (i, exercise) in exercises.iter().enumerate() {
                    let logs = db.logs_for_exercise(exercise.id)?;
                    let suggestion = engine.suggest_next_set(&logs, exercise.weight_step, None);
                    let (next_set, basis) = match suggestion {
                        Some(set) => (
                            format!("{} x {}", set.weight, set.reps),
                            match set.method {
                                SuggestionMethod::TrendProjection => "trend".to_string(),
                                SuggestionMethod::LastLogged => "last logged".to_string(),
                            },
                        ),
                        None => ("-".to_string(), "no history".to_string()),
                    };
                    rows.push(WorkoutRow {
                        position: i + 1,
                        name: exercise.name.clone(),
                        next_set,
                        basis,
                    });
                }
                let mut table = Table::new(rows);
                table.with(Style::rounded());
                println!("{}", table);
            }

            WorkoutCommands::Rm { workout, yes } => {
                let mut db = open_database(database, &config)?;
                let workout = resolve_workout(&db, &workout)?;
                let count = db.workout_exercises(workout.id)?.len();
                let prompt = format!(
                    "Delete workout {} ({} exercises)? Exercise history is kept.",
                    workout.name, count
                );
                if !yes && !confirm(&prompt)? {
                    println!("Aborted.");
                    return Ok(());
                }
                db.delete_workout(workout.id)?;
                println!("{} {}", "✓ Deleted".red().bold(), workout.name);
            }
        },

        Commands::Export { output } => {
            let db = open_database(database, &config)?;
            let stats = backup::export_backup(&db, &output)?;
            println!(
                "{} {} exercises, {} sets, {} workouts to {}",
                "✓ Exported".yellow().bold(),
                stats.exercises,
                stats.logs,
                stats.workouts,
                output.display()
            );
        }

        Commands::Import { input, yes } => {
            let mut db = open_database(database, &config)?;
            if !yes && !confirm("Restoring a backup replaces all current data. Continue?")? {
                println!("Aborted.");
                return Ok(());
            }
            let stats = backup::import_backup(&mut db, &input)?;
            println!(
                "{} {} exercises, {} sets, {} workouts from {}",
                "✓ Restored".yellow().bold(),
                stats.exercises,
                stats.logs,
                stats.workouts,
                input.display()
            );
        }

        #[cfg(feature = "charts")]
        Commands::Chart {
            exercise,
            output,
            window,
        } => {
            let db = open_database(database, &config)?;
            let record = resolve_exercise(&db, &exercise)?;
            let logs = db.logs_for_exercise(record.id)?;
            let options = liftrs::chart::ChartOptions {
                view_window: window.unwrap_or(config.display.view_window),
                caption: record.name.clone(),
                ..Default::default()
            };
            liftrs::chart::render_progress_chart(&logs, config.regression, &options, &output)?;
            println!(
                "{} {}",
                "✓ Chart written to".cyan().bold(),
                output.display()
            );
        }

        Commands::Config { command } => match command {
            ConfigCommands::Get { key } => match config.get_value(&key) {
                Some(value) => println!("{}", value),
                None => bail!("unknown configuration key: {}", key),
            },

            ConfigCommands::Set { key, value } => {
                config.set_value(&key, &value)?;
                match &config_path {
                    Some(path) => config.save_to_file(path)?,
                    None => config.save_default()?,
                }
                println!("{} {} = {}", "✓ Set".white().bold(), key, value);
            }

            ConfigCommands::List => {
                for (key, value) in config.list_values() {
                    println!("{} = {}", key.bold(), value);
                }
            }
        },
    }

    Ok(())
}

/// Open the database at the overridden or configured path
fn open_database(path_override: Option<PathBuf>, config: &AppConfig) -> Result<Database> {
    let path = path_override.unwrap_or_else(|| config.database_path());
    tracing::debug!("opening database at {}", path.display());
    Database::new(&path)
        .with_context(|| format!("failed to open database at {}", path.display()))
}

/// Resolve an exercise argument that may be an id or a name
fn resolve_exercise(db: &Database, key: &str) -> Result<Exercise> {
    if let Ok(id) = key.parse::<i64>() {
        if let Ok(exercise) = db.get_exercise(id) {
            return Ok(exercise);
        }
    }
    db.find_exercise_by_name(key)?
        .ok_or_else(|| anyhow!("no exercise named {:?}", key))
}

/// Resolve a workout argument that may be an id or a name
fn resolve_workout(db: &Database, key: &str) -> Result<Workout> {
    if let Ok(id) = key.parse::<i64>() {
        if let Ok(workout) = db.get_workout(id) {
            return Ok(workout);
        }
    }
    db.list_workouts()?
        .into_iter()
        .find(|workout| workout.name.eq_ignore_ascii_case(key))
        .ok_or_else(|| anyhow!("no workout named {:?}", key))
}

/// Parse a YYYY-MM-DD date as noon UTC
fn parse_date(raw: &str) -> Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("invalid date {:?}, expected YYYY-MM-DD", raw))?;
    let datetime = date
        .and_hms_opt(12, 0, 0)
        .ok_or_else(|| anyhow!("invalid date {:?}", raw))?;
    Ok(Utc.from_utc_datetime(&datetime))
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
