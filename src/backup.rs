//! Whole-store CSV backup and restore
//!
//! One file per table, written into a backup directory: `exercises.csv`,
//! `logs.csv`, `workouts.csv` and `workout_entries.csv`. Dates are stored as
//! epoch milliseconds. Restore replaces the entire store in one transaction.

use csv::ReaderBuilder;
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::database::{Database, DatabaseError, DatabaseStats, StoreSnapshot};
use crate::models::{Exercise, ExerciseLog, Workout, WorkoutEntry};
use chrono::{DateTime, Utc};

/// Backup and restore errors
#[derive(Debug, thiserror::Error)]
pub enum BackupError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Missing backup file: {path}")]
    MissingFile { path: String },

    #[error("Invalid record in {file} line {line}: {reason}")]
    InvalidRecord {
        file: String,
        line: usize,
        reason: String,
    },
}

/// Export the whole store as CSV files into `dir`, creating it if needed
pub fn export_backup<P: AsRef<Path>>(
    db: &Database,
    dir: P,
) -> Result<DatabaseStats, BackupError> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;
    let snapshot = db.snapshot()?;

    write_exercises(&snapshot.exercises, &dir.join("exercises.csv"))?;
    write_logs(&snapshot.logs, &dir.join("logs.csv"))?;
    write_workouts(&snapshot.workouts, &dir.join("workouts.csv"))?;
    write_entries(&snapshot.entries, &dir.join("workout_entries.csv"))?;

    let stats = DatabaseStats {
        exercises: snapshot.exercises.len(),
        logs: snapshot.logs.len(),
        workouts: snapshot.workouts.len(),
    };
    info!(
        exercises = stats.exercises,
        logs = stats.logs,
        workouts = stats.workouts,
        "exported backup to {}",
        dir.display()
    );
    Ok(stats)
}

/// Restore the store from a backup directory, replacing all current data.
///
/// `exercises.csv` and `logs.csv` are required; the workout files are
/// optional so backups that predate workout support still restore.
pub fn import_backup<P: AsRef<Path>>(
    db: &mut Database,
    dir: P,
) -> Result<DatabaseStats, BackupError> {
    let dir = dir.as_ref();

    let snapshot = StoreSnapshot {
        exercises: read_exercises(&dir.join("exercises.csv"))?,
        logs: read_logs(&dir.join("logs.csv"))?,
        workouts: read_workouts(&dir.join("workouts.csv"))?,
        entries: read_entries(&dir.join("workout_entries.csv"))?,
    };
    db.restore(&snapshot)?;

    let stats = DatabaseStats {
        exercises: snapshot.exercises.len(),
        logs: snapshot.logs.len(),
        workouts: snapshot.workouts.len(),
    };
    info!(
        exercises = stats.exercises,
        logs = stats.logs,
        workouts = stats.workouts,
        "restored backup from {}",
        dir.display()
    );
    Ok(stats)
}

// --- Writers ---

fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}

fn write_exercises(exercises: &[Exercise], path: &Path) -> Result<(), BackupError> {
    let mut file = std::fs::File::create(path)?;
    writeln!(file, "id,name,weight_step,hidden")?;
    for exercise in exercises {
        writeln!(
            file,
            "{},{},{},{}",
            exercise.id,
            quote(&exercise.name),
            exercise.weight_step,
            if exercise.hidden { "1" } else { "0" }
        )?;
    }
    Ok(())
}

fn write_logs(logs: &[ExerciseLog], path: &Path) -> Result<(), BackupError> {
    let mut file = std::fs::File::create(path)?;
    writeln!(file, "id,exercise_id,date,weight,reps")?;
    for log in logs {
        writeln!(
            file,
            "{},{},{},{},{}",
            log.id,
            log.exercise_id,
            log.date.timestamp_millis(),
            log.weight,
            log.reps
        )?;
    }
    Ok(())
}

fn write_workouts(workouts: &[Workout], path: &Path) -> Result<(), BackupError> {
    let mut file = std::fs::File::create(path)?;
    writeln!(file, "id,name,last_viewed")?;
    for workout in workouts {
        writeln!(
            file,
            "{},{},{}",
            workout.id,
            quote(&workout.name),
            workout.last_viewed.timestamp_millis()
        )?;
    }
    Ok(())
}

fn write_entries(entries: &[WorkoutEntry], path: &Path) -> Result<(), BackupError> {
    let mut file = std::fs::File::create(path)?;
    writeln!(file, "workout_id,exercise_id,position")?;
    for entry in entries {
        writeln!(
            file,
            "{},{},{}",
            entry.workout_id, entry.exercise_id, entry.position
        )?;
    }
    Ok(())
}

// --- Readers ---

fn field<'r>(
    record: &'r csv::StringRecord,
    idx: usize,
    file: &str,
    line: usize,
) -> Result<&'r str, BackupError> {
    record.get(idx).ok_or_else(|| BackupError::InvalidRecord {
        file: file.to_string(),
        line,
        reason: format!("missing column {}", idx),
    })
}

fn parse_field<T: std::str::FromStr>(
    record: &csv::StringRecord,
    idx: usize,
    file: &str,
    line: usize,
) -> Result<T, BackupError> {
    let raw = field(record, idx, file, line)?;
    raw.trim()
        .parse::<T>()
        .map_err(|_| BackupError::InvalidRecord {
            file: file.to_string(),
            line,
            reason: format!("cannot parse {:?}", raw),
        })
}

fn parse_date(
    record: &csv::StringRecord,
    idx: usize,
    file: &str,
    line: usize,
) -> Result<DateTime<Utc>, BackupError> {
    let millis: i64 = parse_field(record, idx, file, line)?;
    DateTime::from_timestamp_millis(millis).ok_or_else(|| BackupError::InvalidRecord {
        file: file.to_string(),
        line,
        reason: format!("timestamp {} out of range", millis),
    })
}

fn read_exercises(path: &Path) -> Result<Vec<Exercise>, BackupError> {
    if !path.exists() {
        return Err(BackupError::MissingFile {
            path: path.display().to_string(),
        });
    }
    let file = path.file_name().map(|f| f.to_string_lossy().to_string()).unwrap_or_default();
    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;

    let mut exercises = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record = result?;
        let line = i + 2; // header is line 1
        exercises.push(Exercise {
            id: parse_field(&record, 0, &file, line)?,
            name: field(&record, 1, &file, line)?.to_string(),
            weight_step: parse_field(&record, 2, &file, line)?,
            // Older backups carry no hidden column
            hidden: match record.get(3) {
                Some(raw) => raw.trim() != "0" && !raw.trim().is_empty(),
                None => false,
            },
        });
    }
    Ok(exercises)
}

fn read_logs(path: &Path) -> Result<Vec<ExerciseLog>, BackupError> {
    if !path.exists() {
        return Err(BackupError::MissingFile {
            path: path.display().to_string(),
        });
    }
    let file = path.file_name().map(|f| f.to_string_lossy().to_string()).unwrap_or_default();
    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;

    let mut logs = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record = result?;
        let line = i + 2;
        logs.push(ExerciseLog {
            id: parse_field(&record, 0, &file, line)?,
            exercise_id: parse_field(&record, 1, &file, line)?,
            date: parse_date(&record, 2, &file, line)?,
            weight: parse_field(&record, 3, &file, line)?,
            reps: parse_field(&record, 4, &file, line)?,
        });
    }
    Ok(logs)
}

fn read_workouts(path: &Path) -> Result<Vec<Workout>, BackupError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let file = path.file_name().map(|f| f.to_string_lossy().to_string()).unwrap_or_default();
    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;

    let mut workouts = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record = result?;
        let line = i + 2;
        workouts.push(Workout {
            id: parse_field(&record, 0, &file, line)?,
            name: field(&record, 1, &file, line)?.to_string(),
            last_viewed: parse_date(&record, 2, &file, line)?,
        });
    }
    Ok(workouts)
}

fn read_entries(path: &Path) -> Result<Vec<WorkoutEntry>, BackupError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let file = path.file_name().map(|f| f.to_string_lossy().to_string()).unwrap_or_default();
    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;

    let mut entries = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record = result?;
        let line = i + 2;
        entries.push(WorkoutEntry {
            workout_id: parse_field(&record, 0, &file, line)?,
            exercise_id: parse_field(&record, 1, &file, line)?,
            position: parse_field(&record, 2, &file, line)?,
        });
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn test_snapshot() -> StoreSnapshot {
        let date = |day: u32| Utc.with_ymd_and_hms(2024, 5, day, 9, 0, 0).unwrap();
        StoreSnapshot {
            exercises: vec![
                Exercise {
                    id: 1,
                    name: "Bench Press".to_string(),
                    weight_step: 2.5,
                    hidden: false,
                },
                Exercise {
                    id: 2,
                    name: "Squat, High Bar".to_string(),
                    weight_step: 5.0,
                    hidden: true,
                },
            ],
            logs: vec![
                ExerciseLog {
                    id: 10,
                    exercise_id: 1,
                    date: date(1),
                    weight: 100.0,
                    reps: 5,
                },
                ExerciseLog {
                    id: 11,
                    exercise_id: 1,
                    date: date(3),
                    weight: 102.5,
                    reps: 5,
                },
            ],
            workouts: vec![Workout {
                id: 4,
                name: "Push Day".to_string(),
                last_viewed: date(3),
            }],
            entries: vec![WorkoutEntry {
                workout_id: 4,
                exercise_id: 1,
                position: 0,
            }],
        }
    }

    #[test]
    fn test_backup_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = test_snapshot();

        let mut source = Database::open_in_memory().unwrap();
        source.restore(&snapshot).unwrap();
        let stats = export_backup(&source, dir.path()).unwrap();
        assert_eq!(stats.exercises, 2);
        assert_eq!(stats.logs, 2);

        let mut target = Database::open_in_memory().unwrap();
        import_backup(&mut target, dir.path()).unwrap();

        let mut restored = target.snapshot().unwrap();
        let mut expected = snapshot.clone();
        restored.exercises.sort_by_key(|e| e.id);
        expected.exercises.sort_by_key(|e| e.id);
        restored.logs.sort_by_key(|l| l.id);
        expected.logs.sort_by_key(|l| l.id);
        assert_eq!(restored.exercises, expected.exercises);
        assert_eq!(restored.logs, expected.logs);
        assert_eq!(restored.workouts, expected.workouts);
        assert_eq!(restored.entries, expected.entries);
    }

    #[test]
    fn test_export_writes_expected_rows() {
        let dir = tempfile::tempdir().unwrap();
        let mut db = Database::open_in_memory().unwrap();
        db.restore(&test_snapshot()).unwrap();

        export_backup(&db, dir.path()).unwrap();

        let exercises = std::fs::read_to_string(dir.path().join("exercises.csv")).unwrap();
        assert!(exercises.contains("id,name,weight_step,hidden"));
        assert!(exercises.contains("1,\"Bench Press\",2.5,0"));
        // Comma inside the name stays quoted
        assert!(exercises.contains("2,\"Squat, High Bar\",5,1"));

        let logs = std::fs::read_to_string(dir.path().join("logs.csv")).unwrap();
        assert!(logs.contains("10,1,"));
        assert!(logs.contains(",100,5"));
    }

    #[test]
    fn test_restore_tolerates_missing_workout_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut db = Database::open_in_memory().unwrap();
        db.restore(&test_snapshot()).unwrap();
        export_backup(&db, dir.path()).unwrap();

        std::fs::remove_file(dir.path().join("workouts.csv")).unwrap();
        std::fs::remove_file(dir.path().join("workout_entries.csv")).unwrap();

        let mut target = Database::open_in_memory().unwrap();
        let stats = import_backup(&mut target, dir.path()).unwrap();
        assert_eq!(stats.exercises, 2);
        assert_eq!(stats.workouts, 0);
    }

    #[test]
    fn test_missing_exercises_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut db = Database::open_in_memory().unwrap();

        let result = import_backup(&mut db, dir.path());
        assert!(matches!(result, Err(BackupError::MissingFile { .. })));
    }

    #[test]
    fn test_invalid_record_reports_file_and_line() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("exercises.csv"),
            "id,name,weight_step,hidden\nnot_a_number,Bench,2.5,0\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("logs.csv"), "id,exercise_id,date,weight,reps\n").unwrap();

        let mut db = Database::open_in_memory().unwrap();
        let result = import_backup(&mut db, dir.path());
        match result {
            Err(BackupError::InvalidRecord { file, line, .. }) => {
                assert_eq!(file, "exercises.csv");
                assert_eq!(line, 2);
            }
            other => panic!("expected InvalidRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_restore_replaces_existing_data() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = Database::open_in_memory().unwrap();
        source.restore(&test_snapshot()).unwrap();
        export_backup(&source, dir.path()).unwrap();

        let mut target = Database::open_in_memory().unwrap();
        target.add_exercise("Leftover", 1.25).unwrap();
        import_backup(&mut target, dir.path()).unwrap();

        let names: Vec<String> = target
            .list_exercises(true)
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert!(!names.contains(&"Leftover".to_string()));
        assert!(names.contains(&"Bench Press".to_string()));
    }
}
