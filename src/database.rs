use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

use crate::models::{Exercise, ExerciseLog, Workout, WorkoutEntry};

/// Database operation errors
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },
}

/// Row counts for the whole store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatabaseStats {
    pub exercises: usize,
    pub logs: usize,
    pub workouts: usize,
}

/// A full copy of the store, used by backup and restore
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StoreSnapshot {
    pub exercises: Vec<Exercise>,
    pub logs: Vec<ExerciseLog>,
    pub workouts: Vec<Workout>,
    pub entries: Vec<WorkoutEntry>,
}

/// SQLite-backed store for exercises, logs and workouts.
///
/// The handle is constructed explicitly and passed to whoever needs it;
/// nothing in this crate holds a process-wide connection.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Create or open a database at the specified path
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self, DatabaseError> {
        if let Some(parent) = db_path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(db_path)?;
        let mut db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    /// Open a throwaway in-memory database
    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    /// Initialize database schema with tables and indexes
    fn init_schema(&mut self) -> Result<(), DatabaseError> {
        // WAL for better concurrent access; foreign keys are off by default
        // in SQLite and cascade deletes depend on them
        self.conn.pragma_update(None, "journal_mode", "WAL")?;
        self.conn.pragma_update(None, "synchronous", "NORMAL")?;
        self.conn.pragma_update(None, "foreign_keys", "ON")?;

        self.conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS exercises (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                weight_step REAL NOT NULL,
                hidden INTEGER NOT NULL DEFAULT 0
            )
            "#,
            [],
        )?;

        self.conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS exercise_logs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                exercise_id INTEGER NOT NULL,
                date TEXT NOT NULL,
                weight REAL NOT NULL,
                reps INTEGER NOT NULL,

                FOREIGN KEY (exercise_id) REFERENCES exercises (id) ON DELETE CASCADE
            )
            "#,
            [],
        )?;

        self.conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS workouts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                last_viewed TEXT NOT NULL
            )
            "#,
            [],
        )?;

        self.conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS workout_entries (
                workout_id INTEGER NOT NULL,
                exercise_id INTEGER NOT NULL,
                position INTEGER NOT NULL,

                PRIMARY KEY (workout_id, exercise_id),
                FOREIGN KEY (workout_id) REFERENCES workouts (id) ON DELETE CASCADE,
                FOREIGN KEY (exercise_id) REFERENCES exercises (id) ON DELETE CASCADE
            )
            "#,
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_logs_exercise_date ON exercise_logs (exercise_id, date)",
            [],
        )?;
        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_entries_workout ON workout_entries (workout_id, position)",
            [],
        )?;

        Ok(())
    }

    // --- Exercises ---

    /// Create a new exercise and return it with its assigned id
    pub fn add_exercise(&mut self, name: &str, weight_step: f64) -> Result<Exercise, DatabaseError> {
        self.conn.execute(
            "INSERT INTO exercises (name, weight_step, hidden) VALUES (?1, ?2, 0)",
            params![name, weight_step],
        )?;
        Ok(Exercise {
            id: self.conn.last_insert_rowid(),
            name: name.to_string(),
            weight_step,
            hidden: false,
        })
    }

    pub fn get_exercise(&self, id: i64) -> Result<Exercise, DatabaseError> {
        self.conn
            .query_row(
                "SELECT id, name, weight_step, hidden FROM exercises WHERE id = ?1",
                params![id],
                Self::exercise_from_row,
            )
            .optional()?
            .ok_or(DatabaseError::NotFound {
                entity: "exercise",
                id,
            })
    }

    /// Look an exercise up by its display name
    pub fn find_exercise_by_name(&self, name: &str) -> Result<Option<Exercise>, DatabaseError> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, name, weight_step, hidden FROM exercises WHERE name = ?1",
                params![name],
                Self::exercise_from_row,
            )
            .optional()?)
    }

    /// All exercises, alphabetical. Hidden ones are skipped unless asked for.
    pub fn list_exercises(&self, include_hidden: bool) -> Result<Vec<Exercise>, DatabaseError> {
        let query = if include_hidden {
            "SELECT id, name, weight_step, hidden FROM exercises ORDER BY name"
        } else {
            "SELECT id, name, weight_step, hidden FROM exercises WHERE hidden = 0 ORDER BY name"
        };
        let mut stmt = self.conn.prepare(query)?;
        let rows = stmt.query_map([], Self::exercise_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn update_exercise(&mut self, exercise: &Exercise) -> Result<(), DatabaseError> {
        let changed = self.conn.execute(
            "UPDATE exercises SET name = ?1, weight_step = ?2, hidden = ?3 WHERE id = ?4",
            params![exercise.name, exercise.weight_step, exercise.hidden, exercise.id],
        )?;
        if changed == 0 {
            return Err(DatabaseError::NotFound {
                entity: "exercise",
                id: exercise.id,
            });
        }
        Ok(())
    }

    /// Delete an exercise; its logs and workout memberships cascade away
    pub fn delete_exercise(&mut self, id: i64) -> Result<(), DatabaseError> {
        let changed = self
            .conn
            .execute("DELETE FROM exercises WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(DatabaseError::NotFound {
                entity: "exercise",
                id,
            });
        }
        Ok(())
    }

    // --- Logs ---

    /// Record a set for an exercise
    pub fn add_log(
        &mut self,
        exercise_id: i64,
        date: DateTime<Utc>,
        weight: f64,
        reps: u32,
    ) -> Result<ExerciseLog, DatabaseError> {
        // Resolve a friendly error before the FK constraint fires
        self.get_exercise(exercise_id)?;
        self.conn.execute(
            "INSERT INTO exercise_logs (exercise_id, date, weight, reps) VALUES (?1, ?2, ?3, ?4)",
            params![exercise_id, date, weight, reps],
        )?;
        Ok(ExerciseLog {
            id: self.conn.last_insert_rowid(),
            exercise_id,
            date,
            weight,
            reps,
        })
    }

    pub fn get_log(&self, id: i64) -> Result<ExerciseLog, DatabaseError> {
        self.conn
            .query_row(
                "SELECT id, exercise_id, date, weight, reps FROM exercise_logs WHERE id = ?1",
                params![id],
                Self::log_from_row,
            )
            .optional()?
            .ok_or(DatabaseError::NotFound { entity: "log", id })
    }

    /// All logged sets for an exercise, in storage order.
    ///
    /// Deliberately unordered; consumers sort by date themselves.
    pub fn logs_for_exercise(&self, exercise_id: i64) -> Result<Vec<ExerciseLog>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, exercise_id, date, weight, reps FROM exercise_logs WHERE exercise_id = ?1",
        )?;
        let rows = stmt.query_map(params![exercise_id], Self::log_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Most recent log date for an exercise, if any sets were logged
    pub fn last_trained(&self, exercise_id: i64) -> Result<Option<DateTime<Utc>>, DatabaseError> {
        Ok(self.conn.query_row(
            "SELECT MAX(date) FROM exercise_logs WHERE exercise_id = ?1",
            params![exercise_id],
            |row| row.get::<_, Option<DateTime<Utc>>>(0),
        )?)
    }

    /// Rewrite a logged set in place, keyed by its id
    pub fn update_log(&mut self, log: &ExerciseLog) -> Result<(), DatabaseError> {
        // Resolve a friendly error before the FK constraint fires
        self.get_exercise(log.exercise_id)?;
        let changed = self.conn.execute(
            "UPDATE exercise_logs SET exercise_id = ?1, date = ?2, weight = ?3, reps = ?4 WHERE id = ?5",
            params![log.exercise_id, log.date, log.weight, log.reps, log.id],
        )?;
        if changed == 0 {
            return Err(DatabaseError::NotFound {
                entity: "log",
                id: log.id,
            });
        }
        Ok(())
    }

    pub fn delete_log(&mut self, id: i64) -> Result<(), DatabaseError> {
        let changed = self
            .conn
            .execute("DELETE FROM exercise_logs WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(DatabaseError::NotFound { entity: "log", id });
        }
        Ok(())
    }

    // --- Workouts ---

    pub fn create_workout(&mut self, name: &str) -> Result<Workout, DatabaseError> {
        let now = Utc::now();
        self.conn.execute(
            "INSERT INTO workouts (name, last_viewed) VALUES (?1, ?2)",
            params![name, now],
        )?;
        Ok(Workout {
            id: self.conn.last_insert_rowid(),
            name: name.to_string(),
            last_viewed: now,
        })
    }

    pub fn get_workout(&self, id: i64) -> Result<Workout, DatabaseError> {
        self.conn
            .query_row(
                "SELECT id, name, last_viewed FROM workouts WHERE id = ?1",
                params![id],
                Self::workout_from_row,
            )
            .optional()?
            .ok_or(DatabaseError::NotFound {
                entity: "workout",
                id,
            })
    }

    /// All workouts, most recently viewed first
    pub fn list_workouts(&self) -> Result<Vec<Workout>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, last_viewed FROM workouts ORDER BY last_viewed DESC")?;
        let rows = stmt.query_map([], Self::workout_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Append an exercise to the end of a workout
    pub fn add_exercise_to_workout(
        &mut self,
        workout_id: i64,
        exercise_id: i64,
    ) -> Result<WorkoutEntry, DatabaseError> {
        self.get_workout(workout_id)?;
        self.get_exercise(exercise_id)?;
        let position: u32 = self.conn.query_row(
            "SELECT COALESCE(MAX(position) + 1, 0) FROM workout_entries WHERE workout_id = ?1",
            params![workout_id],
            |row| row.get(0),
        )?;
        self.conn.execute(
            "INSERT OR REPLACE INTO workout_entries (workout_id, exercise_id, position) VALUES (?1, ?2, ?3)",
            params![workout_id, exercise_id, position],
        )?;
        Ok(WorkoutEntry {
            workout_id,
            exercise_id,
            position,
        })
    }

    /// Exercises of a workout in their configured order
    pub fn workout_exercises(&self, workout_id: i64) -> Result<Vec<Exercise>, DatabaseError> {
        self.get_workout(workout_id)?;
        let mut stmt = self.conn.prepare(
            r#"
            SELECT e.id, e.name, e.weight_step, e.hidden
            FROM exercises e
            JOIN workout_entries we ON we.exercise_id = e.id
            WHERE we.workout_id = ?1
            ORDER BY we.position
            "#,
        )?;
        let rows = stmt.query_map(params![workout_id], Self::exercise_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Drop one exercise from a workout, leaving the rest in order
    pub fn remove_exercise_from_workout(
        &mut self,
        workout_id: i64,
        exercise_id: i64,
    ) -> Result<(), DatabaseError> {
        self.get_workout(workout_id)?;
        let changed = self.conn.execute(
            "DELETE FROM workout_entries WHERE workout_id = ?1 AND exercise_id = ?2",
            params![workout_id, exercise_id],
        )?;
        if changed == 0 {
            return Err(DatabaseError::NotFound {
                entity: "workout entry",
                id: exercise_id,
            });
        }
        Ok(())
    }

    /// Bump a workout's last-viewed timestamp to now
    pub fn touch_workout(&mut self, id: i64) -> Result<(), DatabaseError> {
        let changed = self.conn.execute(
            "UPDATE workouts SET last_viewed = ?1 WHERE id = ?2",
            params![Utc::now(), id],
        )?;
        if changed == 0 {
            return Err(DatabaseError::NotFound {
                entity: "workout",
                id,
            });
        }
        Ok(())
    }

    /// Delete a workout; its entries cascade away, exercises and logs stay
    pub fn delete_workout(&mut self, id: i64) -> Result<(), DatabaseError> {
        let changed = self
            .conn
            .execute("DELETE FROM workouts WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(DatabaseError::NotFound {
                entity: "workout",
                id,
            });
        }
        Ok(())
    }

    // --- Whole-store operations ---

    /// Get database statistics
    pub fn stats(&self) -> Result<DatabaseStats, DatabaseError> {
        let exercises: usize =
            self.conn
                .query_row("SELECT COUNT(*) FROM exercises", [], |row| row.get(0))?;
        let logs: usize =
            self.conn
                .query_row("SELECT COUNT(*) FROM exercise_logs", [], |row| row.get(0))?;
        let workouts: usize =
            self.conn
                .query_row("SELECT COUNT(*) FROM workouts", [], |row| row.get(0))?;
        Ok(DatabaseStats {
            exercises,
            logs,
            workouts,
        })
    }

    /// Copy every table out of the store
    pub fn snapshot(&self) -> Result<StoreSnapshot, DatabaseError> {
        let exercises = self.list_exercises(true)?;

        let mut stmt = self
            .conn
            .prepare("SELECT id, exercise_id, date, weight, reps FROM exercise_logs")?;
        let logs = stmt
            .query_map([], Self::log_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let workouts = self.list_workouts()?;

        let mut stmt = self
            .conn
            .prepare("SELECT workout_id, exercise_id, position FROM workout_entries")?;
        let entries = stmt
            .query_map([], |row| {
                Ok(WorkoutEntry {
                    workout_id: row.get(0)?,
                    exercise_id: row.get(1)?,
                    position: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(StoreSnapshot {
            exercises,
            logs,
            workouts,
            entries,
        })
    }

    /// Replace the entire store with the snapshot's contents, keeping the
    /// snapshot's ids. Runs in one transaction; the store is untouched if
    /// any insert fails.
    pub fn restore(&mut self, snapshot: &StoreSnapshot) -> Result<(), DatabaseError> {
        let tx = self.conn.transaction()?;

        tx.execute("DELETE FROM workout_entries", [])?;
        tx.execute("DELETE FROM exercise_logs", [])?;
        tx.execute("DELETE FROM workouts", [])?;
        tx.execute("DELETE FROM exercises", [])?;

        for exercise in &snapshot.exercises {
            tx.execute(
                "INSERT INTO exercises (id, name, weight_step, hidden) VALUES (?1, ?2, ?3, ?4)",
                params![exercise.id, exercise.name, exercise.weight_step, exercise.hidden],
            )?;
        }
        for log in &snapshot.logs {
            tx.execute(
                "INSERT INTO exercise_logs (id, exercise_id, date, weight, reps) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![log.id, log.exercise_id, log.date, log.weight, log.reps],
            )?;
        }
        for workout in &snapshot.workouts {
            tx.execute(
                "INSERT INTO workouts (id, name, last_viewed) VALUES (?1, ?2, ?3)",
                params![workout.id, workout.name, workout.last_viewed],
            )?;
        }
        for entry in &snapshot.entries {
            tx.execute(
                "INSERT INTO workout_entries (workout_id, exercise_id, position) VALUES (?1, ?2, ?3)",
                params![entry.workout_id, entry.exercise_id, entry.position],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    // --- Row mapping helpers ---

    fn exercise_from_row(row: &Row) -> rusqlite::Result<Exercise> {
        Ok(Exercise {
            id: row.get("id")?,
            name: row.get("name")?,
            weight_step: row.get("weight_step")?,
            hidden: row.get("hidden")?,
        })
    }

    fn log_from_row(row: &Row) -> rusqlite::Result<ExerciseLog> {
        Ok(ExerciseLog {
            id: row.get("id")?,
            exercise_id: row.get("exercise_id")?,
            date: row.get("date")?,
            weight: row.get("weight")?,
            reps: row.get("reps")?,
        })
    }

    fn workout_from_row(row: &Row) -> rusqlite::Result<Workout> {
        Ok(Workout {
            id: row.get("id")?,
            name: row.get("name")?,
            last_viewed: row.get("last_viewed")?,
        })
    }
}
