mod schema;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};

use crate::models::*;

pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Database path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_default() -> Result<Self> {
        let dirs = directories::ProjectDirs::from("", "", "upkeep")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        let db_path = dirs.data_dir().join("upkeep.db");
        Self::open(db_path)
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        schema::run_migrations(&conn)
    }

    // ============================================================
    // User operations
    // ============================================================

    pub fn create_user(&self, input: SignupInput) -> Result<User> {
        let conn = self.conn.lock().expect("database lock poisoned");
        conn.execute(
            "INSERT INTO login (name, password, email) VALUES (?, ?, ?)",
            (&input.name, &input.password, &input.email),
        )?;

        Ok(User {
            uid: conn.last_insert_rowid(),
            name: input.name,
            email: input.email,
        })
    }

    /// Presence check for a matching email/password pair.
    /// No session or token comes out of this, just the answer.
    pub fn verify_login(&self, email: &str, password: &str) -> Result<bool> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM login WHERE email = ? AND password = ?",
            (email, password),
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    pub fn get_uid(&self, email: &str) -> Result<Option<i64>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let uid = conn
            .query_row("SELECT uid FROM login WHERE email = ?", [email], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(uid)
    }

    // ============================================================
    // Household operations
    // ============================================================

    pub fn create_household(&self, input: NewHouseholdInput) -> Result<Household> {
        let conn = self.conn.lock().expect("database lock poisoned");
        conn.execute(
            "INSERT INTO household_details (street_addr, apt, city, state, zip)
             VALUES (?, ?, ?, ?, ?)",
            (
                &input.street_addr,
                &input.apt,
                &input.city,
                &input.state,
                &input.zip,
            ),
        )?;

        Ok(Household {
            household_id: conn.last_insert_rowid(),
            street_addr: input.street_addr,
            apt: input.apt,
            city: input.city,
            state: input.state,
            zip: input.zip,
        })
    }

    pub fn get_household_address(&self, household_id: i64) -> Result<Option<Household>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let household = conn
            .query_row(
                "SELECT householdid, street_addr, apt, city, state, zip
                 FROM household_details WHERE householdid = ?",
                [household_id],
                |row| {
                    Ok(Household {
                        household_id: row.get(0)?,
                        street_addr: row.get(1)?,
                        apt: row.get(2)?,
                        city: row.get(3)?,
                        state: row.get(4)?,
                        zip: row.get(5)?,
                    })
                },
            )
            .optional()?;
        Ok(household)
    }

    pub fn join_household(&self, uid: i64, household_id: i64) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        conn.execute(
            "INSERT INTO household_users (uid, householdid) VALUES (?, ?)",
            (uid, household_id),
        )?;
        Ok(())
    }

    /// The household a user belongs to, if any.
    /// A user joins at most one household in practice; first row wins.
    pub fn household_for_user(&self, uid: i64) -> Result<Option<i64>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let household_id = conn
            .query_row(
                "SELECT householdid FROM household_users WHERE uid = ?",
                [uid],
                |row| row.get(0),
            )
            .optional()?;
        Ok(household_id)
    }

    // ============================================================
    // Task operations
    // ============================================================

    pub fn create_task(&self, input: CreateTaskInput) -> Result<TaskRecord> {
        let conn = self.conn.lock().expect("database lock poisoned");
        conn.execute(
            "INSERT INTO tasks (householdid, title, location, due_date, notes, frequency, completed)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            (
                input.household_id,
                &input.title,
                &input.location,
                input.due_date.to_rfc3339(),
                &input.notes,
                input.recurrence.to_string(),
                input.completed as i32,
            ),
        )?;

        Ok(TaskRecord {
            id: conn.last_insert_rowid(),
            household_id: input.household_id,
            title: input.title,
            location: input.location,
            due_date: input.due_date,
            notes: input.notes,
            recurrence: input.recurrence,
            completed: input.completed,
        })
    }

    pub fn get_tasks_for_household(&self, household_id: i64) -> Result<Vec<TaskRecord>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT taskid, householdid, title, location, due_date, notes, frequency, completed
             FROM tasks WHERE householdid = ? ORDER BY due_date",
        )?;

        let tasks = stmt
            .query_map([household_id], |row| {
                Ok(TaskRecord {
                    id: row.get(0)?,
                    household_id: row.get(1)?,
                    title: row.get(2)?,
                    location: row.get(3)?,
                    due_date: parse_datetime(row.get::<_, String>(4)?),
                    notes: row.get(5)?,
                    recurrence: row
                        .get::<_, String>(6)?
                        .parse()
                        .unwrap_or(Recurrence::None),
                    completed: row.get::<_, i32>(7)? != 0,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(tasks)
    }

    // ============================================================
    // Appliance operations
    // ============================================================

    pub fn add_appliance(&self, input: AddApplianceInput) -> Result<Appliance> {
        let conn = self.conn.lock().expect("database lock poisoned");
        conn.execute(
            "INSERT INTO appliances (room, name, make, model, maintenance_period)
             VALUES (?, ?, ?, ?, ?)",
            (
                &input.room,
                &input.name,
                &input.make,
                &input.model,
                &input.maintenance_period,
            ),
        )?;

        Ok(Appliance {
            id: conn.last_insert_rowid(),
            room: input.room,
            name: input.name,
            make: input.make,
            model: input.model,
            maintenance_period: input.maintenance_period,
        })
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
        }
    }
}

fn parse_datetime(s: String) -> chrono::DateTime<Utc> {
    chrono::DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}
