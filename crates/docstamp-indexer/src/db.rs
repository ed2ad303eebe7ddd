use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::Mutex;

/// One indexed registration, as reconstructed from the event stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistrationRow {
    pub fingerprint: [u8; 32],
    pub uri: String,
    pub owner: String,
    /// Ledger timestamp from the event payload (unix seconds).
    pub registered_at: u64,
    /// Ledger sequence the event was observed in.
    pub ledger: u64,
}

pub struct Db {
    conn: Mutex<Connection>,
}

impl Db {
    pub fn open(path: &Path) -> rusqlite::Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS registrations (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                fingerprint BLOB NOT NULL UNIQUE,
                uri TEXT NOT NULL,
                owner TEXT NOT NULL,
                registered_at INTEGER NOT NULL,
                ledger INTEGER NOT NULL
            );
            CREATE INDEX IF NOT EXISTS registrations_owner ON registrations (owner);
            CREATE TABLE IF NOT EXISTS sync_cursor (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                last_ledger INTEGER NOT NULL,
                last_cursor TEXT
            );",
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Insert one registration. Replayed events are ignored: the chain
    /// guarantees a fingerprint registers at most once, so an existing
    /// row is always the same row.
    pub fn insert_registration(&self, row: &RegistrationRow) -> rusqlite::Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR IGNORE INTO registrations
                (fingerprint, uri, owner, registered_at, ledger)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                row.fingerprint.as_slice(),
                row.uri,
                row.owner,
                row.registered_at as i64,
                row.ledger as i64
            ],
        )?;
        Ok(())
    }

    pub fn get_by_fingerprint(
        &self,
        fingerprint: &[u8; 32],
    ) -> rusqlite::Result<Option<RegistrationRow>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT fingerprint, uri, owner, registered_at, ledger
             FROM registrations WHERE fingerprint = ?1",
        )?;
        let mut rows = stmt.query_map(params![fingerprint.as_slice()], row_from_sql)?;
        match rows.next() {
            Some(row) => Ok(Some(row?)),
            None => Ok(None),
        }
    }

    /// All registrations by `owner`, in observed (submission) order.
    pub fn get_by_owner(&self, owner: &str) -> rusqlite::Result<Vec<RegistrationRow>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT fingerprint, uri, owner, registered_at, ledger
             FROM registrations WHERE owner = ?1 ORDER BY seq",
        )?;
        let rows = stmt
            .query_map(params![owner], row_from_sql)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Latest registrations first, capped at `limit`.
    pub fn recent(&self, limit: usize) -> rusqlite::Result<Vec<RegistrationRow>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT fingerprint, uri, owner, registered_at, ledger
             FROM registrations ORDER BY seq DESC LIMIT ?1",
        )?;
        let rows = stmt
            .query_map(params![limit as i64], row_from_sql)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    pub fn save_cursor(&self, last_ledger: u64, cursor: Option<&str>) -> rusqlite::Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO sync_cursor (id, last_ledger, last_cursor)
             VALUES (1, ?1, ?2)
             ON CONFLICT(id) DO UPDATE SET last_ledger = ?1, last_cursor = ?2",
            params![last_ledger as i64, cursor],
        )?;
        Ok(())
    }

    pub fn load_cursor(&self) -> rusqlite::Result<Option<(u64, Option<String>)>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT last_ledger, last_cursor FROM sync_cursor WHERE id = 1",
        )?;
        let mut rows = stmt.query_map([], |row| {
            let ledger: i64 = row.get(0)?;
            let cursor: Option<String> = row.get(1)?;
            Ok((ledger as u64, cursor))
        })?;
        match rows.next() {
            Some(row) => Ok(Some(row?)),
            None => Ok(None),
        }
    }
}

fn row_from_sql(row: &rusqlite::Row<'_>) -> rusqlite::Result<RegistrationRow> {
    let fp_bytes: Vec<u8> = row.get(0)?;
    let mut fingerprint = [0u8; 32];
    let len = fp_bytes.len().min(32);
    fingerprint[..len].copy_from_slice(&fp_bytes[..len]);
    let registered_at: i64 = row.get(3)?;
    let ledger: i64 = row.get(4)?;
    Ok(RegistrationRow {
        fingerprint,
        uri: row.get(1)?,
        owner: row.get(2)?,
        registered_at: registered_at as u64,
        ledger: ledger as u64,
    })
}
