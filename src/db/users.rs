use crate::errors::AppResult;
use crate::models::user::UserProfile;
use rusqlite::{Connection, OptionalExtension, params};

pub fn get_profile(conn: &Connection, id: &str) -> AppResult<Option<UserProfile>> {
    let mut stmt =
        conn.prepare_cached("SELECT id, name, email, avatar FROM users WHERE id = ?1")?;
    let profile = stmt
        .query_row([id], |row| {
            Ok(UserProfile {
                id: row.get(0)?,
                name: row.get(1)?,
                email: row.get(2)?,
                avatar: row.get(3)?,
            })
        })
        .optional()?;
    Ok(profile)
}

pub fn upsert_profile(conn: &Connection, p: &UserProfile) -> AppResult<()> {
    conn.execute(
        "INSERT INTO users (id, name, email, avatar)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(id) DO UPDATE SET
             name = excluded.name,
             email = excluded.email,
             avatar = excluded.avatar",
        params![p.id, p.name, p.email, p.avatar],
    )?;
    Ok(())
}
