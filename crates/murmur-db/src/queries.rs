use anyhow::Result;
use rusqlite::{Connection, ErrorCode, OptionalExtension, Row};

use murmur_types::api::NewMessage;
use murmur_types::models::{Account, Message};

use crate::models::{AccountRow, MessageRow};
use crate::store::{AccountStore, MessageStore};
use crate::{Database, UniqueViolation};

const ACCOUNT_COLUMNS: &str = "account_id, username, password";
const MESSAGE_COLUMNS: &str = "message_id, posted_by, message_text, time_posted";

impl AccountStore for Database {
    fn account_by_id(&self, account_id: i64) -> Result<Option<Account>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    &format!("SELECT {ACCOUNT_COLUMNS} FROM account WHERE account_id = ?1"),
                    [account_id],
                    account_row,
                )
                .optional()?;
            Ok(row.map(Account::from))
        })
    }

    fn account_exists(&self, account_id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            exists(conn, "SELECT 1 FROM account WHERE account_id = ?1", [account_id])
        })
    }

    fn username_exists(&self, username: &str) -> Result<bool> {
        self.with_conn(|conn| exists(conn, "SELECT 1 FROM account WHERE username = ?1", [username]))
    }

    fn account_by_credentials(&self, username: &str, password: &str) -> Result<Option<Account>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    &format!(
                        "SELECT {ACCOUNT_COLUMNS} FROM account WHERE username = ?1 AND password = ?2"
                    ),
                    (username, password),
                    account_row,
                )
                .optional()?;
            Ok(row.map(Account::from))
        })
    }

    fn insert_account(&self, username: &str, password: &str) -> Result<Account> {
        self.with_conn(|conn| {
            let inserted = conn.execute(
                "INSERT INTO account (username, password) VALUES (?1, ?2)",
                (username, password),
            );
            match inserted {
                // username is the only constrained column on this table
                Err(rusqlite::Error::SqliteFailure(e, _))
                    if e.code == ErrorCode::ConstraintViolation =>
                {
                    return Err(UniqueViolation { field: "username" }.into());
                }
                other => {
                    other?;
                }
            }

            Ok(Account {
                account_id: conn.last_insert_rowid(),
                username: username.to_string(),
                password: password.to_string(),
            })
        })
    }
}

impl MessageStore for Database {
    fn message_by_id(&self, message_id: i64) -> Result<Option<Message>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    &format!("SELECT {MESSAGE_COLUMNS} FROM message WHERE message_id = ?1"),
                    [message_id],
                    message_row,
                )
                .optional()?;
            Ok(row.map(Message::from))
        })
    }

    fn message_exists(&self, message_id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            exists(conn, "SELECT 1 FROM message WHERE message_id = ?1", [message_id])
        })
    }

    fn all_messages(&self) -> Result<Vec<Message>> {
        self.with_conn(|conn| {
            query_messages(
                conn,
                &format!("SELECT {MESSAGE_COLUMNS} FROM message ORDER BY message_id"),
                rusqlite::params![],
            )
        })
    }

    fn messages_by_poster(&self, account_id: i64) -> Result<Vec<Message>> {
        self.with_conn(|conn| {
            query_messages(
                conn,
                &format!(
                    "SELECT {MESSAGE_COLUMNS} FROM message WHERE posted_by = ?1 ORDER BY message_id"
                ),
                [account_id],
            )
        })
    }

    fn insert_message(&self, posted_by: i64, message: &NewMessage) -> Result<Message> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO message (posted_by, message_text, time_posted) VALUES (?1, ?2, ?3)",
                (posted_by, &message.message_text, message.time_posted),
            )?;

            Ok(Message {
                message_id: conn.last_insert_rowid(),
                posted_by,
                message_text: message.message_text.clone(),
                time_posted: message.time_posted,
            })
        })
    }

    fn replace_message(&self, message: &Message) -> Result<usize> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE message SET posted_by = ?1, message_text = ?2, time_posted = ?3
                 WHERE message_id = ?4",
                (
                    message.posted_by,
                    &message.message_text,
                    message.time_posted,
                    message.message_id,
                ),
            )?;
            Ok(changed)
        })
    }

    fn delete_message(&self, message_id: i64) -> Result<usize> {
        self.with_conn(|conn| {
            let deleted = conn.execute("DELETE FROM message WHERE message_id = ?1", [message_id])?;
            Ok(deleted)
        })
    }
}

fn account_row(row: &Row<'_>) -> rusqlite::Result<AccountRow> {
    Ok(AccountRow {
        account_id: row.get(0)?,
        username: row.get(1)?,
        password: row.get(2)?,
    })
}

fn message_row(row: &Row<'_>) -> rusqlite::Result<MessageRow> {
    Ok(MessageRow {
        message_id: row.get(0)?,
        posted_by: row.get(1)?,
        message_text: row.get(2)?,
        time_posted: row.get(3)?,
    })
}

fn exists<P: rusqlite::Params>(conn: &Connection, sql: &str, params: P) -> Result<bool> {
    let found = conn.query_row(sql, params, |_| Ok(())).optional()?;
    Ok(found.is_some())
}

fn query_messages<P: rusqlite::Params>(conn: &Connection, sql: &str, params: P) -> Result<Vec<Message>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params, message_row)?
        .map(|row| row.map(Message::from))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_message(text: &str) -> NewMessage {
        NewMessage {
            posted_by: None,
            message_text: text.to_string(),
            time_posted: 1_669_947_792,
        }
    }

    #[test]
    fn insert_account_assigns_id() {
        let db = Database::open_in_memory().unwrap();
        let account = db.insert_account("ana", "secret").unwrap();
        assert!(account.account_id > 0);
        assert_eq!(db.account_by_id(account.account_id).unwrap(), Some(account));
    }

    #[test]
    fn duplicate_username_is_unique_violation() {
        let db = Database::open_in_memory().unwrap();
        db.insert_account("ana", "secret").unwrap();

        let err = db.insert_account("ana", "other").unwrap_err();
        assert!(err.downcast_ref::<UniqueViolation>().is_some());
    }

    #[test]
    fn credentials_require_exact_match() {
        let db = Database::open_in_memory().unwrap();
        let account = db.insert_account("ana", "secret").unwrap();

        assert_eq!(db.account_by_credentials("ana", "secret").unwrap(), Some(account));
        assert_eq!(db.account_by_credentials("ana", "Secret").unwrap(), None);
        assert_eq!(db.account_by_credentials("ANA", "secret").unwrap(), None);
    }

    #[test]
    fn messages_by_poster_uses_posted_by() {
        let db = Database::open_in_memory().unwrap();
        let ana = db.insert_account("ana", "secret").unwrap();
        let bo = db.insert_account("bo", "secret").unwrap();

        let first = db.insert_message(ana.account_id, &new_message("one")).unwrap();
        db.insert_message(bo.account_id, &new_message("two")).unwrap();
        let third = db.insert_message(ana.account_id, &new_message("three")).unwrap();

        assert_eq!(db.messages_by_poster(ana.account_id).unwrap(), vec![first, third]);
        assert!(db.messages_by_poster(999).unwrap().is_empty());
        assert_eq!(db.all_messages().unwrap().len(), 3);
    }

    #[test]
    fn replace_and_delete_report_row_counts() {
        let db = Database::open_in_memory().unwrap();
        let ana = db.insert_account("ana", "secret").unwrap();
        let mut message = db.insert_message(ana.account_id, &new_message("one")).unwrap();

        message.message_text = "edited".into();
        assert_eq!(db.replace_message(&message).unwrap(), 1);
        assert_eq!(db.message_by_id(message.message_id).unwrap(), Some(message.clone()));

        assert_eq!(db.delete_message(message.message_id).unwrap(), 1);
        assert_eq!(db.delete_message(message.message_id).unwrap(), 0);
        assert!(!db.message_exists(message.message_id).unwrap());
    }
}
