use crate::db::schema::{PASSWORDS, USERS};
use crate::error::VaultError;
use crate::schema::value::{Record, Value};
use serde::Serialize;
use std::fmt;

/// A row of `users`. `user_id` is 0 until the row has been stored.
#[derive(Clone, PartialEq, Serialize)]
pub struct User {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip)]
    pub hashed_pw: String,
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>, hashed_pw: impl Into<String>) -> Self {
        Self {
            user_id: 0,
            name: name.into(),
            email: email.into(),
            hashed_pw: hashed_pw.into(),
        }
    }

    /// Insert payload; the primary key is assigned by the engine.
    pub fn to_record(&self) -> Record {
        Record::new()
            .with("name", self.name.as_str())
            .with("email", self.email.as_str())
            .with("hashed_pw", self.hashed_pw.as_str())
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "User(id={}, name={}, email={})", self.user_id, self.name, self.email)
    }
}

impl TryFrom<Record> for User {
    type Error = VaultError;

    fn try_from(record: Record) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: integer(&record, USERS, "user_id")?,
            name: text(&record, USERS, "name")?,
            email: text(&record, USERS, "email")?,
            hashed_pw: text(&record, USERS, "hashed_pw")?,
        })
    }
}

/// A row of `passwords`.
#[derive(Clone, PartialEq, Serialize)]
pub struct PasswordEntry {
    pub password_id: i64,
    pub app_name: String,
    pub app_url: String,
    pub username: String,
    #[serde(skip)]
    pub password: String,
    pub user_id: i64,
}

impl PasswordEntry {
    pub fn to_record(&self) -> Record {
        Record::new()
            .with("app_name", self.app_name.as_str())
            .with("app_url", self.app_url.as_str())
            .with("username", self.username.as_str())
            .with("password", self.password.as_str())
            .with("user_id", self.user_id)
    }
}

impl fmt::Debug for PasswordEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Password(name={}, url={}, username={})",
            self.app_name, self.app_url, self.username
        )
    }
}

impl TryFrom<Record> for PasswordEntry {
    type Error = VaultError;

    fn try_from(record: Record) -> Result<Self, Self::Error> {
        Ok(Self {
            password_id: integer(&record, PASSWORDS, "password_id")?,
            app_name: text(&record, PASSWORDS, "app_name")?,
            app_url: text(&record, PASSWORDS, "app_url")?,
            username: text(&record, PASSWORDS, "username")?,
            password: text(&record, PASSWORDS, "password")?,
            user_id: integer(&record, PASSWORDS, "user_id")?,
        })
    }
}

fn field<'r>(record: &'r Record, table: &str, column: &str) -> Result<&'r Value, VaultError> {
    record.get(column).ok_or_else(|| VaultError::ColumnNotFound {
        table: table.to_string(),
        column: column.to_string(),
    })
}

fn integer(record: &Record, table: &str, column: &str) -> Result<i64, VaultError> {
    let value = field(record, table, column)?;
    value.as_i64().ok_or_else(|| VaultError::Decode {
        column: column.to_string(),
        reason: format!("expected an integer, got {value}"),
    })
}

fn text(record: &Record, table: &str, column: &str) -> Result<String, VaultError> {
    let value = field(record, table, column)?;
    value.as_str().map(str::to_string).ok_or_else(|| VaultError::Decode {
        column: column.to_string(),
        reason: format!("expected text, got {value}"),
    })
}
