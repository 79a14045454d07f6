//! Options storage abstraction
//!
//! The settings layer never talks to a database directly. It goes through the
//! narrow [`OptionsAdapter`] trait, which models a generic key-value
//! configuration store holding JSON values under string names. A SQLite
//! implementation is provided for real deployments and an in-memory one for
//! tests.

use async_trait::async_trait;
use parking_lot::RwLock;
use sqlx::{Row, SqlitePool};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::collections::HashMap;
use std::path::Path;

use crate::prelude::*;

#[async_trait]
pub trait OptionsAdapter: Send + Sync {
	/// Read the value stored under `name`, if any.
	async fn read_option(&self, name: &str) -> AgmResult<Option<serde_json::Value>>;

	/// Create or replace the value stored under `name`.
	async fn write_option(&self, name: &str, value: serde_json::Value) -> AgmResult<()>;
}

// MemoryOptionsAdapter //
//**********************//

/// In-memory adapter, used by tests and throwaway deployments.
#[derive(Default)]
pub struct MemoryOptionsAdapter {
	options: RwLock<HashMap<String, serde_json::Value>>,
}

impl MemoryOptionsAdapter {
	pub fn new() -> Self {
		Self::default()
	}
}

#[async_trait]
impl OptionsAdapter for MemoryOptionsAdapter {
	async fn read_option(&self, name: &str) -> AgmResult<Option<serde_json::Value>> {
		Ok(self.options.read().get(name).cloned())
	}

	async fn write_option(&self, name: &str, value: serde_json::Value) -> AgmResult<()> {
		self.options.write().insert(name.to_string(), value);
		Ok(())
	}
}

// SqliteOptionsAdapter //
//**********************//

/// SQLite-backed adapter. Values are stored serialized as JSON text in a
/// single `options` table keyed by name.
pub struct SqliteOptionsAdapter {
	db: SqlitePool,
}

impl SqliteOptionsAdapter {
	pub async fn open(path: impl AsRef<Path>) -> AgmResult<Self> {
		let opts = SqliteConnectOptions::new().filename(path).create_if_missing(true);
		let db = SqlitePool::connect_with(opts)
			.await
			.inspect_err(|err| warn!("DB: {:#?}", err))
			.map_err(|_| Error::DbError)?;
		Self::init(db).await
	}

	/// Private per-pool in-memory database. The pool is capped at one
	/// connection, otherwise every pooled connection would see its own
	/// empty database.
	pub async fn open_in_memory() -> AgmResult<Self> {
		let db = SqlitePoolOptions::new()
			.max_connections(1)
			.connect("sqlite::memory:")
			.await
			.inspect_err(|err| warn!("DB: {:#?}", err))
			.map_err(|_| Error::DbError)?;
		Self::init(db).await
	}

	async fn init(db: SqlitePool) -> AgmResult<Self> {
		sqlx::query("CREATE TABLE IF NOT EXISTS options (name TEXT PRIMARY KEY, value TEXT)")
			.execute(&db)
			.await
			.inspect_err(|err| warn!("DB: {:#?}", err))
			.map_err(|_| Error::DbError)?;
		Ok(Self { db })
	}
}

#[async_trait]
impl OptionsAdapter for SqliteOptionsAdapter {
	async fn read_option(&self, name: &str) -> AgmResult<Option<serde_json::Value>> {
		let row = sqlx::query("SELECT value FROM options WHERE name = ?")
			.bind(name)
			.fetch_optional(&self.db)
			.await
			.inspect_err(|err| warn!("DB: {:#?}", err))
			.map_err(|_| Error::DbError)?;

		Ok(row.and_then(|r| {
			let value: Option<String> = r.get("value");
			value.and_then(|v| serde_json::from_str(&v).ok())
		}))
	}

	async fn write_option(&self, name: &str, value: serde_json::Value) -> AgmResult<()> {
		sqlx::query("INSERT OR REPLACE INTO options (name, value) VALUES (?, ?)")
			.bind(name)
			.bind(value.to_string())
			.execute(&self.db)
			.await
			.inspect_err(|err| warn!("DB: {:#?}", err))
			.map_err(|_| Error::DbError)?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[tokio::test]
	async fn test_memory_adapter_roundtrip() {
		let adapter = MemoryOptionsAdapter::new();
		assert!(adapter.read_option("missing").await.unwrap().is_none());

		adapter.write_option("k", json!({"a": 1})).await.unwrap();
		assert_eq!(adapter.read_option("k").await.unwrap(), Some(json!({"a": 1})));

		adapter.write_option("k", json!({"a": 2})).await.unwrap();
		assert_eq!(adapter.read_option("k").await.unwrap(), Some(json!({"a": 2})));
	}

	#[tokio::test]
	async fn test_sqlite_adapter_roundtrip() {
		let adapter = SqliteOptionsAdapter::open_in_memory().await.unwrap();
		assert!(adapter.read_option("missing").await.unwrap().is_none());

		adapter.write_option("k", json!(["x", "y"])).await.unwrap();
		assert_eq!(adapter.read_option("k").await.unwrap(), Some(json!(["x", "y"])));

		// Replace, not merge
		adapter.write_option("k", json!("z")).await.unwrap();
		assert_eq!(adapter.read_option("k").await.unwrap(), Some(json!("z")));
	}
}

// vim: ts=4
