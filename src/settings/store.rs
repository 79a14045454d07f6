//! Settings store
//!
//! Exclusive owner of the persisted options record. Reads go through a small
//! write-through cache, writes always replace the whole record.

use parking_lot::RwLock;
use std::sync::Arc;

use crate::options_adapter::OptionsAdapter;
use crate::prelude::*;
use crate::settings::schema::{default_options, OPTIONS_KEY};
use crate::settings::types::MapOptions;

pub struct SettingsStore {
	adapter: Arc<dyn OptionsAdapter>,
	cached: RwLock<Option<MapOptions>>,
}

impl SettingsStore {
	pub fn new(adapter: Arc<dyn OptionsAdapter>) -> Self {
		Self { adapter, cached: RwLock::new(None) }
	}

	/// Write the default record if none exists yet. Idempotent, safe to call
	/// on every startup; an existing record is never touched.
	pub async fn ensure_initialized(&self) -> AgmResult<()> {
		if self.adapter.read_option(OPTIONS_KEY).await?.is_none() {
			info!("No options record found, writing defaults");
			self.set(default_options()).await?;
		}
		Ok(())
	}

	/// Current record, or None if never initialized (or unreadable).
	pub async fn get(&self) -> AgmResult<Option<MapOptions>> {
		if let Some(opts) = self.cached.read().clone() {
			return Ok(Some(opts));
		}

		let Some(value) = self.adapter.read_option(OPTIONS_KEY).await? else {
			return Ok(None);
		};
		match serde_json::from_value::<MapOptions>(value) {
			Ok(opts) => {
				*self.cached.write() = Some(opts.clone());
				Ok(Some(opts))
			}
			Err(err) => {
				warn!("Stored options record is unreadable: {}", err);
				Ok(None)
			}
		}
	}

	/// Current record, falling back to defaults for render paths.
	pub async fn get_or_default(&self) -> AgmResult<MapOptions> {
		Ok(self.get().await?.unwrap_or_else(default_options))
	}

	/// Replace the whole record. Never merges: the validator already produced
	/// a total record.
	pub async fn set(&self, opts: MapOptions) -> AgmResult<()> {
		let value = serde_json::to_value(&opts)
			.map_err(|err| Error::ValidationError(format!("Failed to serialize options: {}", err)))?;
		self.adapter.write_option(OPTIONS_KEY, value).await?;
		*self.cached.write() = Some(opts);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::options_adapter::MemoryOptionsAdapter;

	fn store() -> SettingsStore {
		SettingsStore::new(Arc::new(MemoryOptionsAdapter::new()))
	}

	#[tokio::test]
	async fn test_get_before_initialization() {
		let store = store();
		assert!(store.get().await.unwrap().is_none());
		assert_eq!(store.get_or_default().await.unwrap(), default_options());
	}

	#[tokio::test]
	async fn test_ensure_initialized_writes_defaults() {
		let store = store();
		store.ensure_initialized().await.unwrap();
		assert_eq!(store.get().await.unwrap(), Some(default_options()));
	}

	#[tokio::test]
	async fn test_ensure_initialized_is_idempotent() {
		let store = store();
		store.ensure_initialized().await.unwrap();

		let mut changed = default_options();
		changed.map_zoom = 9;
		changed.marker_title = "Over here".into();
		store.set(changed.clone()).await.unwrap();

		// a second activation must not reset the record
		store.ensure_initialized().await.unwrap();
		assert_eq!(store.get().await.unwrap(), Some(changed));
	}

	#[tokio::test]
	async fn test_set_replaces_whole_record() {
		let adapter = Arc::new(MemoryOptionsAdapter::new());
		let store = SettingsStore::new(adapter.clone());

		let mut opts = default_options();
		opts.map_zoom = 5;
		store.set(opts).await.unwrap();

		let raw = adapter.read_option(OPTIONS_KEY).await.unwrap().unwrap();
		assert_eq!(raw["map_zoom"], serde_json::json!(5));
		// flags persist in the "0"/"1" string convention
		assert_eq!(raw["marker_on"], serde_json::json!("1"));
	}

	#[tokio::test]
	async fn test_unreadable_record_reads_as_none() {
		let adapter = Arc::new(MemoryOptionsAdapter::new());
		adapter.write_option(OPTIONS_KEY, serde_json::json!("garbage")).await.unwrap();

		let store = SettingsStore::new(adapter);
		assert!(store.get().await.unwrap().is_none());
	}
}

// vim: ts=4
