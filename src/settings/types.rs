//! Settings record types
//!
//! Field names and the `"0"`/`"1"` flag encoding are a persistence contract
//! shared with other consumers of the options store. Do not rename fields or
//! change the flag encoding without a migration.

use serde::{Deserialize, Serialize};

// Flag //
//******//

/// Boolean option stored as the string `"0"` or `"1"`.
///
/// Checkbox options come from form submissions where an unchecked box is
/// simply absent, and the store keeps them as two-valued strings rather than
/// native booleans.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Flag(pub bool);

impl Flag {
	pub const ON: Flag = Flag(true);
	pub const OFF: Flag = Flag(false);

	pub fn is_on(self) -> bool {
		self.0
	}

	pub fn as_str(self) -> &'static str {
		if self.0 { "1" } else { "0" }
	}
}

impl From<bool> for Flag {
	fn from(on: bool) -> Self {
		Flag(on)
	}
}

impl std::fmt::Display for Flag {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

impl Serialize for Flag {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_str(self.as_str())
	}
}

impl<'de> Deserialize<'de> for Flag {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		let s = String::deserialize(deserializer)?;
		Ok(Flag(s == "1"))
	}
}

// MapOptions //
//************//

/// The single persisted options record.
///
/// `map_Lat`/`map_Lng` keep their historical capitalized spellings on the
/// wire.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapOptions {
	pub plugin_ver: String,
	pub div_width: String,
	pub div_width_unit: i64,
	pub div_height: String,
	pub div_border_color: String,
	#[serde(rename = "map_Lat")]
	pub map_lat: String,
	#[serde(rename = "map_Lng")]
	pub map_lng: String,
	pub map_zoom: i64,
	pub map_control_2: Flag,
	pub map_control_3: Flag,
	pub map_control_4: Flag,
	pub map_lang_code: String,
	pub map_type: i64,
	pub marker_on: Flag,
	pub marker_title: String,
	pub marker_anim: i64,
	pub marker_color: i64,
	pub info_on: Flag,
	pub info_text: String,
	pub info_state: Flag,
	pub disable_mouse_wheel: Flag,
	pub disable_drag_mobile: Flag,
}

/// Read-only projection handed to the in-page preview script.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClientOptions {
	pub map: ClientMapView,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClientMapView {
	pub lat: String,
	pub lng: String,
	pub zoom: u64,
}

impl MapOptions {
	/// Minimal view of the map center/zoom for the client script. Recomputed
	/// on every render, never stored.
	pub fn client_options(&self) -> ClientOptions {
		ClientOptions {
			map: ClientMapView {
				lat: self.map_lat.clone(),
				lng: self.map_lng.clone(),
				zoom: self.map_zoom.unsigned_abs(),
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::settings::schema::default_options;

	#[test]
	fn test_flag_serializes_as_string() {
		let json = serde_json::to_string(&Flag::ON).unwrap();
		assert_eq!(json, r#""1""#);
		let json = serde_json::to_string(&Flag::OFF).unwrap();
		assert_eq!(json, r#""0""#);
	}

	#[test]
	fn test_flag_deserializes_from_string() {
		let on: Flag = serde_json::from_str(r#""1""#).unwrap();
		assert!(on.is_on());
		let off: Flag = serde_json::from_str(r#""0""#).unwrap();
		assert!(!off.is_on());
	}

	#[test]
	fn test_record_wire_format() {
		let opts = default_options();
		let value = serde_json::to_value(&opts).unwrap();

		// Coordinates keep their historical capitalized keys
		assert!(value.get("map_Lat").is_some());
		assert!(value.get("map_Lng").is_some());
		assert!(value.get("map_lat").is_none());

		// Flags are strings, never booleans
		assert_eq!(value["marker_on"], serde_json::json!("1"));
		assert_eq!(value["info_state"], serde_json::json!("0"));

		// Integers stay numeric
		assert_eq!(value["map_zoom"], serde_json::json!(2));

		let back: MapOptions = serde_json::from_value(value).unwrap();
		assert_eq!(back, opts);
	}

	#[test]
	fn test_client_options_projection() {
		let mut opts = default_options();
		opts.map_lat = "10.5".into();
		opts.map_lng = "20.5".into();
		opts.map_zoom = -7;

		let client = opts.client_options();
		assert_eq!(client.map.lat, "10.5");
		assert_eq!(client.map.lng, "20.5");
		assert_eq!(client.map.zoom, 7);
	}
}

// vim: ts=4
