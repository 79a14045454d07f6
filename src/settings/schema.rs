//! Default option values
//!
//! Single source of truth for defaults: both first-run initialization and the
//! validator's fallback paths come through here, so the two can never drift.

use crate::core::app::VERSION;
use crate::settings::types::{Flag, MapOptions};

/// Name of the record in the options store. Shared contract with every other
/// consumer of the store.
pub const OPTIONS_KEY: &str = "ank_google_map";

/// The default options record. Pure and deterministic.
pub fn default_options() -> MapOptions {
	MapOptions {
		plugin_ver: VERSION.to_string(),
		div_width: "100".into(),
		div_width_unit: 2,
		div_height: "300".into(),
		div_border_color: "#ccc".into(),
		map_lat: "28.613939100000003".into(),
		map_lng: "77.20902120000005".into(),
		map_zoom: 2,
		map_control_2: Flag::OFF,
		map_control_3: Flag::OFF,
		map_control_4: Flag::OFF,
		map_lang_code: String::new(),
		map_type: 1,
		marker_on: Flag::ON,
		marker_title: "We are here".into(),
		marker_anim: 1,
		marker_color: 1,
		info_on: Flag::ON,
		info_text: "<b>Your Destination</b>".into(),
		info_state: Flag::OFF,
		disable_mouse_wheel: Flag::OFF,
		disable_drag_mobile: Flag::ON,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults_are_deterministic() {
		assert_eq!(default_options(), default_options());
	}

	#[test]
	fn test_default_values() {
		let opts = default_options();
		assert_eq!(opts.plugin_ver, VERSION);
		assert_eq!(opts.div_width, "100");
		assert_eq!(opts.map_zoom, 2);
		assert_eq!(opts.marker_title, "We are here");
		assert_eq!(opts.info_text, "<b>Your Destination</b>");
		assert!(opts.marker_on.is_on());
		assert!(!opts.info_state.is_on());
		assert!(opts.disable_drag_mobile.is_on());
	}
}

// vim: ts=4
