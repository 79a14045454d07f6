//! Form-submission validator
//!
//! [`validate`] is total: any raw submission, including the empty one,
//! produces a fully populated record. Unsafe or missing input degrades to
//! safe values field by field, a submission is never rejected as a whole.

use std::collections::HashMap;

use crate::core::app::VERSION;
use crate::settings::sanitize::{balance_tags, sanitize_html, sanitize_text};
use crate::settings::types::{Flag, MapOptions};

/// Checkbox semantics: an unchecked box is simply absent from a form
/// submission, so presence of the key means on, whatever its value.
pub fn presence_flag(raw: &HashMap<String, String>, key: &str) -> Flag {
	Flag(raw.contains_key(key))
}

/// Integer coercion for form input: optional sign plus leading ASCII digits,
/// everything else (including an absent field) is 0.
pub fn coerce_int(input: &str) -> i64 {
	let trimmed = input.trim();
	let bytes = trimmed.as_bytes();
	let mut i = 0;
	if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
		i += 1;
	}
	let digits_start = i;
	while i < bytes.len() && bytes[i].is_ascii_digit() {
		i += 1;
	}
	if i == digits_start {
		return 0;
	}
	trimmed[..i].parse().unwrap_or(0)
}

fn text_field(raw: &HashMap<String, String>, key: &str) -> String {
	raw.get(key).map(|v| sanitize_text(v)).unwrap_or_default()
}

fn int_field(raw: &HashMap<String, String>, key: &str) -> i64 {
	raw.get(key).map(|v| coerce_int(v)).unwrap_or(0)
}

fn rich_text_field(raw: &HashMap<String, String>, key: &str) -> String {
	// sanitize first, balance second: balancing must never see unsanitized
	// input
	balance_tags(&sanitize_html(raw.get(key).map(String::as_str).unwrap_or("")))
}

/// Validate raw form data into a complete options record.
pub fn validate(raw: &HashMap<String, String>) -> MapOptions {
	MapOptions {
		// always stamped with the running version, caller input is ignored
		plugin_ver: VERSION.to_string(),

		div_width: text_field(raw, "div_width"),
		div_height: text_field(raw, "div_height"),
		div_width_unit: int_field(raw, "div_width_unit"),
		div_border_color: text_field(raw, "div_border_color"),

		map_lat: text_field(raw, "map_Lat"),
		map_lng: text_field(raw, "map_Lng"),
		map_zoom: int_field(raw, "map_zoom"),

		map_lang_code: text_field(raw, "map_lang_code"),
		map_type: int_field(raw, "map_type"),

		marker_title: text_field(raw, "marker_title"),
		marker_anim: int_field(raw, "marker_anim"),
		marker_color: int_field(raw, "marker_color"),

		map_control_2: presence_flag(raw, "map_control_2"),
		map_control_3: presence_flag(raw, "map_control_3"),
		map_control_4: presence_flag(raw, "map_control_4"),
		marker_on: presence_flag(raw, "marker_on"),
		info_on: presence_flag(raw, "info_on"),
		info_state: presence_flag(raw, "info_state"),
		disable_mouse_wheel: presence_flag(raw, "disable_mouse_wheel"),
		disable_drag_mobile: presence_flag(raw, "disable_drag_mobile"),

		info_text: rich_text_field(raw, "info_text"),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn raw(pairs: &[(&str, &str)]) -> HashMap<String, String> {
		pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
	}

	#[test]
	fn test_empty_submission_is_total() {
		let out = validate(&HashMap::new());
		assert_eq!(out.plugin_ver, VERSION);
		assert_eq!(out.div_width, "");
		assert_eq!(out.div_width_unit, 0);
		assert_eq!(out.map_zoom, 0);
		assert_eq!(out.info_text, "");
		assert_eq!(out.marker_on, Flag::OFF);
		assert_eq!(out.disable_drag_mobile, Flag::OFF);
	}

	#[test]
	fn test_plugin_ver_never_taken_from_input() {
		let out = validate(&raw(&[("plugin_ver", "0.0.1-evil")]));
		assert_eq!(out.plugin_ver, VERSION);
	}

	#[test]
	fn test_coerce_int() {
		assert_eq!(coerce_int("7"), 7);
		assert_eq!(coerce_int(" 42 "), 42);
		assert_eq!(coerce_int("-3"), -3);
		assert_eq!(coerce_int("+5"), 5);
		assert_eq!(coerce_int("10.5"), 10);
		assert_eq!(coerce_int("7abc"), 7);
		assert_eq!(coerce_int("abc"), 0);
		assert_eq!(coerce_int(""), 0);
		assert_eq!(coerce_int("-"), 0);
	}

	#[test]
	fn test_presence_flag_any_value_counts() {
		for value in ["on", "1", "0", "", "false"] {
			let out = validate(&raw(&[("marker_on", value)]));
			assert_eq!(out.marker_on, Flag::ON, "value {:?}", value);
		}
		let out = validate(&HashMap::new());
		assert_eq!(out.marker_on, Flag::OFF);
	}

	#[test]
	fn test_text_fields_are_plain_text() {
		let out = validate(&raw(&[("marker_title", "<b>We are</b>  here")]));
		assert_eq!(out.marker_title, "We are here");
	}

	#[test]
	fn test_submission_with_coordinates() {
		let out = validate(&raw(&[
			("map_zoom", "7"),
			("map_Lat", "10.5"),
			("map_Lng", "20.5"),
		]));
		assert_eq!(out.map_zoom, 7);
		assert_eq!(out.map_lat, "10.5");
		assert_eq!(out.map_lng, "20.5");
		// all flag keys were absent
		assert_eq!(out.map_control_2, Flag::OFF);
		assert_eq!(out.map_control_3, Flag::OFF);
		assert_eq!(out.map_control_4, Flag::OFF);
		assert_eq!(out.marker_on, Flag::OFF);
		assert_eq!(out.info_on, Flag::OFF);
		assert_eq!(out.info_state, Flag::OFF);
		assert_eq!(out.disable_mouse_wheel, Flag::OFF);
		assert_eq!(out.disable_drag_mobile, Flag::OFF);
	}

	#[test]
	fn test_info_text_sanitized_and_balanced() {
		let out = validate(&raw(&[
			("marker_on", "on"),
			("info_text", "<b>Hi<i>there</b>"),
		]));
		assert_eq!(out.marker_on, Flag::ON);
		assert_eq!(out.info_text, "<b>Hi<i>there</i></b>");
	}

	#[test]
	fn test_info_text_drops_scripts() {
		let out = validate(&raw(&[("info_text", "<b>x</b><script>alert(1)</script>")]));
		assert!(!out.info_text.contains("<script"));
		assert_eq!(out.info_text, "<b>x</b>alert(1)");
	}
}

// vim: ts=4
