//! Settings page handlers

use axum::{
	extract::State,
	response::{Html, Redirect},
	Form, Json,
};
use handlebars::Handlebars;
use serde::Serialize;
use std::collections::HashMap;

use crate::core::app::VERSION;
use crate::core::extract::Auth;
use crate::core::route_auth::{AuthCtx, CAP_MANAGE_OPTIONS};
use crate::prelude::*;
use crate::settings::help;
use crate::settings::types::{ClientOptions, MapOptions};
use crate::settings::validate::validate;

// Action links //
//**************//

/// Link shown in an action/navigation list.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ActionLink {
	pub label: String,
	pub href: String,
}

/// Prepend the Settings link for callers allowed to manage options; leave
/// the list unchanged for everyone else. Unauthorized callers get no error,
/// just no link.
pub fn action_links(auth: Option<&AuthCtx>, mut links: Vec<ActionLink>) -> Vec<ActionLink> {
	if auth.is_some_and(|a| a.can(CAP_MANAGE_OPTIONS)) {
		links.insert(0, ActionLink { label: "Settings".into(), href: "/admin/settings".into() });
	}
	links
}

fn default_links() -> Vec<ActionLink> {
	help::SIDEBAR_LINKS
		.iter()
		.map(|l| ActionLink { label: l.label.into(), href: l.href.into() })
		.collect()
}

fn require_manage_options(auth: &AuthCtx) -> AgmResult<()> {
	if !auth.can(CAP_MANAGE_OPTIONS) {
		warn!("'{}' lacks the {} capability", auth.sub, CAP_MANAGE_OPTIONS);
		return Err(Error::PermissionDenied);
	}
	Ok(())
}

// Page rendering //
//****************//

fn page_view(opts: &MapOptions, auth: &AuthCtx) -> AgmResult<serde_json::Value> {
	// pre-serialized so the template can inline it into a <script> block
	let client_options = serde_json::to_string(&opts.client_options())
		.map_err(|err| Error::ConfigError(format!("Failed to serialize client options: {}", err)))?;

	Ok(serde_json::json!({
		"version": VERSION,
		"opt": {
			"div_width": opts.div_width,
			"div_width_unit": opts.div_width_unit,
			"div_height": opts.div_height,
			"div_border_color": opts.div_border_color,
			"map_lat": opts.map_lat,
			"map_lng": opts.map_lng,
			"map_zoom": opts.map_zoom,
			"map_control_2": opts.map_control_2.is_on(),
			"map_control_3": opts.map_control_3.is_on(),
			"map_control_4": opts.map_control_4.is_on(),
			"map_lang_code": opts.map_lang_code,
			"map_type": opts.map_type,
			"marker_on": opts.marker_on.is_on(),
			"marker_title": opts.marker_title,
			"marker_anim": opts.marker_anim,
			"marker_color": opts.marker_color,
			"info_on": opts.info_on.is_on(),
			"info_text": opts.info_text,
			"info_state": opts.info_state.is_on(),
			"disable_mouse_wheel": opts.disable_mouse_wheel.is_on(),
			"disable_drag_mobile": opts.disable_drag_mobile.is_on(),
		},
		"client_options": client_options,
		"help_tabs": help::HELP_TABS,
		"sidebar_links": help::SIDEBAR_LINKS,
		"action_links": action_links(Some(auth), default_links()),
	}))
}

fn render_options_page(app: &App, view: &serde_json::Value) -> AgmResult<Html<String>> {
	let path = app.opts.views_dir.join("options_page.hbs");
	let template = std::fs::read_to_string(&path).map_err(|_| {
		Error::ConfigError(format!(
			"Unable to load settings page, template file '{}' not found (v{})",
			path.display(),
			VERSION
		))
	})?;

	let handlebars = Handlebars::new();
	let html = handlebars
		.render_template(&template, view)
		.map_err(|err| Error::ConfigError(format!("Failed to render settings page: {}", err)))?;

	Ok(Html(html))
}

// Handlers //
//**********//

/// GET /admin/settings - Render the settings form
#[axum::debug_handler]
pub async fn get_settings_page(
	State(app): State<App>,
	Auth(auth): Auth,
) -> AgmResult<Html<String>> {
	require_manage_options(&auth)?;

	let opts = app.store.get_or_default().await?;
	let view = page_view(&opts, &auth)?;
	render_options_page(&app, &view)
}

/// POST /admin/settings - Validate and persist a form submission
///
/// The validator is total: malformed fields degrade to safe values, the
/// submission as a whole is never rejected.
#[axum::debug_handler]
pub async fn post_settings_page(
	State(app): State<App>,
	Auth(auth): Auth,
	Form(raw): Form<HashMap<String, String>>,
) -> AgmResult<Redirect> {
	require_manage_options(&auth)?;

	let opts = validate(&raw);
	app.store.set(opts).await?;
	info!("Options saved by '{}'", auth.sub);

	Ok(Redirect::to("/admin/settings"))
}

/// GET /admin/settings/client-options - Map center/zoom for the preview
/// script, recomputed on every request
#[axum::debug_handler]
pub async fn get_client_options(
	State(app): State<App>,
	Auth(auth): Auth,
) -> AgmResult<Json<ClientOptions>> {
	require_manage_options(&auth)?;

	let opts = app.store.get_or_default().await?;
	Ok(Json(opts.client_options()))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn ctx(caps: &[&str]) -> AuthCtx {
		AuthCtx { sub: "tester".into(), caps: caps.iter().map(|c| Box::from(*c)).collect() }
	}

	#[test]
	fn test_action_links_authorized() {
		let auth = ctx(&[CAP_MANAGE_OPTIONS]);
		let links = action_links(Some(&auth), vec![ActionLink {
			label: "Docs".into(),
			href: "/docs".into(),
		}]);
		assert_eq!(links.len(), 2);
		assert_eq!(links[0].label, "Settings");
		assert_eq!(links[1].label, "Docs");
	}

	#[test]
	fn test_action_links_unauthorized_unchanged() {
		let original = vec![ActionLink { label: "Docs".into(), href: "/docs".into() }];

		let links = action_links(Some(&ctx(&[])), original.clone());
		assert_eq!(links, original);

		let links = action_links(None, original.clone());
		assert_eq!(links, original);
	}

	#[test]
	fn test_require_manage_options() {
		assert!(require_manage_options(&ctx(&[CAP_MANAGE_OPTIONS])).is_ok());
		assert!(matches!(
			require_manage_options(&ctx(&["other"])),
			Err(Error::PermissionDenied)
		));
	}
}

// vim: ts=4
