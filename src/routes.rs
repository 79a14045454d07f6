use axum::{middleware, routing::{get, post}, Router};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::core::route_auth::require_auth;
use crate::prelude::*;
use crate::settings;

pub fn init(app: App) -> Router {
	let admin_router = Router::new()
		.route("/admin/settings", get(settings::handler::get_settings_page))
		.route("/admin/settings", post(settings::handler::post_settings_page))
		.route("/admin/settings/client-options", get(settings::handler::get_client_options))
		.layer(middleware::from_fn_with_state(app.clone(), require_auth));

	let public_router = Router::new()
		.route("/healthz", get(async || "ok\n"));

	Router::new()
		.merge(public_router)
		.merge(admin_router)
		.nest_service("/assets", ServeDir::new(app.opts.assets_dir.to_path_buf()))
		.layer(TraceLayer::new_for_http())
		.with_state(app)
}

// vim: ts=4
