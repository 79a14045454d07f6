//! App state type

use std::{
	path::{Path, PathBuf},
	sync::Arc,
};

use crate::options_adapter::OptionsAdapter;
use crate::prelude::*;
use crate::routes;
use crate::settings::store::SettingsStore;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct AppState {
	pub opts: AppBuilderOpts,
	pub store: SettingsStore,
}

pub type App = Arc<AppState>;

#[derive(Debug)]
pub struct AppBuilderOpts {
	listen: Box<str>,
	pub views_dir: Box<Path>,
	pub assets_dir: Box<Path>,
	pub auth_secret: Box<str>,
}

pub struct AppBuilder {
	opts: AppBuilderOpts,
	options_adapter: Option<Arc<dyn OptionsAdapter>>,
}

impl AppBuilder {
	pub fn new() -> Self {
		AppBuilder {
			opts: AppBuilderOpts {
				listen: "127.0.0.1:8080".into(),
				views_dir: PathBuf::from("./views").into(),
				assets_dir: PathBuf::from("./assets").into(),
				auth_secret: "".into(),
			},
			options_adapter: None,
		}
	}

	// Opts
	pub fn listen(mut self, listen: impl Into<Box<str>>) -> Self { self.opts.listen = listen.into(); self }
	pub fn views_dir(mut self, views_dir: impl Into<Box<Path>>) -> Self { self.opts.views_dir = views_dir.into(); self }
	pub fn assets_dir(mut self, assets_dir: impl Into<Box<Path>>) -> Self { self.opts.assets_dir = assets_dir.into(); self }
	pub fn auth_secret(mut self, auth_secret: impl Into<Box<str>>) -> Self { self.opts.auth_secret = auth_secret.into(); self }

	// Adapters
	pub fn options_adapter(mut self, options_adapter: Arc<dyn OptionsAdapter>) -> Self {
		self.options_adapter = Some(options_adapter);
		self
	}

	/// Build the app state and run first-activation initialization.
	/// Initialization is idempotent, an existing options record is kept.
	pub async fn build(self) -> AgmResult<App> {
		if self.opts.auth_secret.is_empty() {
			return Err(Error::ConfigError("No auth secret configured".into()));
		}
		let options_adapter = self
			.options_adapter
			.ok_or_else(|| Error::ConfigError("No options adapter configured".into()))?;

		let app: App = Arc::new(AppState {
			store: SettingsStore::new(options_adapter),
			opts: self.opts,
		});

		app.store.ensure_initialized().await?;

		Ok(app)
	}

	pub async fn run(self) -> AgmResult<()> {
		tracing_subscriber::fmt()
			.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
			.with_target(false)
			.init();
		info!("Ank Google Map admin server v{}", VERSION);

		let listen = self.opts.listen.clone();
		let app = self.build().await?;
		let router = routes::init(app);

		let listener = tokio::net::TcpListener::bind(listen.as_ref()).await?;
		info!("Listening on http://{}", listen);
		axum::serve(listener, router).await?;
		Ok(())
	}
}

impl Default for AppBuilder {
	fn default() -> Self {
		Self::new()
	}
}


// vim: ts=4
