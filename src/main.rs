use std::{env, path::PathBuf, sync::Arc};

use agm_server::options_adapter::SqliteOptionsAdapter;
use agm_server::AppBuilder;

#[tokio::main]
async fn main() {
	let listen = env::var("AGM_LISTEN").unwrap_or("127.0.0.1:8080".to_string());
	let db_path = PathBuf::from(env::var("AGM_DB").unwrap_or("./data/options.db".to_string()));
	let auth_secret = env::var("AGM_AUTH_SECRET").unwrap_or_default();

	if let Some(parent) = db_path.parent() {
		tokio::fs::create_dir_all(parent).await.expect("FATAL: Failed to create data directory");
	}
	let options_adapter = Arc::new(
		SqliteOptionsAdapter::open(&db_path).await.expect("FATAL: Failed to open options database"),
	);

	AppBuilder::new()
		.listen(listen)
		.auth_secret(auth_secret)
		.options_adapter(options_adapter)
		.run()
		.await
		.expect("FATAL: Server failed");
}

// vim: ts=4
