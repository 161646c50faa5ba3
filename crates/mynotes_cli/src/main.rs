//! CLI smoke entry point.
//!
//! # Responsibility
//! - Open the configured store and print a deterministic summary.
//! - Verify `mynotes_core` wiring without the mobile runtime.

use mynotes_core::db::open_db;
use mynotes_core::logging::init_from_config;
use mynotes_core::{CoreConfig, NoteStore, PriorityFilter, SqliteKvStore};
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = CoreConfig::from_env();
    if let Err(err) = init_from_config(&config) {
        eprintln!("mynotes logging disabled: {err}");
    }

    println!("mynotes_core version={}", mynotes_core::core_version());
    println!("mynotes db_path={}", config.db_path.display());

    let conn = match open_db(&config.db_path) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("mynotes db open failed: {err}");
            return ExitCode::FAILURE;
        }
    };
    let kv = match SqliteKvStore::try_new(&conn) {
        Ok(kv) => kv,
        Err(err) => {
            eprintln!("mynotes store init failed: {err}");
            return ExitCode::FAILURE;
        }
    };
    let store = NoteStore::new(kv);

    let user = store
        .load_user()
        .map(|profile| profile.name)
        .unwrap_or_else(|| "-".to_string());
    println!("mynotes user={user}");

    let view = store.dashboard(PriorityFilter::All);
    for filter in PriorityFilter::ALL {
        println!(
            "mynotes notes filter={} count={}",
            filter.label(),
            view.counts.get(filter)
        );
    }
    ExitCode::SUCCESS
}
