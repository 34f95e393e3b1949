use chrono::Local;

use crate::config::Config;
use crate::db::{init_db, Database};

mod config;
mod db;
mod domain;
mod mailer;
mod scraper;
mod spreadsheets;
mod storage;
mod tasks;

#[cfg(test)]
mod tests;

fn main() {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Configuration error: {e}");
            std::process::exit(1);
        }
    };

    let db = Database::new(config.db_path.display().to_string());
    if let Err(e) = init_db(&db, "sql/schema.sql") {
        eprintln!("❌ Database initialization failed: {e}");
        std::process::exit(1);
    }

    match db.with_conn(|conn| db::runs::recent_runs(conn, 1)) {
        Ok(previous) => {
            if let Some(last) = previous.first() {
                println!("Previous run started at {}", last.started_at);
            }
        }
        Err(e) => eprintln!("⚠️ Could not read run journal: {e}"),
    }

    // The only place the clock is read; everything below takes dates as
    // parameters.
    let started_at = Local::now().naive_local();
    let today = started_at.date();

    let run_id = match db.with_conn(|conn| db::runs::start_run(conn, started_at)) {
        Ok(id) => id,
        Err(e) => {
            eprintln!("❌ Could not journal run start: {e}");
            std::process::exit(1);
        }
    };

    println!("Start watch run for {today}");
    let result = tasks::run_watch(&config, &db, today);
    let finished_at = Local::now().naive_local();

    match result {
        Ok(report) => {
            let record = db.with_conn(|conn| {
                db::runs::finish_run(
                    conn,
                    run_id,
                    finished_at,
                    Some(report.snapshot_date),
                    Some(report.listings_seen as i64),
                    true,
                    None,
                )
            });
            if let Err(e) = record {
                eprintln!("⚠️ Could not journal run end: {e}");
            }
            println!("Done");
        }
        Err(e) => {
            let record = db.with_conn(|conn| {
                db::runs::finish_run(
                    conn,
                    run_id,
                    finished_at,
                    None,
                    None,
                    false,
                    Some(e.to_string()),
                )
            });
            if let Err(journal_err) = record {
                eprintln!("⚠️ Could not journal run end: {journal_err}");
            }
            eprintln!("❌ Watch run failed: {e}");
            std::process::exit(1);
        }
    }
}
