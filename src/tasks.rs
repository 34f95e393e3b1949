// src/tasks.rs
//
// The watch pipeline: capture today's page, reload the snapshot folder,
// rebuild the short history, analyse, journal events, and notify when the
// inventory moved. Pure computation stays in `domain`; this module only
// sequences the collaborators.

use chrono::NaiveDate;
use std::error::Error;
use std::fmt;

use crate::config::Config;
use crate::db::{self, Database, StoreError};
use crate::domain::analysis::{build_analysis, MissingPreviousError};
use crate::domain::events::extract_events;
use crate::domain::history::{select_history_newest_as_current, EmptyPoolError};
use crate::domain::report::{format_report, format_title, should_notify};
use crate::domain::stats::{aggregate_listing_stats, DuplicateIdError};
use crate::mailer::{BrevoMailer, MailerError};
use crate::scraper::{PageFetcher, ScrapeError};
use crate::spreadsheets::{export_stats_xlsx, XlsxExportError};
use crate::storage::{load_snapshots_from_folder, StorageError};

pub const STATS_FILE_NAME: &str = "listing_stats.xlsx";

#[derive(Debug)]
pub enum TaskError {
    Scrape(ScrapeError),
    Storage(StorageError),
    Store(StoreError),
    History(EmptyPoolError),
    Data(DuplicateIdError),
    Mail(MailerError),
    Export(XlsxExportError),
}

impl fmt::Display for TaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskError::Scrape(e) => write!(f, "scrape failed: {e}"),
            TaskError::Storage(e) => write!(f, "snapshot storage failed: {e}"),
            TaskError::Store(e) => write!(f, "journal failed: {e}"),
            TaskError::History(e) => write!(f, "history selection failed: {e}"),
            TaskError::Data(e) => write!(f, "bad snapshot data: {e}"),
            TaskError::Mail(e) => write!(f, "notification failed: {e}"),
            TaskError::Export(e) => write!(f, "stats export failed: {e}"),
        }
    }
}

impl Error for TaskError {}

impl From<ScrapeError> for TaskError {
    fn from(e: ScrapeError) -> Self {
        TaskError::Scrape(e)
    }
}
impl From<StorageError> for TaskError {
    fn from(e: StorageError) -> Self {
        TaskError::Storage(e)
    }
}
impl From<StoreError> for TaskError {
    fn from(e: StoreError) -> Self {
        TaskError::Store(e)
    }
}
impl From<EmptyPoolError> for TaskError {
    fn from(e: EmptyPoolError) -> Self {
        TaskError::History(e)
    }
}
impl From<DuplicateIdError> for TaskError {
    fn from(e: DuplicateIdError) -> Self {
        TaskError::Data(e)
    }
}
impl From<MailerError> for TaskError {
    fn from(e: MailerError) -> Self {
        TaskError::Mail(e)
    }
}
impl From<XlsxExportError> for TaskError {
    fn from(e: XlsxExportError) -> Self {
        TaskError::Export(e)
    }
}

/// What a completed run did, for the journal and the console.
#[derive(Debug)]
pub struct RunReport {
    pub snapshot_date: NaiveDate,
    pub listings_seen: usize,
    pub events_total: usize,
    pub events_journaled: usize,
    pub notified: bool,
}

/// One full watch run. `today` is supplied by the caller; nothing below
/// `main` reads the clock, so a run can be replayed for any date.
pub fn run_watch(config: &Config, db: &Database, today: NaiveDate) -> Result<RunReport, TaskError> {
    let fetcher = PageFetcher::new()?;
    fetcher.download_to_folder(&config.page_url, &config.data_dir, today)?;

    let snapshots = load_snapshots_from_folder(&config.data_dir)?;
    eprintln!(
        "{} snapshots loaded from {}",
        snapshots.len(),
        config.data_dir.display()
    );

    let history = select_history_newest_as_current(&snapshots)?;
    let current_date = history.current.date;
    let listings_seen = history.current.count();

    let events = extract_events(&snapshots);
    let journaled = db.with_conn(|conn| db::events::save_events(conn, &events))?;
    eprintln!(
        "{} events extracted, {} newly journaled",
        events.len(),
        journaled
    );
    for event in db.with_conn(|conn| db::events::recent_events(conn, 5))? {
        eprintln!(
            "  {} {} lot {}",
            event.event_date.date(),
            event.kind,
            event.listing_id
        );
    }

    let notified = match build_analysis(&history) {
        Ok(analysis) => {
            let title = format_title(&analysis);
            println!("{title}");
            if should_notify(&analysis) {
                let mailer = BrevoMailer::new(
                    config.brevo_api_key.clone(),
                    config.sender_email.clone(),
                    config.sender_name.clone(),
                );
                mailer.send_report(&config.recipient_email, &title, &format_report(&analysis))?;
                eprintln!("✅ notification sent to {}", config.recipient_email);
                true
            } else {
                eprintln!("no change since previous snapshot, not notifying");
                false
            }
        }
        Err(MissingPreviousError) => {
            eprintln!("only one snapshot so far, nothing to compare yet");
            false
        }
    };

    let stats = aggregate_listing_stats(&snapshots)?;
    export_stats_xlsx(&stats, &config.data_dir.join(STATS_FILE_NAME))?;

    Ok(RunReport {
        snapshot_date: current_date,
        listings_seen,
        events_total: events.len(),
        events_journaled: journaled,
        notified,
    })
}
