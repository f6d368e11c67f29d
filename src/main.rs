#![allow(dead_code)]

use cosmic::app::Settings;
use cosmic::iced::Limits;

mod application;
mod components;
mod localize;
mod message;
mod pages;

use teamup::api;
use teamup::config;
use teamup::core;
use teamup::session;
use teamup::store;

use application::{Flags, TeamUp};
use config::TeamUpConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (config, cosmic_config) = TeamUpConfig::load()?;

    // Log to the systemd user journal (`journalctl --user -t teamup -f`).
    // Our own targets pass at info/debug (per config), everything else at warn.
    {
        struct FilteredJournal {
            inner: systemd_journal_logger::JournalLog,
        }

        impl log::Log for FilteredJournal {
            fn enabled(&self, metadata: &log::Metadata) -> bool {
                let target = metadata.target();
                let ours = ["teamup", "application", "pages", "components"]
                    .iter()
                    .any(|prefix| target.starts_with(prefix));
                if ours {
                    let max = if teamup::debug_logging() {
                        log::LevelFilter::Debug
                    } else {
                        log::LevelFilter::Info
                    };
                    metadata.level() <= max
                } else {
                    metadata.level() <= log::LevelFilter::Warn
                }
            }
            fn log(&self, record: &log::Record) {
                if self.enabled(record.metadata()) {
                    self.inner.log(record);
                }
            }
            fn flush(&self) {
                self.inner.flush();
            }
        }

        teamup::set_debug_logging(config.debug_logging);

        match systemd_journal_logger::JournalLog::new() {
            Ok(journal) => {
                let journal = journal.with_syslog_identifier("teamup".to_string());
                log::set_boxed_logger(Box::new(FilteredJournal { inner: journal }))?;
                // Global max must be Debug so debug logs can pass once toggled
                log::set_max_level(log::LevelFilter::Debug);
            }
            Err(e) => eprintln!("journal logging unavailable: {}", e),
        }
    }

    localize::localize();

    let client = api::ApiClient::new(&config.base_url())?;
    log::info!("Using API server {}", client.base_url());

    let settings = Settings::default().size_limits(Limits::NONE.min_width(400.0).min_height(300.0));

    let flags = Flags {
        config,
        cosmic_config,
        client,
    };
    cosmic::app::run::<TeamUp>(settings, flags)?;

    Ok(())
}
