//! Response rendering for a [`StatusReport`].

use serde::Serialize;
use tidewatch_core::classification::Severity;
use tidewatch_core::labels::Locale;
use tidewatch_core::record::Channel;
use tidewatch_core::types::Reading;

use crate::reader::StatusReport;

/// Render the auto-refreshing HTML status page.
///
/// The page reloads itself every `refresh_secs`, matching the publish
/// cadence, so an open browser tab keeps showing a recent snapshot.
pub fn render_status_page(report: &StatusReport, locale: Locale, refresh_secs: u64) -> String {
    let lines: String = Channel::ALL
        .iter()
        .map(|&channel| {
            let label = locale.label(report.classification.severity(channel));
            format!(
                "    <p>{name}: {value} {unit}</p>\n    <p>Status {name}: {label}</p>\n",
                name = channel.display_name(),
                value = report.record.reading(channel),
                unit = channel.unit(),
            )
        })
        .collect();

    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"{lang}\">\n\
         <head>\n    \
         <meta charset=\"utf-8\">\n    \
         <meta http-equiv=\"refresh\" content=\"{refresh_secs}\">\n    \
         <title>Status</title>\n\
         </head>\n\
         <body>\n    \
         <h1>Current Status</h1>\n\
         {lines}\
         </body>\n\
         </html>\n",
        lang = locale.tag(),
    )
}

/// Structured rendering of a [`StatusReport`] for `/api/v1/status`.
#[derive(Debug, Serialize)]
pub struct StatusView {
    pub water: Reading,
    pub wind: Reading,
    pub status_water: Severity,
    pub status_wind: Severity,
    pub label_water: &'static str,
    pub label_wind: &'static str,
    /// Suggested polling interval, equal to the publish cadence.
    pub refresh_secs: u64,
}

impl StatusView {
    pub fn new(report: &StatusReport, locale: Locale, refresh_secs: u64) -> Self {
        let classification = report.classification;
        Self {
            water: report.record.water,
            wind: report.record.wind,
            status_water: classification.water,
            status_wind: classification.wind,
            label_water: locale.label(classification.water),
            label_wind: locale.label(classification.wind),
            refresh_secs,
        }
    }
}
