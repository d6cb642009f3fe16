use crate::app::App;
use crate::commands::require_route;
use crate::error::Result;
use crate::meeting::{MeetingRecord, PhotoRef};
use crate::routes::Route;
use colored::Colorize;
use prettytable::{format, Table};

const PLACE_WIDTH: usize = 40;

/// Handle the history command
pub async fn handle_history(app: &App, json: bool) -> Result<()> {
    require_route(app, Route::History)?;

    let records = app.history_view().refresh().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("{}", "No meetings found.".yellow());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);

    table.add_row(prettytable::row![
        "Customer".bold(),
        "Date".bold(),
        "Start".bold(),
        "Status".bold(),
        "Place".bold(),
        "Photo".bold()
    ]);

    for record in &records {
        table.add_row(prettytable::row![
            record.customer_name.cyan(),
            record.meeting_start_date,
            record.start_time().unwrap_or_else(|| "-".to_string()),
            dash_if_empty(&record.status),
            place_cell(record),
            photo_cell(record)
        ]);
    }

    println!("\nMeeting History:");
    table.printstd();
    println!();
    println!("{} meeting(s), most recent first.", records.len());
    println!();

    Ok(())
}

fn dash_if_empty(value: &str) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

fn place_cell(record: &MeetingRecord) -> String {
    match record.place() {
        Some(place) if place.chars().count() > PLACE_WIDTH => {
            let short: String = place.chars().take(PLACE_WIDTH - 3).collect();
            format!("{}...", short)
        }
        Some(place) => place,
        None => "Not available".to_string(),
    }
}

fn photo_cell(record: &MeetingRecord) -> String {
    match record.photo_ref() {
        PhotoRef::None => "-".to_string(),
        PhotoRef::Inline(_) => "inline".to_string(),
        PhotoRef::Remote(url) => url.to_string(),
    }
}
