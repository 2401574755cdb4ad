use capa_portal::{
    FilesystemDocumentBackend, PortalBuilder, PortalError, Record, RecordQuery, SearchFilter,
    WorksheetRecordStore, auth,
    store::worksheet::DEFAULT_SPREADSHEET_NAME,
};
use serde_json::Value;
use std::env;
use std::fs;
use std::sync::Arc;

const TEMPLATE_FILE: &str = "capa_template.txt";
const WORK_DIR: &str = "capa_work";

fn usage(program: &str) -> ! {
    eprintln!("CAPA portal: store incident records and render filled PDF reports.");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {program} submit <record.json>");
    eprintln!("  {program} search [department] [area] [start-date] [end-date]");
    eprintln!("      (use '-' for a filter you want to skip)");
    eprintln!("  {program} report <capa-no> <output.pdf>");
    std::process::exit(1);
}

/// A simple CLI over the portal facade.
fn main() -> Result<(), PortalError> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        usage(&args[0]);
    }

    // Credentials are a startup requirement regardless of the subcommand.
    let credentials = auth::process_credentials()?;
    log::debug!("authenticated via {}", credentials.kind());

    let portal = PortalBuilder::new()
        .with_store(Arc::new(WorksheetRecordStore::new(DEFAULT_SPREADSHEET_NAME)))
        .with_document_backend(Arc::new(FilesystemDocumentBackend::new(
            TEMPLATE_FILE,
            WORK_DIR,
        )))
        .build()?;

    match args[1].as_str() {
        "submit" if args.len() == 3 => {
            let record = record_from_json_file(&args[2])?;
            portal.submit(&record)?;
            println!("Stored CAPA {}", record.capa_no());
        }
        "search" => {
            let filter = search_filter_from_args(&args[2..]);
            let results = portal.search(&filter)?;
            println!(
                "{:<16} {:<12} {:<20} {}",
                "CAPA_NO", "DATE", "DEPARTMENT", "AREA/SECTION"
            );
            for rec in &results {
                println!(
                    "{:<16} {:<12} {:<20} {}",
                    rec.capa_no(),
                    rec.get("DATE_OF_INCIDENT"),
                    rec.department(),
                    rec.area_section()
                );
            }
            println!("{} record(s)", results.len());
        }
        "report" if args.len() == 4 => {
            let pdf = portal.render_report(&args[2])?;
            fs::write(&args[3], pdf)?;
            println!("Wrote report for {} to {}", args[2], args[3]);
        }
        _ => usage(&args[0]),
    }
    Ok(())
}

/// Read a flat JSON object of column names to values. Non-string values are
/// stringified; booleans become the stored "YES"/"" flag form.
fn record_from_json_file(path: &str) -> Result<Record, PortalError> {
    let raw = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&raw)?;
    let Value::Object(map) = value else {
        return Err(PortalError::Validation(format!(
            "{path} must contain a JSON object of column/value pairs"
        )));
    };
    Ok(Record::from_fields(map.into_iter().map(|(key, value)| {
        let text = match value {
            Value::String(s) => s,
            Value::Bool(true) => "YES".to_string(),
            Value::Bool(false) => String::new(),
            Value::Null => String::new(),
            other => other.to_string(),
        };
        (key, text)
    })))
}

fn search_filter_from_args(args: &[String]) -> SearchFilter {
    let arg = |idx: usize| {
        args.get(idx)
            .map(String::as_str)
            .filter(|value| !value.is_empty() && *value != "-")
            .map(str::to_string)
    };
    SearchFilter {
        query: RecordQuery {
            department: arg(0),
            area: arg(1),
            start_date: arg(2),
            end_date: arg(3),
        },
        capa_no: None,
    }
}
