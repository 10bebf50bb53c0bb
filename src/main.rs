use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use prettytable::{format, Cell, Row, Table};
use serde::Serialize;
use ssnit_records::{
    export::{export_to_dir, ExportKind},
    model::{display_or_na, Record},
    query::{
        age, lookup_latest, retiree_records, today, validate_identifier, withdrawal_records,
        AgedRecord, RetireeFilter, SignFilter, WithdrawalFilter,
    },
    report::{dataset_info, RetireeSummary, WithdrawalSummary},
    DatasetStore, LoaderConfig, Loaded,
};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(author, version, about = "SSNIT contribution records lookup and reports")]
struct Args {
    /// Directory searched for the CSV data file
    #[arg(long, env = "SSNIT_DATA_DIR", default_value = ".")]
    data_dir: PathBuf,
    /// File preferred over all other CSVs in the data directory
    #[arg(long, env = "SSNIT_PREFERRED_FILE", default_value = "Combined.csv")]
    preferred_file: String,
    /// Reference date for ages (YYYY-MM-DD); defaults to today
    #[arg(long)]
    as_of: Option<NaiveDate>,
    /// Print JSON instead of tables
    #[arg(long)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Source file, record count, years and quick stats
    Info,
    /// Latest record and history for one Unit Holder ID
    Lookup {
        id: String,
        /// Write the latest record (and full history if longer) into this directory
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Records with a non-zero withdrawal
    Withdrawals {
        /// Case-insensitive Unit Holder ID substring
        #[arg(long)]
        id: Option<String>,
        /// Minimum absolute amount
        #[arg(long)]
        min_amount: Option<f64>,
        #[arg(long, value_enum, default_value_t = Sign::All)]
        sign: Sign,
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Records for holders aged 60 and above
    Retirees {
        #[arg(long)]
        id: Option<String>,
        #[arg(long, default_value_t = 60)]
        min_age: i32,
        #[arg(long, default_value_t = 100)]
        max_age: i32,
        #[arg(long)]
        export: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Sign {
    All,
    Positive,
    Negative,
}

impl From<Sign> for SignFilter {
    fn from(s: Sign) -> Self {
        match s {
            Sign::All => SignFilter::All,
            Sign::Positive => SignFilter::PositiveOnly,
            Sign::Negative => SignFilter::NegativeOnly,
        }
    }
}

#[derive(Serialize)]
struct Listing<'a, S> {
    summary: S,
    records: &'a [AgedRecord<'a>],
}

#[derive(Serialize)]
struct LookupOutput<'a> {
    latest: AgedRecord<'a>,
    history: &'a [&'a Record],
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let as_of = args.as_of.unwrap_or_else(today);

    // ─── 2) load data ────────────────────────────────────────────────
    let config = LoaderConfig::new(&args.data_dir).with_preferred_file(&args.preferred_file);
    let store = DatasetStore::open(config).context("No data available")?;
    let loaded = store.snapshot();
    if let Some(diag) = &loaded.diagnostic {
        warn!("{}", diag);
    }
    if !loaded.has_data() {
        bail!(
            "No data available. Please ensure there is a readable CSV file in {}",
            args.data_dir.display()
        );
    }
    info!(file = %loaded.source_name, records = loaded.dataset.len(), "ready");

    // ─── 3) dispatch ─────────────────────────────────────────────────
    match args.command {
        Command::Info => {
            let info = dataset_info(&loaded, as_of);
            if args.json {
                print_json(&info)?;
            } else {
                let years: Vec<String> = info.years.iter().map(|y| y.to_string()).collect();
                println!("File:               {}", info.source_name);
                println!("Total Records:      {}", info.total_records);
                println!("Years Available:    {}", years.join(", "));
                println!("Withdrawal Records: {}", info.withdrawal_records);
                println!("Retirees (60+):     {}", info.retirees);
            }
        }
        Command::Lookup { id, export } => run_lookup(&loaded, &id, export, as_of, args.json)?,
        Command::Withdrawals {
            id,
            min_amount,
            sign,
            export,
        } => {
            let rows = withdrawal_records(&loaded.dataset, as_of);
            let summary = WithdrawalSummary::from_rows(&rows);
            let filtered = WithdrawalFilter {
                identifier: id,
                min_amount,
                sign: sign.into(),
            }
            .apply(&rows);

            if args.json {
                print_json(&Listing {
                    summary,
                    records: &filtered,
                })?;
            } else {
                println!(
                    "Total Records: {} | Total: {:.2} | Positive: {:.2} | Negative: {:.2}",
                    summary.count, summary.total, summary.positive_total, summary.negative_total
                );
                print_rows(
                    &["Contributor Name", "Unit Holder ID", "Withdrawals", "Year", "Month", "Age"],
                    &filtered,
                    |r| {
                        vec![
                            display_or_na(r.record.name.as_deref()),
                            display_or_na(r.record.identifier.as_deref()),
                            r.record.withdrawals.to_string(),
                            display_or_na(r.record.year),
                            display_or_na(r.record.month_label.as_deref()),
                            r.age.to_string(),
                        ]
                    },
                );
            }
            if let Some(dir) = export {
                export_rows(&loaded, &dir, &ExportKind::Withdrawals, &filtered)?;
            }
        }
        Command::Retirees {
            id,
            min_age,
            max_age,
            export,
        } => {
            let rows = retiree_records(&loaded.dataset, as_of);
            let summary = RetireeSummary::from_rows(&rows);
            let filtered = RetireeFilter {
                identifier: id,
                min_age,
                max_age,
            }
            .apply(&rows);

            if args.json {
                print_json(&Listing {
                    summary,
                    records: &filtered,
                })?;
            } else {
                println!(
                    "Total Retirees: {} | Average Age: {} | Oldest: {} | Ages 60-65: {}",
                    summary.count,
                    display_or_na(summary.average_age.map(|a| format!("{:.1}", a))),
                    display_or_na(summary.oldest),
                    summary.aged_60_to_65
                );
                print_rows(
                    &["Contributor Name", "Unit Holder ID", "Age", "Date of Birth", "Year", "Month"],
                    &filtered,
                    |r| {
                        vec![
                            display_or_na(r.record.name.as_deref()),
                            display_or_na(r.record.identifier.as_deref()),
                            r.age.to_string(),
                            display_or_na(r.record.birth_date),
                            display_or_na(r.record.year),
                            display_or_na(r.record.month_label.as_deref()),
                        ]
                    },
                );
            }
            if let Some(dir) = export {
                export_rows(&loaded, &dir, &ExportKind::Retirees, &filtered)?;
            }
        }
    }

    Ok(())
}

fn run_lookup(
    loaded: &Loaded,
    input: &str,
    export: Option<PathBuf>,
    as_of: NaiveDate,
    json: bool,
) -> Result<()> {
    let id = validate_identifier(input)?;

    let found = lookup_latest(&loaded.dataset, &id);
    let Some(latest) = found.latest else {
        println!("No record found for Unit Holder ID: {}", id);
        return Ok(());
    };

    if json {
        print_json(&LookupOutput {
            latest: AgedRecord {
                record: latest,
                age: age(latest.birth_date, as_of),
            },
            history: &found.history,
        })?;
    } else {
        if found.history.len() > 1 {
            let years: Vec<String> = found
                .available_years()
                .iter()
                .map(|y| y.to_string())
                .collect();
            println!(
                "Multiple records found ({} total) - showing the most recent from {}",
                found.history.len(),
                display_or_na(latest.year)
            );
            println!("Available years: {}", years.join(", "));
        }
        print_record(latest, as_of);
    }

    if let Some(dir) = export {
        export_rows(loaded, &dir, &ExportKind::LatestRecord(id.clone()), &[latest])?;
        if found.history.len() > 1 {
            export_rows(loaded, &dir, &ExportKind::AllRecords(id), &found.history)?;
        }
    }
    Ok(())
}

fn print_record(r: &Record, as_of: NaiveDate) {
    let fields: Vec<(&str, String)> = vec![
        ("Name", display_or_na(r.name.as_deref())),
        ("Unit Holder ID", display_or_na(r.identifier.as_deref())),
        ("SSNIT Number", display_or_na(r.ssnit_number.as_deref())),
        ("Date of Birth", display_or_na(r.birth_date)),
        ("Age", age(r.birth_date, as_of).to_string()),
        ("Address", display_or_na(r.address.as_deref())),
        ("Year", display_or_na(r.year)),
        ("Month", display_or_na(r.month_label.as_deref())),
        ("Employer Code", display_or_na(r.employer_code.as_deref())),
        ("Scheme Code", display_or_na(r.scheme_code.as_deref())),
        ("Begin Balance", display_or_na(r.begin_balance)),
        ("End Balance", display_or_na(r.end_balance)),
        ("Withdrawals", r.withdrawals.to_string()),
        ("Contribution", display_or_na(r.contribution)),
        ("App Contribute", display_or_na(r.employer_contribution)),
        ("Misc Contri.", display_or_na(r.misc_contribution)),
    ];

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    for (label, value) in fields {
        table.add_row(Row::new(vec![
            Cell::new(label).style_spec("b"),
            Cell::new(&value),
        ]));
    }
    table.printstd();
}

fn print_rows<F>(headers: &[&str], rows: &[AgedRecord<'_>], cells: F)
where
    F: Fn(&AgedRecord<'_>) -> Vec<String>,
{
    println!("Results ({} records)", rows.len());
    if rows.is_empty() {
        println!("No records match your search criteria.");
        return;
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.set_titles(Row::new(
        headers
            .iter()
            .map(|h| Cell::new(h).style_spec("bFg"))
            .collect(),
    ));
    for row in rows {
        table.add_row(Row::new(cells(row).iter().map(|c| Cell::new(c)).collect()));
    }
    table.printstd();
}

fn export_rows<R: AsRef<Record>>(
    loaded: &Loaded,
    dir: &std::path::Path,
    kind: &ExportKind,
    rows: &[R],
) -> Result<()> {
    let path = export_to_dir(dir, kind, loaded.dataset.headers(), rows)?;
    println!("Exported {} records to {}", rows.len(), path.display());
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ssnit_records::model::Dataset;

    #[test]
    fn invalid_identifier_message_is_not_prefixed() {
        let loaded = Loaded {
            dataset: Dataset::empty(),
            source_name: "Combined.csv".into(),
            diagnostic: None,
        };
        let as_of = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();

        let err = run_lookup(&loaded, " A1 ", None, as_of, false).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unit Holder ID seems too short (currently 2 characters)"
        );
        let err = run_lookup(&loaded, "", None, as_of, false).unwrap_err();
        assert_eq!(err.to_string(), "Please enter a Unit Holder ID");
    }
}
