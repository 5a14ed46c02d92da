mod error;
mod paths;
mod render;
mod rows;

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::{debug, error, info};
use ngs360_lib::params::TableParams;
use ngs360_lib::{
    ColumnDef, ColumnFilter, ColumnVisibilityStore, FilterOperator, PageSize, PaginationMode,
    SortingState, TableConfig, TableController,
};
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::error::CliError;
use crate::rows::JsonRow;

/// Page, sort and filter a JSON table from the command line.
#[derive(Parser, Debug)]
#[command(name = "ngs360")]
#[command(about = "Render a page of an NGS360 data table", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON file holding an array of row objects
    #[arg(value_name = "ROWS")]
    rows: PathBuf,

    /// Comma-separated column ids, in display order
    #[arg(long, value_delimiter = ',')]
    columns: Vec<String>,

    /// Treat the rows as one server page out of N total rows
    #[arg(long, value_name = "N")]
    server_total: Option<usize>,

    /// Apply a URL query string such as "page=2&sort=name&desc=true"
    #[arg(long, value_name = "QUERY")]
    params: Option<String>,

    /// One-based page number
    #[arg(long)]
    page: Option<usize>,

    /// Rows per page, or "all"
    #[arg(long, value_name = "N|all")]
    per_page: Option<PageSize>,

    /// Column to sort by
    #[arg(long, value_name = "COLUMN")]
    sort: Option<String>,

    /// Sort descending
    #[arg(long)]
    desc: bool,

    /// Global search text
    #[arg(short, long)]
    query: Option<String>,

    /// Substring filter, as COLUMN=TEXT
    #[arg(long, value_name = "COLUMN=TEXT")]
    filter: Vec<String>,

    /// Match any of the values, as COLUMN=a,b
    #[arg(long, value_name = "COLUMN=VALUES")]
    filter_any: Vec<String>,

    /// Match all of the values, as COLUMN=a,b
    #[arg(long, value_name = "COLUMN=VALUES")]
    filter_all: Vec<String>,

    /// Hide a column
    #[arg(long, value_name = "COLUMN")]
    hide: Vec<String>,

    /// Table config JSON, defaults to table.json in the config directory
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print CSV instead of a text grid
    #[arg(long)]
    csv: bool,

    /// Include hidden columns in CSV output
    #[arg(long, requires = "csv")]
    all_columns: bool,

    /// Print distinct values of a column and exit
    #[arg(long, value_name = "COLUMN")]
    distinct: Option<String>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let Some(dir) = paths::log_dir() else { return };
    let log_path = match paths::rotate_logs(&dir) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Logging disabled, cannot prepare {}: {}", dir.display(), e);
            return;
        }
    };
    let log_file = File::create(&log_path).expect("Failed to create log file");
    WriteLogger::init(level, Config::default(), log_file).expect("Failed to initialize logger");
}

fn load_config(path: Option<&Path>) -> Result<TableConfig, CliError> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match paths::table_config() {
            Some(path) if path.exists() => path,
            _ => return Ok(TableConfig::default()),
        },
    };

    let json = fs::read_to_string(&path).map_err(|source| CliError::Read {
        path: path.clone(),
        source,
    })?;
    info!("Loaded table config from {}", path.display());
    Ok(TableConfig::from_json(&json)?)
}

fn split_filter(arg: &str) -> Result<(&str, &str), CliError> {
    match arg.split_once('=') {
        Some((column, value)) if !column.trim().is_empty() => Ok((column.trim(), value)),
        _ => Err(CliError::FilterSyntax(arg.to_string())),
    }
}

fn multi_filter(
    arg: &str,
    operator: FilterOperator,
) -> Result<(&str, Option<ColumnFilter>), CliError> {
    let (column, values) = split_filter(arg)?;
    Ok((column, ColumnFilter::multi(operator, values.split(','))))
}

fn build_table(
    cli: &Cli,
    rows: Vec<JsonRow>,
    config: TableConfig,
) -> Result<TableController<JsonRow>, CliError> {
    let column_ids: Vec<String> = if cli.columns.is_empty() {
        rows.first()
            .map(|row| row.keys().map(str::to_string).collect())
            .unwrap_or_default()
    } else {
        cli.columns.clone()
    };
    let columns: Vec<ColumnDef<JsonRow>> = column_ids
        .iter()
        .map(|id| ColumnDef::key(id.as_str(), id.as_str()))
        .collect();

    let mode = match cli.server_total {
        Some(total_items) => PaginationMode::Server { total_items },
        None => PaginationMode::Client,
    };

    let store = ColumnVisibilityStore::new();
    let mut table = TableController::new(columns, mode)
        .with_config(config)
        .with_visibility(store, cli.rows.to_string_lossy())
        .with_rows(rows);
    table.subscribe(|event| debug!("{} changed: {:?}", event.kind(), event));

    let mut state = table.state().clone();
    if let Some(query) = &cli.params {
        TableParams::parse(query)?.apply_to(&mut state);
    }
    if let Some(page) = cli.page {
        state.pagination.page_index = page.saturating_sub(1);
    }
    if let Some(per_page) = cli.per_page {
        state.pagination.page_size = per_page;
    }
    if let Some(column) = &cli.sort {
        state.sorting = SortingState::single(column.clone(), cli.desc);
    }
    if let Some(query) = &cli.query {
        state.global_filter = query.clone();
    }

    for arg in &cli.filter {
        let (column, text) = split_filter(arg)?;
        state.column_filters.set(column, Some(ColumnFilter::text(text)));
    }
    for arg in &cli.filter_any {
        let (column, filter) = multi_filter(arg, FilterOperator::Or)?;
        state.column_filters.set(column, filter);
    }
    for arg in &cli.filter_all {
        let (column, filter) = multi_filter(arg, FilterOperator::And)?;
        state.column_filters.set(column, filter);
    }
    for column in &cli.hide {
        state.column_visibility.set(column.as_str(), false);
    }

    table.set_state(state)?;
    Ok(table)
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(cli.config.as_deref())?;
    let rows = rows::load(&cli.rows)?;
    info!("Loaded {} rows from {}", rows.len(), cli.rows.display());

    let table = build_table(&cli, rows, config)?;

    if let Some(column) = &cli.distinct {
        for value in table.column_filter_options(column)? {
            println!("{}", value);
        }
        return Ok(());
    }

    if cli.csv {
        print!("{}", table.export_csv(cli.all_columns)?);
    } else {
        println!("{}", render::render(&table.render()));
        debug!("State: {}", TableParams::from_state(table.state()).to_query_string());
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_filter() {
        assert_eq!(split_filter("status=Failed").unwrap(), ("status", "Failed"));
        assert_eq!(split_filter("note=a=b").unwrap(), ("note", "a=b"));
        assert!(matches!(split_filter("status"), Err(CliError::FilterSyntax(_))));
        assert!(matches!(split_filter("=x"), Err(CliError::FilterSyntax(_))));
    }

    #[test]
    fn test_build_table_applies_flags() {
        let rows = rows::parse(
            r#"[
                {"id": 1, "status": "Failed"},
                {"id": 2, "status": "Passed"},
                {"id": 3, "status": "Failed"}
            ]"#,
        )
        .unwrap();
        let cli = Cli::parse_from([
            "ngs360",
            "rows.json",
            "--filter-any",
            "status=failed,missing",
            "--sort",
            "id",
            "--desc",
            "--hide",
            "status",
        ]);

        let table = build_table(&cli, rows, TableConfig::default()).unwrap();
        let view = table.render();
        let ids: Vec<_> = view.data_rows().map(|cells| cells[0].clone()).collect();

        assert_eq!(ids, vec!["3", "1"]);
        assert_eq!(view.headers.len(), 1);
    }

    #[test]
    fn test_default_columns_follow_first_row() {
        let rows = rows::parse(r#"[{"status": "Failed", "name": "S1", "id": 1}]"#).unwrap();
        let cli = Cli::parse_from(["ngs360", "rows.json"]);

        let table = build_table(&cli, rows, TableConfig::default()).unwrap();
        let headers: Vec<_> = table.render().headers.into_iter().map(|h| h.column_id).collect();

        assert_eq!(headers, vec!["status", "name", "id"]);
    }

    #[test]
    fn test_build_table_rejects_all_for_server_tables() {
        let rows = rows::parse(r#"[{"id": 1}]"#).unwrap();
        let cli = Cli::parse_from([
            "ngs360",
            "rows.json",
            "--server-total",
            "40",
            "--per-page",
            "all",
        ]);
        assert!(matches!(
            build_table(&cli, rows, TableConfig::default()),
            Err(CliError::Table(_))
        ));
    }
}
