use ngs360_lib::pagination::{
    displayed_total, effective_page_size, page_count, page_size_options, rows_shown,
};
use ngs360_lib::params::TableParams;
use ngs360_lib::{
    CellValue, ColumnDef, PageSize, PaginationMode, TableConfig, TableController, TableRow,
};

struct Line(u32);

impl TableRow for Line {
    fn field(&self, key: &str) -> CellValue {
        match key {
            "n" => self.0.into(),
            _ => CellValue::Null,
        }
    }
}

fn lines(n: u32) -> Vec<Line> {
    (0..n).map(Line).collect()
}

// ============================================================================
// Policy
// ============================================================================

#[test]
fn test_server_menu_includes_custom_current_size() {
    let options = page_size_options(true, PageSize::Rows(100), &TableConfig::default());
    let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
    assert_eq!(labels, vec!["5", "10", "20", "25", "30", "40", "50", "100"]);
}

#[test]
fn test_client_menu_respects_config() {
    let config = TableConfig::default()
        .with_page_size_options(vec![10, 100])
        .with_all_label("Everything");
    let options = page_size_options(false, PageSize::All, &config);
    let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
    assert_eq!(labels, vec!["10", "100", "Everything"]);
}

#[test]
fn test_show_all_with_no_rows_is_well_defined() {
    let size = effective_page_size(PageSize::All, 0);
    assert_eq!(size, 1);
    assert_eq!(page_count(0, size), 1);
}

#[test]
fn test_counts() {
    assert_eq!(displayed_total(true, 137, 0), 137);
    assert_eq!(displayed_total(false, 137, 12), 12);
    assert_eq!(rows_shown(10, 7), 7);
}

// ============================================================================
// URL parameters driving a controller
// ============================================================================

#[test]
fn test_params_restore_client_table() {
    let mut table = TableController::new(vec![ColumnDef::key("n", "N")], PaginationMode::Client)
        .with_rows(lines(95));

    let mut state = table.state().clone();
    TableParams::parse("?page=3&per_page=20&sort=n&desc=true")
        .unwrap()
        .apply_to(&mut state);
    table.set_state(state).unwrap();

    assert_eq!(table.state().pagination.page_index, 2);
    let first = table.page_rows().first().map(|line| line.0);
    assert_eq!(first, Some(54));

    let footer = table.render().footer.unwrap();
    assert_eq!(footer.page_text(), "Page 3 of 5");
    assert_eq!(
        TableParams::from_state(table.state()).to_query_string(),
        "page=3&per_page=20&sort=n&desc=true"
    );
}

#[test]
fn test_params_out_of_range_page_is_clamped_for_client_tables() {
    let mut table = TableController::new(vec![ColumnDef::key("n", "N")], PaginationMode::Client)
        .with_rows(lines(15));

    let mut state = table.state().clone();
    TableParams::parse("page=9").unwrap().apply_to(&mut state);
    table.set_state(state).unwrap();

    assert_eq!(table.state().pagination.page_index, 1);
}

#[test]
fn test_params_show_all_rejected_for_server_tables() {
    let mut table = TableController::<Line>::new(
        vec![ColumnDef::key("n", "N")],
        PaginationMode::Server { total_items: 40 },
    );

    let mut state = table.state().clone();
    TableParams::parse("per_page=all").unwrap().apply_to(&mut state);
    assert!(table.set_state(state).is_err());
}
