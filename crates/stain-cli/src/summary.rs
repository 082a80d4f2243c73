use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use stain_model::history::group_thousands;
use stain_model::{EstimationResult, HistoryEntry};

use crate::commands::EstimateReport;

pub fn print_estimate(report: &EstimateReport) {
    println!("Image: {}", report.file_name);
    println!(
        "Size: {} x {} ({} px²)",
        report.image_width,
        report.image_height,
        group_thousands(u64::from(report.image_width) * u64::from(report.image_height))
    );
    if let Some(path) = &report.overlay_path {
        println!("Overlay: {}", path.display());
    }

    let result = &report.result;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_detail_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        Cell::new("Sample points"),
        Cell::new(group_thousands(result.total_points as u64)),
    ]);
    table.add_row(vec![
        Cell::new("Inside stain"),
        Cell::new(group_thousands(result.points_in_stain as u64)).fg(Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("Outside stain"),
        dim_cell(group_thousands(result.points_outside() as u64)),
    ]);
    table.add_row(vec![
        Cell::new("Estimated area")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{} px²", group_thousands(result.estimated_area)))
            .add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Stain coverage")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        percentage_cell(result.area_percentage).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

pub fn print_sweep(file_name: &str, rows: &[EstimationResult]) {
    println!("Image: {file_name}");
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Points"),
        header_cell("Inside"),
        header_cell("Area (px²)"),
        header_cell("Coverage"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 0..4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for result in rows {
        table.add_row(vec![
            Cell::new(group_thousands(result.total_points as u64)),
            Cell::new(group_thousands(result.points_in_stain as u64)),
            Cell::new(group_thousands(result.estimated_area)),
            percentage_cell(result.area_percentage),
        ]);
    }
    println!("{table}");
}

pub fn print_history(entries: &[HistoryEntry]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("ID"),
        header_cell("File"),
        header_cell("Size"),
        header_cell("Points"),
        header_cell("Area"),
        header_cell("Coverage"),
        header_cell("Saved"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    for entry in entries {
        table.add_row(vec![
            dim_cell(&entry.id),
            Cell::new(&entry.file_name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(format!("{}x{}", entry.image_width, entry.image_height)),
            Cell::new(entry.points_string()),
            Cell::new(entry.area_string()),
            percentage_cell(entry.area_percentage),
            dim_cell(entry.relative_time()),
        ]);
    }
    println!("{table}");
}

pub fn print_entry(entry: &HistoryEntry) {
    let mut table = Table::new();
    apply_detail_table_style(&mut table);
    let rows = [
        ("ID", entry.id.clone()),
        ("File", entry.file_name.clone()),
        (
            "Size",
            format!("{} x {}", entry.image_width, entry.image_height),
        ),
        ("Points in stain", entry.points_string()),
        ("Estimated area", entry.area_string()),
        ("Coverage", format!("{:.2}%", entry.area_percentage)),
        (
            "Saved",
            format!(
                "{} ({})",
                entry.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
                entry.relative_time()
            ),
        ),
        ("Preview", format!("{} bytes", entry.image_data_url.len())),
    ];
    for (label, value) in rows {
        table.add_row(vec![header_cell(label), Cell::new(value)]);
    }
    println!("{table}");
}

fn apply_detail_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn percentage_cell(percentage: f64) -> Cell {
    Cell::new(format!("{percentage:.2}%")).fg(Color::Yellow)
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
