use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use karte_cli::pipeline::{Conversion, ConvertedRecords};
use karte_model::{GroupedRecord, SectionCode, SectionRecord};
use karte_parse::ParseStats;

/// Prints the per-visit table to stderr so stdout stays valid JSON.
pub fn print_summary(conversion: &Conversion) {
    if let Some(stats) = &conversion.stats {
        print_parse_stats(stats);
    }
    eprintln!("Sections parsed: {}", conversion.section_count);

    let table = match &conversion.records {
        ConvertedRecords::Grouped(visits) => visit_table(visits),
        ConvertedRecords::Flat(records) => section_table(records),
    };
    eprintln!("{table}");
}

/// One row per visit with a ✓ per section present, then a TOTAL row
/// counting visits and the visits carrying each section.
fn visit_table(visits: &[GroupedRecord]) -> Table {
    let mut table = Table::new();
    let mut header = vec![
        header_cell("Date"),
        header_cell("Time"),
        header_cell("Department"),
    ];
    header.extend(SectionCode::ALL.iter().map(|code| header_cell(code.as_code())));
    table.set_header(header);
    apply_summary_table_style(&mut table);
    for column in 3..3 + SectionCode::ALL.len() {
        align_column(&mut table, column, CellAlignment::Center);
    }

    let mut section_totals = [0usize; SectionCode::ALL.len()];
    for visit in visits {
        let mut row = vec![
            Cell::new(&visit.date),
            Cell::new(&visit.time),
            department_cell(&visit.department),
        ];
        for (total, code) in section_totals.iter_mut().zip(SectionCode::ALL) {
            let present = visit.section(code).is_some();
            if present {
                *total += 1;
            }
            row.push(presence_cell(present));
        }
        table.add_row(row);
    }

    let mut total_row = vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(format!("{} visits", visits.len())).add_attribute(Attribute::Bold),
    ];
    total_row.extend(section_totals.into_iter().map(count_cell));
    table.add_row(total_row);
    table
}

fn section_table(records: &[SectionRecord]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Date"),
        header_cell("Time"),
        header_cell("Department"),
        header_cell("Section"),
        header_cell("Chars"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Center);
    align_column(&mut table, 4, CellAlignment::Right);
    for record in records {
        table.add_row(vec![
            Cell::new(&record.date),
            Cell::new(&record.time),
            department_cell(&record.department),
            Cell::new(record.section.as_code()),
            Cell::new(record.content.chars().count()),
        ]);
    }
    table
}

fn print_parse_stats(stats: &ParseStats) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Lines"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let rows = [
        ("Total", stats.lines),
        ("Blank", stats.blank),
        ("Date headers", stats.date_headers),
        ("Entry headers", stats.entry_headers),
        ("Section headers", stats.section_headers),
        ("Content", stats.content_lines),
        ("Dropped", stats.dropped_lines),
    ];
    for (label, count) in rows {
        table.add_row(vec![Cell::new(label), count_cell(count)]);
    }
    eprintln!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
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

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn department_cell(department: &str) -> Cell {
    Cell::new(department)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn presence_cell(present: bool) -> Cell {
    if present {
        Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell("-")
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
