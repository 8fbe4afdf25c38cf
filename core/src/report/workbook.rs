//! Writes report rows into a styled `.xlsx` workbook.
//!
//! Runs of identical IPs are merged in the first column and runs of identical
//! domains (within the same IP) in the second one.

use std::ops::Range;
use std::path::Path;

use exposr_common::error::ScanError;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};

use crate::report::{COLUMNS, ReportRow};

const HEADER_FILL: u32 = 0xD9E1F2;
const CELL_FILL: u32 = 0xF2F2F2;

const IP_COLUMN: u16 = 0;
const DOMAIN_COLUMN: u16 = 1;

/// Row index ranges over which consecutive keys are equal.
pub fn merge_spans<K: PartialEq>(keys: &[K]) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut start = 0;

    for idx in 1..=keys.len() {
        if idx == keys.len() || keys[idx] != keys[start] {
            spans.push(start..idx);
            start = idx;
        }
    }

    spans
}

pub fn render(rows: &[ReportRow], path: impl AsRef<Path>) -> Result<(), ScanError> {
    write_workbook(rows, path.as_ref()).map_err(|e| ScanError::Render(e.to_string()))
}

fn write_workbook(rows: &[ReportRow], path: &Path) -> Result<(), XlsxError> {
    let header = base_format().set_bold().set_background_color(Color::RGB(HEADER_FILL));
    let cell = base_format().set_background_color(Color::RGB(CELL_FILL));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, title) in COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *title, &header)?;
    }

    for (idx, row) in rows.iter().enumerate() {
        let sheet_row = idx as u32 + 1;
        for (col, value) in row.cells().iter().enumerate().skip(2) {
            worksheet.write_string_with_format(sheet_row, col as u16, *value, &cell)?;
        }
    }

    let ips: Vec<&str> = rows.iter().map(|r| r.ip.as_str()).collect();
    write_merged(worksheet, IP_COLUMN, &merge_spans(&ips), &ips, &cell)?;

    let domains: Vec<(&str, &str)> = rows.iter().map(|r| (r.ip.as_str(), r.domain.as_str())).collect();
    let domain_values: Vec<&str> = rows.iter().map(|r| r.domain.as_str()).collect();
    write_merged(worksheet, DOMAIN_COLUMN, &merge_spans(&domains), &domain_values, &cell)?;

    worksheet.autofit();
    workbook.save(path)
}

fn write_merged(
    worksheet: &mut Worksheet,
    col: u16,
    spans: &[Range<usize>],
    values: &[&str],
    format: &Format,
) -> Result<(), XlsxError> {
    for span in spans {
        // sheet row 0 is the header
        let first = span.start as u32 + 1;
        let last = span.end as u32;
        let value = values[span.start];

        if first == last {
            worksheet.write_string_with_format(first, col, value, format)?;
        } else {
            worksheet.merge_range(first, col, last, col, value, format)?;
        }
    }
    Ok(())
}

fn base_format() -> Format {
    Format::new()
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
}
