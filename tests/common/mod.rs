#![allow(dead_code)]

use std::path::{Path, PathBuf};

use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

/// Header in the layout recipe authors use, commentary columns included
pub const HEADER: [&str; 10] = [
    "IsEnabled",
    "ID",
    "ResultItemName",
    "ResultItemID",
    "ResultItemAmount",
    "CostMoney",
    "CostItemName",
    "CostItemID",
    "CostItemAmount",
    "Tag",
];

pub const NOTES: [&str; 10] = [
    "是否启用",
    "配方ID",
    "产物名称",
    "产物ID",
    "产物数量",
    "金钱",
    "消耗物品名称",
    "消耗物品ID",
    "消耗物品数量",
    "标签",
];

pub const TYPES: [&str; 10] = [
    "bool", "string", "-", "int", "int", "long", "-", "int[]", "long[]", "string[]",
];

/// A data row given as
/// `[enabled, id, result_id, result_amount, money, cost_ids, cost_amounts, tags]`;
/// the commentary columns are filled in.
pub fn recipe_row(cells: [&str; 8]) -> Vec<String> {
    let [enabled, id, result_id, result_amount, money, cost_ids, cost_amounts, tags] = cells;
    [
        enabled,
        id,
        "some item",
        result_id,
        result_amount,
        money,
        "some cost",
        cost_ids,
        cost_amounts,
        tags,
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

pub fn blank_row() -> Vec<String> {
    Vec::new()
}

/// Header plus both annotation rows, followed by `data`
pub fn recipe_sheet(data: Vec<Vec<String>>) -> Vec<Vec<String>> {
    let mut rows = vec![
        HEADER.iter().map(|s| s.to_string()).collect(),
        NOTES.iter().map(|s| s.to_string()).collect(),
        TYPES.iter().map(|s| s.to_string()).collect(),
    ];
    rows.extend(data);
    rows
}

/// Write an xlsx file. Cells that parse as numbers are stored as numbers,
/// the way a spreadsheet editor saves them; empty cells are not written.
pub fn write_workbook(path: &Path, sheets: &[(&str, Vec<Vec<String>>)]) {
    write_workbook_at(path, sheets, 0);
}

/// Like [`write_workbook`], with every sheet shifted right by `col_offset` columns
pub fn write_workbook_at(path: &Path, sheets: &[(&str, Vec<Vec<String>>)], col_offset: u16) {
    let mut workbook = Workbook::new();

    for (name, rows) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*name).unwrap();

        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if cell.is_empty() {
                    continue;
                }
                let (r, c) = (r as u32, c as u16 + col_offset);
                match cell.parse::<f64>() {
                    Ok(number) => worksheet.write_number(r, c, number).unwrap(),
                    Err(_) => worksheet.write_string(r, c, cell.as_str()).unwrap(),
                };
            }
        }
    }

    workbook.save(path).unwrap();
}

/// Temporary directory with a single-sheet recipe workbook in it
pub fn temp_workbook(file_name: &str, data: Vec<Vec<String>>) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join(file_name);
    write_workbook(&path, &[("Recipes", recipe_sheet(data))]);
    (dir, path)
}
