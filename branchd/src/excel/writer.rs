//! Encode branch records to an XLSX byte blob

use anyhow::{Context, Result};
use rust_xlsxwriter::Workbook;

use crate::model::{Branch, WIRE_FIELDS};

pub const SHEET_NAME: &str = "Branches";

/// Write the full record set into a single-sheet workbook.
///
/// Column order is `id` followed by the schema field order; the id is an
/// opaque text column that import ignores. Row order is whatever enumeration
/// order the caller supplied (the store's natural order for exports).
pub fn write_branches_xlsx(branches: &[Branch]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, name) in WIRE_FIELDS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *name)?;
    }

    for (row_idx, branch) in branches.iter().enumerate() {
        let row = (row_idx + 1) as u32;
        let cells = [
            branch.id.as_str(),
            branch.branch_name.as_str(),
            branch.branch_code.as_str(),
            branch.address.as_str(),
            branch.city.as_str(),
            branch.state.as_str(),
            branch.country.as_str(),
            branch.pincode.as_str(),
            branch.phone.as_str(),
            branch.email.as_str(),
            branch.status.as_str(),
        ];
        for (col, value) in cells.iter().enumerate() {
            worksheet.write_string(row, col as u16, *value)?;
        }
    }

    workbook
        .save_to_buffer()
        .context("Failed to serialize workbook")
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{Data, Reader, Xlsx};
    use crate::model::Status;
    use std::io::Cursor;

    #[test]
    fn header_row_follows_schema_order() {
        let bytes = write_branches_xlsx(&[]).unwrap();
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes.as_slice())).unwrap();

        let names = workbook.sheet_names();
        assert_eq!(names.first().map(String::as_str), Some(SHEET_NAME));

        let range = workbook.worksheet_range(SHEET_NAME).unwrap();
        let header: Vec<String> = range
            .rows()
            .next()
            .unwrap()
            .iter()
            .map(|c| match c {
                Data::String(s) => s.clone(),
                other => panic!("unexpected header cell: {other:?}"),
            })
            .collect();
        assert_eq!(header, WIRE_FIELDS);
    }

    #[test]
    fn rows_preserve_caller_order() {
        let mk = |name: &str| Branch {
            id: uuid::Uuid::new_v4().to_string(),
            branch_name: name.to_string(),
            branch_code: "X".to_string(),
            address: "X".to_string(),
            city: "X".to_string(),
            state: "X".to_string(),
            country: "X".to_string(),
            pincode: "X".to_string(),
            phone: "X".to_string(),
            email: "x@example.com".to_string(),
            status: Status::Inactive,
        };
        let bytes = write_branches_xlsx(&[mk("First"), mk("Second")]).unwrap();

        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes.as_slice())).unwrap();
        let range = workbook.worksheet_range(SHEET_NAME).unwrap();
        let names: Vec<_> = range
            .rows()
            .skip(1)
            .map(|row| row[1].to_string())
            .collect();
        assert_eq!(names, ["First", "Second"]);
    }
}
