//! Decode branch records from an XLSX byte blob

use calamine::{Data, Reader, Xlsx};
use std::io::Cursor;

use crate::error::{Error, Result};
use crate::model::{BranchInput, ValidatedBranch};

/// One data row from the sheet, before validation. `row` is the 1-based data
/// row number (the header row is not counted), used in failure reports.
#[derive(Debug)]
pub struct RowCandidate {
    pub row: usize,
    pub input: BranchInput,
    /// Fields whose cell value could not be interpreted (bad status enum)
    pub invalid: Vec<&'static str>,
}

/// Read candidate records from the first sheet of an XLSX blob.
///
/// Header cells are matched case-sensitively against the wire field names;
/// unrecognized headers are ignored, and so is an `id` column. Fully empty
/// rows are skipped. Bytes that are not a readable workbook, or a workbook
/// with no sheets, are a decode error.
pub fn read_branches_xlsx(bytes: &[u8]) -> Result<Vec<RowCandidate>> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
        .map_err(|e| Error::Decode(format!("not a readable XLSX workbook: {e}")))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| Error::Decode("workbook has no sheets".to_string()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| Error::Decode(format!("failed to read sheet '{sheet_name}': {e}")))?;

    let rows: Vec<_> = range.rows().collect();
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    // Header row supplies the column -> field assignment
    let headers: Vec<Option<String>> = rows[0]
        .iter()
        .map(|cell| match cell {
            Data::String(s) if !s.is_empty() => Some(s.clone()),
            _ => None,
        })
        .collect();

    let mut candidates = Vec::new();

    for (row_idx, row) in rows.iter().enumerate().skip(1) {
        let mut input = BranchInput::default();
        let mut invalid = Vec::new();

        for (col, header) in headers.iter().enumerate() {
            let Some(name) = header else { continue };
            // The exported id column is regenerated on import
            if name == "id" {
                continue;
            }
            let Some(value) = get_cell_string(row, col) else { continue };
            if let Err(field) = input.set_wire_field(name, value) {
                invalid.push(field);
            }
        }

        // Skip blank rows instead of reporting them as all-fields-missing
        if input.is_empty() && invalid.is_empty() {
            continue;
        }

        candidates.push(RowCandidate { row: row_idx, input, invalid });
    }

    Ok(candidates)
}

/// Enforce the all-or-nothing import policy: either every candidate
/// validates and the complete set is returned, or the whole batch fails with
/// one message per bad row and nothing may be persisted.
pub fn validate_candidates(candidates: Vec<RowCandidate>) -> Result<Vec<ValidatedBranch>> {
    let mut valid = Vec::with_capacity(candidates.len());
    let mut failures = Vec::new();

    for candidate in candidates {
        let row = candidate.row;
        let mut bad: Vec<&str> = candidate.invalid;
        match candidate.input.validate() {
            Ok(branch) if bad.is_empty() => {
                valid.push(branch);
                continue;
            }
            Ok(_) => {}
            Err(missing) => bad.extend(missing),
        }
        failures.push(format!("row {}: {}", row, bad.join(", ")));
    }

    if failures.is_empty() {
        Ok(valid)
    } else {
        Err(Error::validation(failures))
    }
}

fn get_cell_string(row: &[Data], col: usize) -> Option<String> {
    row.get(col).and_then(|cell| match cell {
        Data::String(s) if !s.is_empty() => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => {
            // Integer-valued floats render without the trailing .0, the way
            // the workbook displays them
            if f.fract() == 0.0 {
                Some((*f as i64).to_string())
            } else {
                Some(f.to_string())
            }
        }
        Data::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}
