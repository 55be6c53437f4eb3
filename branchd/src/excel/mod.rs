//! XLSX import/export for branch records
//!
//! Import reads the first sheet, matches header cells case-sensitively
//! against the wire field names, and produces one candidate record per data
//! row. Export dumps every record into a single "Branches" sheet in schema
//! column order, id included as an opaque text column.

pub mod reader;
pub mod writer;

pub use reader::{RowCandidate, read_branches_xlsx, validate_candidates};
pub use writer::write_branches_xlsx;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Branch, Status};

    fn branch(name: &str, code: &str) -> Branch {
        Branch {
            id: uuid::Uuid::new_v4().to_string(),
            branch_name: name.to_string(),
            branch_code: code.to_string(),
            address: "7 Beach Rd".to_string(),
            city: "Chennai".to_string(),
            state: "TN".to_string(),
            country: "India".to_string(),
            pincode: "600004".to_string(),
            phone: "044-5550199".to_string(),
            email: format!("{}@example.com", code.to_lowercase()),
            status: Status::Active,
        }
    }

    #[test]
    fn round_trip_preserves_business_fields() {
        let branches = vec![branch("Alpha", "AL-1"), branch("Beta", "BE-1"), branch("Gamma", "GA-1")];
        let bytes = write_branches_xlsx(&branches).unwrap();

        let rows = read_branches_xlsx(&bytes).unwrap();
        assert_eq!(rows.len(), 3);

        let validated = validate_candidates(rows).unwrap();
        for (original, reimported) in branches.iter().zip(&validated) {
            assert_eq!(reimported.branch_name, original.branch_name);
            assert_eq!(reimported.branch_code, original.branch_code);
            assert_eq!(reimported.address, original.address);
            assert_eq!(reimported.city, original.city);
            assert_eq!(reimported.state, original.state);
            assert_eq!(reimported.country, original.country);
            assert_eq!(reimported.pincode, original.pincode);
            assert_eq!(reimported.phone, original.phone);
            assert_eq!(reimported.email, original.email);
            assert_eq!(reimported.status, original.status);
        }
    }

    #[test]
    fn export_of_empty_store_round_trips_to_no_rows() {
        let bytes = write_branches_xlsx(&[]).unwrap();
        let rows = read_branches_xlsx(&bytes).unwrap();
        assert!(rows.is_empty());
    }
}
