//! Branch record model and input validation
//!
//! `Branch` is the persisted shape (id assigned by the store). `BranchInput`
//! is the partial shape accepted from JSON bodies and spreadsheet rows; it is
//! validated into a `ValidatedBranch` before any persistence call.

use serde::{Deserialize, Serialize};

/// Wire field names in schema order, as they appear in JSON bodies and
/// spreadsheet headers. `id` is first and is ignored on import.
pub const WIRE_FIELDS: &[&str] = &[
    "id",
    "branchName",
    "branchCode",
    "address",
    "city",
    "state",
    "country",
    "pincode",
    "phone",
    "email",
    "status",
];

/// Branch lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
pub enum Status {
    #[default]
    Active,
    Inactive,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "Active",
            Status::Inactive => "Inactive",
        }
    }

    /// Parse a status cell/string, case-insensitively. Unknown values are
    /// rejected so a typo'd spreadsheet cell fails validation instead of
    /// silently defaulting.
    pub fn parse(s: &str) -> Option<Status> {
        match s.trim().to_lowercase().as_str() {
            "active" => Some(Status::Active),
            "inactive" => Some(Status::Inactive),
            _ => None,
        }
    }
}

/// A persisted branch record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub id: String,
    pub branch_name: String,
    pub branch_code: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub pincode: String,
    pub phone: String,
    pub email: String,
    pub status: Status,
}

/// Partial branch input from a JSON body or a spreadsheet row
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchInput {
    pub branch_name: Option<String>,
    pub branch_code: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub pincode: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub status: Option<Status>,
}

/// A branch input that passed validation; everything but the id
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedBranch {
    pub branch_name: String,
    pub branch_code: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub pincode: String,
    pub phone: String,
    pub email: String,
    pub status: Status,
}

impl BranchInput {
    /// Set a field by its wire name. Unknown names are ignored, matching the
    /// import rule that unrecognized spreadsheet headers are dropped.
    pub fn set_wire_field(&mut self, name: &str, value: String) -> Result<(), &'static str> {
        match name {
            "branchName" => self.branch_name = Some(value),
            "branchCode" => self.branch_code = Some(value),
            "address" => self.address = Some(value),
            "city" => self.city = Some(value),
            "state" => self.state = Some(value),
            "country" => self.country = Some(value),
            "pincode" => self.pincode = Some(value),
            "phone" => self.phone = Some(value),
            "email" => self.email = Some(value),
            "status" => match Status::parse(&value) {
                Some(status) => self.status = Some(status),
                None => return Err("status"),
            },
            _ => {}
        }
        Ok(())
    }

    /// True if no field was supplied at all (e.g. a blank spreadsheet row)
    pub fn is_empty(&self) -> bool {
        self.branch_name.is_none()
            && self.branch_code.is_none()
            && self.address.is_none()
            && self.city.is_none()
            && self.state.is_none()
            && self.country.is_none()
            && self.pincode.is_none()
            && self.phone.is_none()
            && self.email.is_none()
            && self.status.is_none()
    }

    /// Validate into a complete branch, naming every missing required field.
    /// `status` defaults to Active when absent; all other fields are
    /// required. Values are accepted as-is, no format checks.
    pub fn validate(self) -> Result<ValidatedBranch, Vec<&'static str>> {
        let mut missing = Vec::new();

        fn take(slot: Option<String>, name: &'static str, missing: &mut Vec<&'static str>) -> String {
            match slot {
                Some(v) => v,
                None => {
                    missing.push(name);
                    String::new()
                }
            }
        }

        let branch = ValidatedBranch {
            branch_name: take(self.branch_name, "branchName", &mut missing),
            branch_code: take(self.branch_code, "branchCode", &mut missing),
            address: take(self.address, "address", &mut missing),
            city: take(self.city, "city", &mut missing),
            state: take(self.state, "state", &mut missing),
            country: take(self.country, "country", &mut missing),
            pincode: take(self.pincode, "pincode", &mut missing),
            phone: take(self.phone, "phone", &mut missing),
            email: take(self.email, "email", &mut missing),
            status: self.status.unwrap_or_default(),
        };

        if missing.is_empty() {
            Ok(branch)
        } else {
            Err(missing)
        }
    }
}
