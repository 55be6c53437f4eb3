//! SQLite-backed branch record store
//!
//! All persistence goes through `BranchStore`. Ids are UUIDv4, assigned here
//! exactly once at creation. Create and replace validate required fields
//! before touching the database, so there are no partial writes.

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::model::{Branch, BranchInput, ValidatedBranch};
use crate::query::ListCriteria;

const SELECT_COLUMNS: &str = "id, branch_name, branch_code, address, city, \
                              state, country, pincode, phone, email, status";

/// Open a pooled connection and run migrations
pub async fn connect(database_url: &str) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new().connect_with(options).await?;
    sqlx::migrate!().run(&pool).await?;
    Ok(pool)
}

#[derive(Debug, Clone)]
pub struct BranchStore {
    pool: SqlitePool,
}

impl BranchStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Validate and persist a new branch. The id is generated here and never
    /// reassigned.
    pub async fn create(&self, input: BranchInput) -> Result<Branch> {
        let fields = input.validate().map_err(Error::validation)?;
        let mut tx = self.pool.begin().await?;
        let branch = insert_branch(&mut tx, fields).await?;
        tx.commit().await?;
        Ok(branch)
    }

    /// Validate-free bulk insert for import: every record was already
    /// validated, and either all of them are created or none (single
    /// transaction).
    pub async fn create_many(&self, records: Vec<ValidatedBranch>) -> Result<Vec<Branch>> {
        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(records.len());
        for fields in records {
            created.push(insert_branch(&mut tx, fields).await?);
        }
        tx.commit().await?;
        Ok(created)
    }

    /// One page of records matching the criteria
    pub async fn find_many(&self, criteria: &ListCriteria) -> Result<Vec<Branch>> {
        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM branches{}{} LIMIT ? OFFSET ?",
            criteria.where_sql(),
            criteria.order_sql(),
        );
        let mut query = sqlx::query_as::<_, Branch>(&sql);
        if let Some(pattern) = criteria.like_pattern() {
            query = query.bind(pattern.clone()).bind(pattern.clone()).bind(pattern);
        }
        let branches = query
            .bind(criteria.limit())
            .bind(criteria.offset())
            .fetch_all(&self.pool)
            .await?;
        Ok(branches)
    }

    /// Total number of records matching the criteria's filter, ignoring
    /// pagination
    pub async fn count(&self, criteria: &ListCriteria) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM branches{}", criteria.where_sql());
        let mut query = sqlx::query_scalar::<_, i64>(&sql);
        if let Some(pattern) = criteria.like_pattern() {
            query = query.bind(pattern.clone()).bind(pattern.clone()).bind(pattern);
        }
        let total = query.fetch_one(&self.pool).await?;
        Ok(total)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Branch>> {
        let branch = sqlx::query_as::<_, Branch>(&format!(
            "SELECT {SELECT_COLUMNS} FROM branches WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(branch)
    }

    /// Full-document replace. Missing required fields fail validation; an
    /// unknown id is a NotFound, not a silent no-op.
    pub async fn replace(&self, id: &str, input: BranchInput) -> Result<Branch> {
        let fields = input.validate().map_err(Error::validation)?;
        let result = sqlx::query(
            "UPDATE branches
             SET branch_name = ?, branch_code = ?, address = ?, city = ?,
                 state = ?, country = ?, pincode = ?, phone = ?, email = ?,
                 status = ?
             WHERE id = ?",
        )
        .bind(&fields.branch_name)
        .bind(&fields.branch_code)
        .bind(&fields.address)
        .bind(&fields.city)
        .bind(&fields.state)
        .bind(&fields.country)
        .bind(&fields.pincode)
        .bind(&fields.phone)
        .bind(&fields.email)
        .bind(fields.status)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound { id: id.to_string() });
        }

        Ok(Branch {
            id: id.to_string(),
            branch_name: fields.branch_name,
            branch_code: fields.branch_code,
            address: fields.address,
            city: fields.city,
            state: fields.state,
            country: fields.country,
            pincode: fields.pincode,
            phone: fields.phone,
            email: fields.email,
            status: fields.status,
        })
    }

    /// Delete by id; an unknown id is a NotFound, consistent with replace
    pub async fn delete(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM branches WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound { id: id.to_string() });
        }
        Ok(())
    }

    /// Every record, in natural enumeration order. Export dumps the whole
    /// store on purpose: no filter, no pagination.
    pub async fn fetch_all(&self) -> Result<Vec<Branch>> {
        let branches =
            sqlx::query_as::<_, Branch>(&format!("SELECT {SELECT_COLUMNS} FROM branches"))
                .fetch_all(&self.pool)
                .await?;
        Ok(branches)
    }
}

async fn insert_branch(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    fields: ValidatedBranch,
) -> Result<Branch> {
    let id = Uuid::new_v4().to_string();
    sqlx::query(
        "INSERT INTO branches (id, branch_name, branch_code, address, city,
                               state, country, pincode, phone, email, status)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(&fields.branch_name)
    .bind(&fields.branch_code)
    .bind(&fields.address)
    .bind(&fields.city)
    .bind(&fields.state)
    .bind(&fields.country)
    .bind(&fields.pincode)
    .bind(&fields.phone)
    .bind(&fields.email)
    .bind(fields.status)
    .execute(&mut **tx)
    .await?;

    Ok(Branch {
        id,
        branch_name: fields.branch_name,
        branch_code: fields.branch_code,
        address: fields.address,
        city: fields.city,
        state: fields.state,
        country: fields.country,
        pincode: fields.pincode,
        phone: fields.phone,
        email: fields.email,
        status: fields.status,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::Status;

    pub(crate) async fn test_store() -> BranchStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory pool");
        sqlx::migrate!().run(&pool).await.expect("migrations");
        BranchStore::new(pool)
    }

    pub(crate) fn input(name: &str, code: &str, city: &str) -> BranchInput {
        BranchInput {
            branch_name: Some(name.to_string()),
            branch_code: Some(code.to_string()),
            address: Some("12 High St".to_string()),
            city: Some(city.to_string()),
            state: Some("TN".to_string()),
            country: Some("India".to_string()),
            pincode: Some("600001".to_string()),
            phone: Some("044-5550123".to_string()),
            email: Some(format!("{}@example.com", code.to_lowercase())),
            status: None,
        }
    }

    #[tokio::test]
    async fn create_assigns_unique_ids() {
        let store = test_store().await;
        let a = store.create(input("Alpha", "AL-1", "Chennai")).await.unwrap();
        let b = store.create(input("Beta", "BE-1", "Madurai")).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a.status, Status::Active);
    }

    #[tokio::test]
    async fn create_missing_email_fails_and_persists_nothing() {
        let store = test_store().await;
        let mut bad = input("Alpha", "AL-1", "Chennai");
        bad.email = None;
        let err = store.create(bad).await.unwrap_err();
        match err {
            Error::Validation { fields } => assert_eq!(fields, vec!["email"]),
            other => panic!("expected validation error, got {other}"),
        }
        assert!(store.fetch_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn replace_unknown_id_is_not_found() {
        let store = test_store().await;
        let err = store
            .replace("no-such-id", input("Alpha", "AL-1", "Chennai"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[tokio::test]
    async fn replace_overwrites_every_field_but_keeps_id() {
        let store = test_store().await;
        let created = store.create(input("Alpha", "AL-1", "Chennai")).await.unwrap();

        let mut replacement = input("Alpha Prime", "AL-2", "Coimbatore");
        replacement.status = Some(Status::Inactive);
        let updated = store.replace(&created.id, replacement).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.branch_name, "Alpha Prime");
        assert_eq!(updated.status, Status::Inactive);

        let fetched = store.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched, updated);
    }

    #[tokio::test]
    async fn delete_unknown_id_is_not_found() {
        let store = test_store().await;
        let err = store.delete("no-such-id").await.unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[tokio::test]
    async fn delete_removes_the_record() {
        let store = test_store().await;
        let created = store.create(input("Alpha", "AL-1", "Chennai")).await.unwrap();
        store.delete(&created.id).await.unwrap();
        assert!(store.find_by_id(&created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn concurrent_creates_never_collide_on_id() {
        let store = test_store().await;
        let (a, b) = tokio::join!(
            store.create(input("Alpha", "AL-1", "Chennai")),
            store.create(input("Beta", "BE-1", "Madurai")),
        );
        assert_ne!(a.unwrap().id, b.unwrap().id);
    }

    #[tokio::test]
    async fn create_many_is_all_or_nothing() {
        let store = test_store().await;
        let records = vec![
            input("Alpha", "AL-1", "Chennai").validate().unwrap(),
            input("Beta", "BE-1", "Madurai").validate().unwrap(),
        ];
        let created = store.create_many(records).await.unwrap();
        assert_eq!(created.len(), 2);
        assert_eq!(store.fetch_all().await.unwrap().len(), 2);
    }
}
