//! # Submission Store
//!
//! The store owns its collection; callers only see the operations below.
//! Every operation runs under one lock, so no caller observes a half-applied
//! mutation. Payloads are validated before the lock is taken.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::schema::{FormSchema, SchemaValidator};

use super::clock::{Clock, SystemClock};
use super::errors::{StoreError, StoreResult};
use super::query::{ListQuery, Pagination, SortInfo, SubmissionPage};
use super::sorter::SubmissionSorter;
use super::submission::{Submission, SubmissionData};

/// Submission store operations
pub trait SubmissionStore: Send + Sync {
    /// Validates and stores a new submission.
    fn create(&self, data: SubmissionData) -> StoreResult<Submission>;

    /// Fetches one submission.
    fn get(&self, id: &str) -> StoreResult<Submission>;

    /// Validates `data` and replaces the submission's data, keeping its id
    /// and creation time.
    fn update(&self, id: &str, data: SubmissionData) -> StoreResult<Submission>;

    /// Removes a submission permanently and returns it.
    fn delete(&self, id: &str) -> StoreResult<Submission>;

    /// Sorted, clamped page of submissions.
    fn list(&self, query: &ListQuery) -> StoreResult<SubmissionPage>;

    /// Number of stored submissions
    fn len(&self) -> StoreResult<usize>;

    fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}

/// Transient in-memory store.
///
/// Records are kept in insertion order; that order breaks `createdAt` ties.
pub struct InMemorySubmissionStore {
    schema: Arc<FormSchema>,
    records: RwLock<Vec<Submission>>,
    clock: Arc<dyn Clock>,
}

impl InMemorySubmissionStore {
    pub fn new(schema: Arc<FormSchema>) -> Self {
        Self::with_clock(schema, Arc::new(SystemClock))
    }

    pub fn with_clock(schema: Arc<FormSchema>, clock: Arc<dyn Clock>) -> Self {
        Self {
            schema,
            records: RwLock::new(Vec::new()),
            clock,
        }
    }

    /// The schema submissions are validated against
    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    fn validate(&self, data: &SubmissionData) -> StoreResult<()> {
        SchemaValidator::new(&self.schema)
            .validate_map(data)
            .into_result()
            .map_err(|errors| {
                tracing::debug!(failed_fields = errors.len(), "submission rejected");
                StoreError::Validation(errors)
            })
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Vec<Submission>>> {
        self.records
            .read()
            .map_err(|_| StoreError::Internal("Lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Vec<Submission>>> {
        self.records
            .write()
            .map_err(|_| StoreError::Internal("Lock poisoned".to_string()))
    }
}

impl SubmissionStore for InMemorySubmissionStore {
    fn create(&self, data: SubmissionData) -> StoreResult<Submission> {
        self.validate(&data)?;

        let mut records = self.write()?;
        let submission = Submission::new(data, self.clock.now());
        records.push(submission.clone());

        tracing::info!(id = %submission.id, "submission created");
        Ok(submission)
    }

    fn get(&self, id: &str) -> StoreResult<Submission> {
        self.read()?
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn update(&self, id: &str, data: SubmissionData) -> StoreResult<Submission> {
        self.validate(&data)?;

        let mut records = self.write()?;
        let record = records
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        record.data = data;

        tracing::info!(id = %record.id, "submission updated");
        Ok(record.clone())
    }

    fn delete(&self, id: &str) -> StoreResult<Submission> {
        let mut records = self.write()?;
        let index = records
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let removed = records.remove(index);

        tracing::info!(id = %removed.id, "submission deleted");
        Ok(removed)
    }

    fn list(&self, query: &ListQuery) -> StoreResult<SubmissionPage> {
        let records = self.read()?;

        let mut ordered: Vec<&Submission> = records.iter().collect();
        SubmissionSorter::sort(&mut ordered, query.sort_order);

        let total_items = ordered.len();
        let total_pages = query.total_pages(total_items);
        let page = query.safe_page(total_pages);
        let start = (page - 1) * query.limit;

        let data = ordered
            .into_iter()
            .skip(start)
            .take(query.limit)
            .cloned()
            .collect();

        Ok(SubmissionPage {
            data,
            pagination: Pagination {
                page,
                limit: query.limit,
                total_items,
                total_pages,
            },
            sort: SortInfo::from(query.sort_order),
        })
    }

    fn len(&self) -> StoreResult<usize> {
        Ok(self.read()?.len())
    }
}
