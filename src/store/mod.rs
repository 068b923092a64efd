//! # Submission Store
//!
//! Holds submissions and answers paginated, sorted listing queries.
//!
//! - create/update validate before writing; a rejected payload is never
//!   partially applied
//! - ids and creation timestamps are assigned once and never change
//! - listings sort by `createdAt` (stable) and clamp out-of-range pages

mod clock;
mod errors;
mod memory;
mod query;
mod sorter;
mod submission;

pub use clock::{Clock, SteppingClock, SystemClock};
pub use errors::{StoreError, StoreResult};
pub use memory::{InMemorySubmissionStore, SubmissionStore};
pub use query::{
    ListQuery, Pagination, SortInfo, SortOrder, SubmissionPage, DEFAULT_LIMIT, DEFAULT_PAGE,
    SORT_FIELD,
};
pub use sorter::SubmissionSorter;
pub use submission::{Submission, SubmissionData};
