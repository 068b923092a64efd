//! Submission ordering for listings
//!
//! Sorts by `createdAt` only. The sort is stable, so submissions sharing a
//! timestamp keep their insertion order in both directions.

use std::cmp::Ordering;

use super::query::SortOrder;
use super::submission::Submission;

pub struct SubmissionSorter;

impl SubmissionSorter {
    /// Sorts submissions (given in insertion order) by creation time.
    pub fn sort(submissions: &mut [&Submission], order: SortOrder) {
        submissions.sort_by(|a, b| Self::compare(a, b, order));
    }

    fn compare(a: &Submission, b: &Submission, order: SortOrder) -> Ordering {
        let ordering = a.created_at.cmp(&b.created_at);
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}
