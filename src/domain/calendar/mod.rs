//! Business calendar policy
//!
//! Decides whether a date may take bookings at all, independent of slot
//! availability: blackout dates (holidays, maintenance) and the weekly
//! closing day are both off-limits.

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, Weekday};

use crate::domain::DomainResult;

/// Source of blackout dates, maintained outside the core (admin tooling).
#[async_trait]
pub trait BlackoutSource: Send + Sync {
    async fn is_blackout(&self, date: NaiveDate) -> DomainResult<bool>;
}

/// The shop's weekly closing day (ISO weekday 7).
pub const CLOSED_WEEKDAY: Weekday = Weekday::Sun;

/// Pure function of (date, blackout set). Lookup failures from the blackout
/// source propagate unchanged; they are reported, not retried.
pub async fn is_bookable(date: NaiveDate, blackouts: &dyn BlackoutSource) -> DomainResult<bool> {
    if blackouts.is_blackout(date).await? {
        return Ok(false);
    }
    Ok(date.weekday() != CLOSED_WEEKDAY)
}

// ── Tests ──────────────────────────────────────────────────────
