//! Period Filter
//!
//! Selects active sales inside an inclusive calendar interval. This is the
//! only place where `deleted` sales are dropped; later stages assume every
//! record they receive is active.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use shared::models::SaleRecord;

use crate::core::{StatsError, StatsResult};
use crate::utils::time::{month_start, week_start};

/// Inclusive calendar interval `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Reporting period presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodPreset {
    Day,
    Week,
    Month,
    Custom,
}

impl DateRange {
    /// Build a range, rejecting `start > end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> StatsResult<Self> {
        if start > end {
            return Err(StatsError::InvalidPeriod(format!(
                "start {} is after end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    pub fn single_day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// Resolve a preset relative to `today`
    ///
    /// - day: today
    /// - week: Monday of the current week through today
    /// - month: first of the month through today
    /// - custom: the caller's range
    pub fn for_preset(
        preset: PeriodPreset,
        today: NaiveDate,
        custom: Option<DateRange>,
    ) -> StatsResult<Self> {
        match preset {
            PeriodPreset::Day => Ok(Self::single_day(today)),
            PeriodPreset::Week => Self::new(week_start(today), today),
            PeriodPreset::Month => Self::new(month_start(today), today),
            PeriodPreset::Custom => {
                let range = custom.ok_or_else(|| {
                    StatsError::InvalidPeriod("custom period requires start and end".to_string())
                })?;
                Self::new(range.start, range.end)
            }
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of calendar days, both ends included
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// The window of identical length ending the day before `start`
    pub fn previous(&self) -> Self {
        let length = Duration::days(self.days());
        Self {
            start: self.start - length,
            end: self.start - Duration::days(1),
        }
    }

    /// Every date of the range in order
    pub fn iter_days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let start = self.start;
        (0..self.days().max(0)).map(move |offset| start + Duration::days(offset))
    }
}

/// Active sales with `start <= sale_date <= end`
///
/// An inverted interval selects nothing.
pub fn filter_period(sales: &[SaleRecord], start: NaiveDate, end: NaiveDate) -> Vec<SaleRecord> {
    sales
        .iter()
        .filter(|sale| sale.is_active() && start <= sale.sale_date && sale.sale_date <= end)
        .cloned()
        .collect()
}

/// [`filter_period`] over a [`DateRange`]
pub fn filter_range(sales: &[SaleRecord], range: &DateRange) -> Vec<SaleRecord> {
    filter_period(sales, range.start, range.end)
}
