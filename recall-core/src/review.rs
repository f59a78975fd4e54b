//! Review scheduling and list ranking.
//!
//! Three pure operations, all evaluated against a caller-supplied `now`:
//!
//! - [`compute_review_date`]: interval choice → concrete review timestamp.
//! - [`classify`]: review timestamp → [`ReviewStatus`].
//! - [`rank`]: overdue entries first, everything else after, order otherwise kept.
//!
//! Nothing here reads the clock, so every result can be reproduced in tests.

use chrono::{DateTime, Duration, Utc};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::entry::Entry;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Upper bound (inclusive) of the "due soon" bucket, in days.
pub const DUE_SOON_DAYS: i64 = 3;

/// The fixed set of review intervals a user can choose from.
///
/// The string form (`immediate`, `1day`, `5days`, `20days`, `unlimited`) is the
/// canonical identifier accepted at the input boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr, Display, EnumString)]
pub enum ReviewInterval {
    #[strum(serialize = "immediate")]
    Immediate,
    #[strum(serialize = "1day")]
    OneDay,
    #[strum(serialize = "5days")]
    FiveDays,
    #[strum(serialize = "20days")]
    TwentyDays,
    #[strum(serialize = "unlimited")]
    Unlimited,
}

impl ReviewInterval {
    /// Day offset from "now", or `None` when no review should be scheduled.
    pub fn days(self) -> Option<i64> {
        match self {
            Self::Immediate => Some(0),
            Self::OneDay => Some(1),
            Self::FiveDays => Some(5),
            Self::TwentyDays => Some(20),
            Self::Unlimited => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Immediate => "now",
            Self::OneDay => "in 1 day",
            Self::FiveDays => "in 5 days",
            Self::TwentyDays => "in 20 days",
            Self::Unlimited => "no review",
        }
    }
}

/// Computes the review timestamp for `interval`, counted from `now`.
///
/// Returns `None` for [`ReviewInterval::Unlimited`]: the entry keeps no review
/// timestamp at all.
///
/// # Examples
///
/// ```
/// # use chrono::{TimeZone, Utc};
/// # use recall_core::review::{compute_review_date, ReviewInterval};
/// let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
///
/// let due = compute_review_date(ReviewInterval::FiveDays, now);
/// assert_eq!(due, Some(Utc.with_ymd_and_hms(2024, 1, 6, 0, 0, 0).unwrap()));
/// assert_eq!(compute_review_date(ReviewInterval::Unlimited, now), None);
/// ```
pub fn compute_review_date(interval: ReviewInterval, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    interval.days().map(|days| now + Duration::days(days))
}

/// How urgent an entry's review is, relative to a given "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewStatus {
    NoReview,
    /// Overdue by this many days (always at least 1).
    Overdue(u64),
    DueToday,
    /// Due in 1 to [`DUE_SOON_DAYS`] days.
    DueSoon(u64),
    /// Due in more than [`DUE_SOON_DAYS`] days.
    DueLater(u64),
}

/// Display urgency of a [`ReviewStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    None,
    Ok,
    Warning,
    Error,
}

impl ReviewStatus {
    pub fn is_overdue(self) -> bool {
        matches!(self, Self::Overdue(_))
    }

    pub fn urgency(self) -> Urgency {
        match self {
            Self::NoReview => Urgency::None,
            Self::Overdue(_) => Urgency::Error,
            Self::DueToday | Self::DueSoon(_) => Urgency::Warning,
            Self::DueLater(_) => Urgency::Ok,
        }
    }

    pub fn label(self) -> String {
        match self {
            Self::NoReview => "No review scheduled".to_string(),
            Self::Overdue(days) => format!("Overdue by {days} {}", plural_days(days)),
            Self::DueToday => "Due today".to_string(),
            Self::DueSoon(days) | Self::DueLater(days) => {
                format!("Due in {days} {}", plural_days(days))
            }
        }
    }
}

fn plural_days(n: u64) -> &'static str {
    if n == 1 { "day" } else { "days" }
}

/// Whole days until `review_at`, rounded up.
///
/// Rounding up means anything less than a full day in the past counts as day
/// zero, so a review scheduled for this morning is still "today" in the evening.
pub fn days_until(review_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (review_at - now).num_milliseconds();
    let days = millis.div_euclid(MILLIS_PER_DAY);
    if millis.rem_euclid(MILLIS_PER_DAY) == 0 {
        days
    } else {
        days + 1
    }
}

/// Classifies an optional review timestamp against `now`.
///
/// | `days_until`     | status            |
/// |------------------|-------------------|
/// | absent timestamp | `NoReview`        |
/// | `< 0`            | `Overdue(\|d\|)`  |
/// | `0`              | `DueToday`        |
/// | `1..=3`          | `DueSoon(d)`      |
/// | `> 3`            | `DueLater(d)`     |
///
/// # Examples
///
/// ```
/// # use chrono::{TimeZone, Utc};
/// # use recall_core::review::{classify, ReviewStatus};
/// let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let review = Utc.with_ymd_and_hms(2023, 12, 30, 0, 0, 0).unwrap();
///
/// assert_eq!(classify(Some(review), now), ReviewStatus::Overdue(2));
/// assert_eq!(classify(None, now), ReviewStatus::NoReview);
/// ```
pub fn classify(review_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> ReviewStatus {
    let Some(review_at) = review_at else {
        return ReviewStatus::NoReview;
    };
    let days = days_until(review_at, now);
    match days {
        d if d < 0 => ReviewStatus::Overdue(d.unsigned_abs()),
        0 => ReviewStatus::DueToday,
        d if d <= DUE_SOON_DAYS => ReviewStatus::DueSoon(d.unsigned_abs()),
        d => ReviewStatus::DueLater(d.unsigned_abs()),
    }
}

pub fn is_overdue(review_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    classify(review_at, now).is_overdue()
}

/// Moves overdue entries to the front.
///
/// This is a stable partition, not a sort: entries that are both overdue (or
/// both not) keep the order they came in, which is normally the store's
/// newest-first order.
pub fn rank(entries: Vec<Entry>, now: DateTime<Utc>) -> Vec<Entry> {
    let (mut overdue, rest): (Vec<Entry>, Vec<Entry>) = entries
        .into_iter()
        .partition(|entry| is_overdue(entry.review_at, now));
    overdue.extend(rest);
    overdue
}
