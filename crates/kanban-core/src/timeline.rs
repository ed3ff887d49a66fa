//! Activity timeline derived from the column transitions recorded on tasks.
//!
//! Derivation walks the board in column order and emits one entry per
//! recorded event, newest first. Period and column filters are plain
//! predicates over derived entries, and grouping buckets the result by
//! calendar date in the caller's reference offset.

use crate::config::TimelineConfig;
use crate::error::{KanbanError, Result};
use crate::milestone::{self, Milestone};
use crate::task::{Column, Task, TaskList};
use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// Group key for entries whose timestamp cannot be parsed.
pub const UNDATED_KEY: &str = "undated";

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Today,
    Week,
    Month,
    #[default]
    All,
}

impl Period {
    pub fn as_str(self) -> &'static str {
        match self {
            Period::Today => "today",
            Period::Week => "week",
            Period::Month => "month",
            Period::All => "all",
        }
    }

    /// Whether an instant falls inside this period as seen from `reference`.
    /// Undated entries only pass `All`.
    pub fn contains(self, at: Option<DateTime<FixedOffset>>, reference: &Reference) -> bool {
        if self == Period::All {
            return true;
        }
        let Some(at) = at else {
            return false;
        };
        let today = reference.today();
        let day = at.with_timezone(&reference.now.timezone()).date_naive();
        match self {
            Period::Today => day == today,
            Period::Week => {
                let start = reference.week_start_date();
                day >= start && day <= start + Duration::days(6)
            }
            Period::Month => day.year() == today.year() && day.month() == today.month(),
            Period::All => true,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Period {
    type Err = KanbanError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "today" => Ok(Period::Today),
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "all" => Ok(Period::All),
            other => Err(KanbanError::InvalidPeriod(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnFilter {
    #[default]
    All,
    Only(Column),
}

impl ColumnFilter {
    pub fn matches(self, column: Column) -> bool {
        match self {
            ColumnFilter::All => true,
            ColumnFilter::Only(c) => c == column,
        }
    }
}

impl std::str::FromStr for ColumnFilter {
    type Err = KanbanError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s == "all" {
            return Ok(ColumnFilter::All);
        }
        s.parse().map(ColumnFilter::Only)
    }
}

/// "Now" and calendar conventions used by the period filter and grouping.
#[derive(Debug, Clone, Copy)]
pub struct Reference {
    pub now: DateTime<FixedOffset>,
    pub week_start: Weekday,
}

impl Reference {
    pub fn new(now: DateTime<FixedOffset>, week_start: Weekday) -> Self {
        Self { now, week_start }
    }

    /// Current time in the offset and week convention of a project config.
    pub fn from_config(config: &TimelineConfig) -> Result<Self> {
        let offset = config.offset()?;
        Ok(Self::new(
            Utc::now().with_timezone(&offset),
            config.week_start.weekday(),
        ))
    }

    pub fn offset(&self) -> FixedOffset {
        self.now.timezone()
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }

    pub fn week_start_date(&self) -> NaiveDate {
        let today = self.today();
        let back = (today.weekday().num_days_from_monday() + 7
            - self.week_start.num_days_from_monday())
            % 7;
        today - Duration::days(i64::from(back))
    }
}

// ---------------------------------------------------------------------------
// Entries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct TimelineEntry<'a> {
    pub task: &'a Task,
    /// Raw timestamp as stored on the event.
    pub timestamp: &'a str,
    /// Parsed instant; `None` when the stored text is not a recognizable date.
    pub at: Option<DateTime<FixedOffset>>,
    pub coluna: Column,
    pub milestone: Option<&'a Milestone>,
}

/// Wire shape: `{taskId, descricao, timestamp, coluna, milestone?}`.
impl Serialize for TimelineEntry<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut out = serializer.serialize_struct("TimelineEntry", 5)?;
        out.serialize_field("taskId", &self.task.id())?;
        out.serialize_field("descricao", &self.task.descricao())?;
        out.serialize_field("timestamp", self.timestamp)?;
        out.serialize_field("coluna", &self.coluna)?;
        match self.milestone {
            Some(m) => out.serialize_field("milestone", m)?,
            None => out.skip_field("milestone")?,
        }
        out.end()
    }
}

/// Parse an event timestamp. RFC 3339 is the stored form. A date-time
/// without an offset is wall-clock time in `local`, and a bare date is
/// midnight UTC, which is how the browser UI reads the same strings.
pub fn parse_timestamp(raw: &str, local: FixedOffset) -> Option<DateTime<FixedOffset>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at);
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return naive.and_local_timezone(local).single();
        }
    }
    let utc = FixedOffset::east_opt(0)?;
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().with_timezone(&utc))
}

/// Newest first; undated entries sort after every dated one.
fn newest_first(a: &TimelineEntry<'_>, b: &TimelineEntry<'_>) -> Ordering {
    match (a.at, b.at) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// One entry per recorded event of every task, newest first. The sort is
/// stable, so equal timestamps keep board discovery order. `local` is the
/// offset for timestamps stored without one.
pub fn derive_timeline<'a>(
    tasks: &'a TaskList,
    milestones: &'a [Milestone],
    local: FixedOffset,
) -> Vec<TimelineEntry<'a>> {
    let mut entries: Vec<TimelineEntry<'a>> = tasks
        .iter()
        .flat_map(|(_, task)| {
            let resolved = task
                .milestone()
                .and_then(|id| milestone::resolve(&id, milestones));
            task.timeline_events().map(move |event| TimelineEntry {
                task,
                timestamp: event.timestamp,
                at: parse_timestamp(event.timestamp, local),
                coluna: event.coluna,
                milestone: resolved,
            })
        })
        .collect();
    entries.sort_by(newest_first);
    entries
}

pub fn filter_entries<'a>(
    entries: &[TimelineEntry<'a>],
    period: Period,
    column: ColumnFilter,
    reference: &Reference,
) -> Vec<TimelineEntry<'a>> {
    entries
        .iter()
        .filter(|e| column.matches(e.coluna) && period.contains(e.at, reference))
        .copied()
        .collect()
}

// ---------------------------------------------------------------------------
// Grouping
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct TimelineGroup<'a> {
    /// `yyyy-MM-dd`, or [`UNDATED_KEY`].
    pub date: String,
    pub entries: Vec<TimelineEntry<'a>>,
}

/// Bucket entries by calendar date in `offset`. Groups are newest date
/// first, the undated bucket last; entries keep their incoming order.
pub fn group_by_date<'a>(
    entries: Vec<TimelineEntry<'a>>,
    offset: FixedOffset,
) -> Vec<TimelineGroup<'a>> {
    let mut dated: BTreeMap<String, Vec<TimelineEntry<'a>>> = BTreeMap::new();
    let mut undated = Vec::new();
    for entry in entries {
        match entry.at {
            Some(at) => dated
                .entry(at.with_timezone(&offset).format("%Y-%m-%d").to_string())
                .or_default()
                .push(entry),
            None => undated.push(entry),
        }
    }
    let mut groups: Vec<TimelineGroup<'a>> = dated
        .into_iter()
        .rev()
        .map(|(date, entries)| TimelineGroup { date, entries })
        .collect();
    if !undated.is_empty() {
        groups.push(TimelineGroup {
            date: UNDATED_KEY.to_string(),
            entries: undated,
        });
    }
    groups
}

/// Derive, filter and group in one call.
pub fn build_timeline<'a>(
    tasks: &'a TaskList,
    milestones: &'a [Milestone],
    period: Period,
    column: ColumnFilter,
    reference: &Reference,
) -> Vec<TimelineGroup<'a>> {
    let derived = derive_timeline(tasks, milestones, reference.offset());
    let filtered = filter_entries(&derived, period, column, reference);
    group_by_date(filtered, reference.offset())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
