//! Filtered views over the register state.
//!
//! Every view is a pure projection: it reads the directory, ledger, and
//! presence index at call time and returns display lines. Nothing here
//! mutates state, so callers refresh a view by rendering it again.

use std::fmt;

use chrono::{DateTime, Duration, Local, LocalResult, NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::register::RegisterState;
use crate::types::{PersonId, VisitRecord};

/// Wall-clock format for rendered entry and exit times (day/month/year).
pub const TIME_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// View selector for [`Registry::render`](crate::Registry::render).
///
/// A closed set: every variant has exactly one handler and unknown modes
/// cannot be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterMode {
    /// One line per open visit, in identifier order.
    CurrentlyInside,
    /// One line per person ever registered, inside or not.
    AllVisitors,
    /// Visits that entered or exited within the last hour.
    LastHour,
    /// Visits that entered or exited since local midnight.
    Today,
    /// Visits with a recorded exit.
    Departures,
    /// Every visit in the ledger.
    FullLog,
}

impl FilterMode {
    /// Parse a mode from its command token.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "inside" => Some(Self::CurrentlyInside),
            "visitors" => Some(Self::AllVisitors),
            "last-hour" => Some(Self::LastHour),
            "today" => Some(Self::Today),
            "departures" => Some(Self::Departures),
            "log" => Some(Self::FullLog),
            _ => None,
        }
    }
}

impl Default for FilterMode {
    fn default() -> Self {
        Self::FullLog
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CurrentlyInside => write!(f, "inside"),
            Self::AllVisitors => write!(f, "visitors"),
            Self::LastHour => write!(f, "last-hour"),
            Self::Today => write!(f, "today"),
            Self::Departures => write!(f, "departures"),
            Self::FullLog => write!(f, "log"),
        }
    }
}

/// Render the view selected by `mode` as of the instant `now`.
pub(crate) fn render(state: &RegisterState, mode: FilterMode, now: DateTime<Local>) -> Vec<String> {
    match mode {
        FilterMode::CurrentlyInside => currently_inside(state),
        FilterMode::AllVisitors => all_visitors(state),
        FilterMode::LastHour => window_after(state, now - Duration::hours(1)),
        FilterMode::Today => window_after(state, start_of_day(now)),
        FilterMode::Departures => departures(state),
        FilterMode::FullLog => full_log(state),
    }
}

fn currently_inside(state: &RegisterState) -> Vec<String> {
    state
        .presence
        .values()
        .filter_map(|&slot| state.ledger.get(slot))
        .map(|visit| format_visit(state, visit))
        .collect()
}

fn all_visitors(state: &RegisterState) -> Vec<String> {
    state
        .directory
        .values()
        .map(|person| format!("{} ({}) - phone: {}", person.name, person.id, person.phone))
        .collect()
}

/// Visits that entered or exited strictly after `cutoff`.
///
/// The boundary instant itself is excluded: a visit stamped exactly at the
/// cutoff does not appear.
fn window_after(state: &RegisterState, cutoff: DateTime<Local>) -> Vec<String> {
    state
        .ledger
        .iter()
        .filter(|visit| {
            visit.timestamp_in > cutoff || visit.timestamp_out.is_some_and(|out| out > cutoff)
        })
        .map(|visit| format_visit(state, visit))
        .collect()
}

fn departures(state: &RegisterState) -> Vec<String> {
    state
        .ledger
        .iter()
        .filter(|visit| !visit.is_open())
        .map(|visit| format_visit(state, visit))
        .collect()
}

fn full_log(state: &RegisterState) -> Vec<String> {
    state
        .ledger
        .iter()
        .map(|visit| format_visit(state, visit))
        .collect()
}

fn format_visit(state: &RegisterState, visit: &VisitRecord) -> String {
    let name = display_name(state, &visit.person_id);
    let entered = visit.timestamp_in.format(TIME_FORMAT);
    match visit.timestamp_out {
        Some(out) => format!(
            "{} ({}) - in: {} | out: {}",
            name,
            visit.person_id,
            entered,
            out.format(TIME_FORMAT)
        ),
        None => format!("{} ({}) - in: {}", name, visit.person_id, entered),
    }
}

/// Name stored for `id`, or the empty string when the directory has none.
fn display_name<'a>(state: &'a RegisterState, id: &PersonId) -> &'a str {
    state
        .directory
        .get(id)
        .map(|person| person.name.as_str())
        .unwrap_or("")
}

/// Local midnight of `now`'s calendar day.
fn start_of_day(now: DateTime<Local>) -> DateTime<Local> {
    let midnight = now.date_naive().and_time(NaiveTime::MIN);
    match midnight.and_local_timezone(Local) {
        LocalResult::Single(start) => start,
        LocalResult::Ambiguous(earliest, _) => earliest,
        // Midnight was skipped by a DST jump; pin it to the offset in
        // effect right now.
        LocalResult::None => now
            .offset()
            .from_local_datetime(&midnight)
            .single()
            .map(|start| start.with_timezone(&Local))
            .unwrap_or(now),
    }
}
