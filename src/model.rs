use serde::{Deserialize, Serialize};

/// Start and end of a time span as unix timestamps, interpreted in the
/// festival timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: i64,
    pub end: i64,
}

/// A single performance slot, normally a band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Raw time label, e.g. "22:30 - 00:00" or the unscheduled sentinel "-".
    pub time: String,
    /// Absent iff the time label is the "-" sentinel.
    pub timestamps: Option<TimeRange>,
    /// Title-cased band name.
    pub label: String,
    /// Link to additional information about the event. May be empty.
    pub url: String,
}

/// A stage and the events taking place on it, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    pub label: String,
    pub events: Vec<Event>,
}

/// A festival day and the stages active on it, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Day {
    /// String representation of the date, e.g. "Saturday 22.07.".
    pub label: String,
    pub stages: Vec<Stage>,
    pub timestamps: Option<TimeRange>,
}

/// The full running order. Root of the extracted schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningOrder {
    pub days: Vec<Day>,
}
