//! The three marker-driven traversal passes over the running-order document.
//!
//! Each pass walks its subtree on a background task, streams found records
//! through a channel and reports completion or failure through the task's own
//! result. [`run_pass`] is the shared producer/consumer harness.

pub(crate) mod days;
pub(crate) mod events;
pub(crate) mod stages;

use chrono::DateTime;
use chrono_tz::Tz;
use tokio::sync::mpsc;

use crate::dom::NodeId;
use crate::error::ExtractError;
use crate::model::TimeRange;

/// A day record as found by the day pass. The node id seeds the stage pass
/// for this day and is dropped before results are surfaced to callers.
#[derive(Debug)]
pub(crate) struct FoundDay {
    pub label: String,
    pub start: DateTime<Tz>,
    pub range: TimeRange,
    pub node: NodeId,
}

/// A stage record as found by the stage pass.
#[derive(Debug)]
pub(crate) struct FoundStage {
    pub label: String,
    pub node: NodeId,
}

/// Run a traversal to completion on a background task, collecting everything
/// it emits.
///
/// The consuming select is biased towards the item channel so that a
/// completion observed on the join handle can never outrun records still
/// queued. A traversal fault travels through the task's `Result`; a panic is
/// a defect in the engine itself and is resumed here rather than converted
/// into a value.
pub(crate) async fn run_pass<T, F>(walk: F) -> Result<Vec<T>, ExtractError>
where
    T: Send + 'static,
    F: FnOnce(&mpsc::UnboundedSender<T>) -> Result<(), ExtractError> + Send + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut task = tokio::spawn(async move { walk(&tx) });

    let mut items = Vec::new();
    loop {
        tokio::select! {
            biased;

            Some(item) = rx.recv() => items.push(item),
            joined = &mut task => {
                return match joined {
                    Ok(Ok(())) => Ok(items),
                    Ok(Err(e)) => Err(e),
                    Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
                    Err(e) => unreachable!("traversal task cancelled: {e}"),
                };
            }
        }
    }
}

/// Uppercase every letter that follows a separator, leaving the rest of each
/// word untouched. Idempotent.
pub(crate) fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_separator = true;
    for c in s.chars() {
        if prev_separator {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        prev_separator = !(c.is_alphanumeric() || c == '_');
    }
    out
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::TimeZone;

    use super::*;
    use crate::dom::{parse_document, DocumentTree};
    use crate::error::Level;
    use crate::timestamps::FESTIVAL_TZ;

    fn fixture(name: &str) -> Arc<DocumentTree> {
        let html = std::fs::read_to_string(format!("tests/fixtures/{}.html", name)).unwrap();
        Arc::new(parse_document(&html).unwrap())
    }

    fn marker_free() -> Arc<DocumentTree> {
        Arc::new(parse_document("<html><body><p>see you next year</p></body></html>").unwrap())
    }

    #[tokio::test]
    async fn day_pass_finds_days_in_document_order() {
        let tree = fixture("sample");
        let days = days::collect(Arc::clone(&tree), tree.root(), 2017, FESTIVAL_TZ)
            .await
            .unwrap();

        let labels: Vec<&str> = days.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(
            labels,
            ["Saturday 22.07.", "Tuesday 25.07.", "Wednesday 26.07."]
        );

        let ranges: Vec<(i64, i64)> = days.iter().map(|d| (d.range.start, d.range.end)).collect();
        assert_eq!(
            ranges,
            [
                (1500674400, 1500760800),
                (1500933600, 1501020000),
                (1501020000, 1501106400),
            ]
        );
    }

    #[tokio::test]
    async fn stage_pass_finds_stages_in_document_order() {
        let tree = fixture("sample");
        let stages = stages::collect(Arc::clone(&tree), tree.root())
            .await
            .unwrap();

        let labels: Vec<&str> = stages.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(
            labels,
            [
                "Newforces Stage",
                "Ian Fraser “Lemmy” Kilmister Stage",
                "Boško Bursać Stage",
                "Ian Fraser “Lemmy” Kilmister Stage",
            ]
        );
    }

    #[tokio::test]
    async fn event_pass_finds_events_in_document_order() {
        let tree = fixture("sample");
        let day_start = FESTIVAL_TZ.with_ymd_and_hms(2017, 7, 22, 0, 0, 0).unwrap();
        let events = events::collect(Arc::clone(&tree), tree.root(), day_start)
            .await
            .unwrap();

        let got: Vec<(&str, &str, &str)> = events
            .iter()
            .map(|e| (e.time.as_str(), e.label.as_str(), e.url.as_str()))
            .collect();
        assert_eq!(
            got,
            [
                ("-", "Tytus", "http://www.metaldays.net/b613/tytus"),
                (
                    "-",
                    "Turbowarrior Of Steel",
                    "http://www.metaldays.net/b612/turbowarrior-of-steel",
                ),
                (
                    "22:30 - 00:00",
                    "Amon Amarth",
                    "http://www.metaldays.net/b526/amon-amarth",
                ),
                (
                    "20:45 - 22:00",
                    "Katatonia",
                    "http://www.metaldays.net/b531/katatonia",
                ),
                (
                    "00:10 - 01:20",
                    "Kadavar",
                    "http://www.metaldays.net/b539/kadavar",
                ),
                ("22:30 - 00:00", "Doro", "http://www.metaldays.net/b529/doro"),
            ]
        );

        let ranges: Vec<Option<(i64, i64)>> = events
            .iter()
            .map(|e| e.timestamps.map(|r| (r.start, r.end)))
            .collect();
        assert_eq!(
            ranges,
            [
                None,
                None,
                Some((1500755400, 1500760800)),
                Some((1500749100, 1500753600)),
                Some((1500761400, 1500765600)),
                Some((1500755400, 1500760800)),
            ]
        );
    }

    #[tokio::test]
    async fn broken_day_markup_fails_the_day_pass() {
        let tree = fixture("fail");
        let err = days::collect(Arc::clone(&tree), tree.root(), 2017, FESTIVAL_TZ)
            .await
            .unwrap_err();
        assert_eq!(err, ExtractError::StructureMismatch(Level::Day));
    }

    #[tokio::test]
    async fn broken_stage_markup_fails_the_stage_pass() {
        let tree = fixture("fail");
        let err = stages::collect(Arc::clone(&tree), tree.root())
            .await
            .unwrap_err();
        assert_eq!(err, ExtractError::StructureMismatch(Level::Stage));
    }

    #[tokio::test]
    async fn broken_event_markup_fails_the_event_pass() {
        let tree = fixture("fail");
        let day_start = FESTIVAL_TZ.with_ymd_and_hms(2017, 7, 23, 0, 0, 0).unwrap();
        let err = events::collect(Arc::clone(&tree), tree.root(), day_start)
            .await
            .unwrap_err();
        assert_eq!(err, ExtractError::StructureMismatch(Level::Event));
    }

    #[tokio::test]
    async fn passes_over_marker_free_documents_succeed_empty() {
        let tree = marker_free();
        let day_start = FESTIVAL_TZ.with_ymd_and_hms(2017, 7, 22, 0, 0, 0).unwrap();

        let days = days::collect(Arc::clone(&tree), tree.root(), 2017, FESTIVAL_TZ)
            .await
            .unwrap();
        assert!(days.is_empty());

        let stages = stages::collect(Arc::clone(&tree), tree.root())
            .await
            .unwrap();
        assert!(stages.is_empty());

        let events = events::collect(Arc::clone(&tree), tree.root(), day_start)
            .await
            .unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn title_case_uppercases_word_starts() {
        assert_eq!(title_case("turbowarrior of steel"), "Turbowarrior Of Steel");
        assert_eq!(title_case("newforces stage"), "Newforces Stage");
        assert_eq!(
            title_case("ian fraser “lemmy” kilmister stage"),
            "Ian Fraser “Lemmy” Kilmister Stage"
        );
        assert_eq!(title_case("boško bursać stage"), "Boško Bursać Stage");
    }

    #[test]
    fn title_case_is_idempotent() {
        let once = title_case("ian fraser “lemmy” kilmister stage");
        assert_eq!(title_case(&once), once);
    }

    #[test]
    fn title_case_leaves_inner_capitals_alone() {
        // Only word starts are touched; existing capitalization survives.
        assert_eq!(title_case("McDonald"), "McDonald");
        assert_eq!(title_case("NEWFORCES STAGE"), "NEWFORCES STAGE");
    }
}
