//! Running-order extraction: document tree in, [`RunningOrder`] out.
//!
//! The passes compose parent to child: days are found in the whole document,
//! stages in each day's subtree, events in each stage's subtree. The first
//! failure anywhere aborts the whole extraction; a partial running order is
//! never returned.

mod extract;
pub mod nav;

use std::sync::Arc;

use chrono_tz::Tz;

use crate::dom::{self, DocumentTree};
use crate::error::{ExtractError, Level};
use crate::model::{Day, RunningOrder, Stage};

/// Extract the full running order from a parsed document tree. `year` is the
/// year the festival takes place in; `tz` its timezone.
pub async fn extract_running_order(
    year: i32,
    tz: Tz,
    tree: Arc<DocumentTree>,
) -> Result<RunningOrder, ExtractError> {
    let root = tree.root();
    let found_days = extract::days::collect(Arc::clone(&tree), root, year, tz).await?;

    // A page without a single day marker is a redesigned or unrelated page,
    // not an empty festival.
    if found_days.is_empty() {
        return Err(ExtractError::StructureMismatch(Level::Day));
    }

    let mut days = Vec::with_capacity(found_days.len());
    for found_day in found_days {
        let found_stages = extract::stages::collect(Arc::clone(&tree), found_day.node).await?;

        let mut stages = Vec::with_capacity(found_stages.len());
        for found_stage in found_stages {
            let events =
                extract::events::collect(Arc::clone(&tree), found_stage.node, found_day.start)
                    .await?;
            stages.push(Stage {
                label: found_stage.label,
                events,
            });
        }

        days.push(Day {
            label: found_day.label,
            stages,
            timestamps: Some(found_day.range),
        });
    }

    Ok(RunningOrder { days })
}

/// Parse an HTML document and extract the running order it contains.
pub async fn parse_running_order(
    year: i32,
    tz: Tz,
    html: &str,
) -> Result<RunningOrder, ExtractError> {
    let tree = Arc::new(dom::parse_document(html)?);
    extract_running_order(year, tz, tree).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timestamps::FESTIVAL_TZ;

    #[tokio::test]
    async fn marker_free_document_is_a_structure_mismatch() {
        let err = parse_running_order(
            2017,
            FESTIVAL_TZ,
            "<html><body><h1>Ticket shop</h1><p>No lineup here.</p></body></html>",
        )
        .await
        .unwrap_err();

        assert_eq!(err, ExtractError::StructureMismatch(Level::Day));
    }

    #[tokio::test]
    async fn day_with_unparseable_date_fails_the_parse() {
        let html = r#"<html><body>
            <div class="lineup_day">
              <div class="lineup_day_arrow"><span>x</span></div>
              <div class="lineup_day_date"><h2>Sometime soon</h2></div>
            </div>
        </body></html>"#;

        let err = parse_running_order(2017, FESTIVAL_TZ, html)
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::TimeFormat { .. }));
    }
}
