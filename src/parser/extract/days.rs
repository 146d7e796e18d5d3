use std::sync::Arc;

use chrono_tz::Tz;
use tokio::sync::mpsc;

use crate::dom::{DocumentTree, NodeId};
use crate::error::{ExtractError, Level};
use crate::parser::nav::{has_attribute_value, Cursor};
use crate::timestamps::{resolve_day_range, resolve_day_start};

use super::{run_pass, FoundDay};

const MARKER_CLASS: &str = "lineup_day";

/// Collect every day under `root`, in document order. `year` anchors the
/// partial date labels.
pub(crate) async fn collect(
    tree: Arc<DocumentTree>,
    root: NodeId,
    year: i32,
    tz: Tz,
) -> Result<Vec<FoundDay>, ExtractError> {
    run_pass(move |tx| walk(&tree, root, year, tz, tx)).await
}

fn walk(
    tree: &DocumentTree,
    id: NodeId,
    year: i32,
    tz: Tz,
    tx: &mpsc::UnboundedSender<FoundDay>,
) -> Result<(), ExtractError> {
    if tree.is_element(id) && has_attribute_value(tree.attrs(id), "class", MARKER_CLASS) {
        let date_node = Cursor::new(tree, id)
            .first_non_empty_child()
            .next_non_empty_sibling()
            .first_non_empty_child()
            .first_non_empty_child()
            .get()
            .ok_or(ExtractError::StructureMismatch(Level::Day))?;

        // The source puts a stray space behind each date separator.
        let label = tree.data(date_node).replace(". ", ".").trim().to_string();

        let start = resolve_day_start(year, tz, &label)?;
        let range = resolve_day_range(year, tz, &label)?;

        let _ = tx.send(FoundDay {
            label,
            start,
            range,
            node: id,
        });
        return Ok(());
    }

    let mut child = tree.first_child(id);
    while let Some(c) = child {
        walk(tree, c, year, tz, tx)?;
        child = tree.next_sibling(c);
    }
    Ok(())
}
