use std::sync::Arc;

use chrono::DateTime;
use chrono_tz::Tz;
use tokio::sync::mpsc;

use crate::dom::{DocumentTree, NodeId};
use crate::error::{ExtractError, Level};
use crate::model::Event;
use crate::parser::nav::{attribute_value, has_attribute_value, Cursor};
use crate::timestamps::resolve_event_range;

use super::{run_pass, title_case};

const MARKER_CLASS: &str = "band_lineup";
const TIME_CLASS: &str = "time";

/// Collect every event under `root`, in document order. To get the events of
/// a single stage, pass that stage's node. `day_start` is the start instant
/// of the day the events belong to.
pub(crate) async fn collect(
    tree: Arc<DocumentTree>,
    root: NodeId,
    day_start: DateTime<Tz>,
) -> Result<Vec<Event>, ExtractError> {
    run_pass(move |tx| walk(&tree, root, day_start, tx)).await
}

fn walk(
    tree: &DocumentTree,
    id: NodeId,
    day_start: DateTime<Tz>,
    tx: &mpsc::UnboundedSender<Event>,
) -> Result<(), ExtractError> {
    if tree.is_element(id) && has_attribute_value(tree.attrs(id), "class", MARKER_CLASS) {
        let base = Cursor::new(tree, id);

        let mut time_cell = base.first_non_empty_child().next_non_empty_sibling();
        let mut name_cell = base
            .first_non_empty_child()
            .next_non_empty_sibling()
            .next_non_empty_sibling();

        // Some stages lack the "time" wrapper; there the first child is the
        // time cell itself and the name follows it.
        let wrapped = time_cell
            .get()
            .is_some_and(|t| has_attribute_value(tree.attrs(t), "class", TIME_CLASS));
        if !wrapped {
            time_cell = base.first_non_empty_child();
            name_cell = base.first_non_empty_child().next_non_empty_sibling();
        }

        let time_node = time_cell.first_non_empty_child().get();
        let name_node = name_cell.first_non_empty_child().get();
        let (Some(time_node), Some(name_node)) = (time_node, name_node) else {
            return Err(ExtractError::StructureMismatch(Level::Event));
        };

        let time = tree.data(time_node).trim().to_string();
        let label = title_case(&tree.data(name_node).trim().to_lowercase());
        let url = attribute_value(tree.attrs(id), "href").to_string();

        let timestamps = resolve_event_range(day_start, &time)?;

        let _ = tx.send(Event {
            time,
            timestamps,
            label,
            url,
        });
        return Ok(());
    }

    let mut child = tree.first_child(id);
    while let Some(c) = child {
        walk(tree, c, day_start, tx)?;
        child = tree.next_sibling(c);
    }
    Ok(())
}
