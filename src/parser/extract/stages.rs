use std::sync::Arc;

use tokio::sync::mpsc;

use crate::dom::{DocumentTree, NodeId};
use crate::error::{ExtractError, Level};
use crate::parser::nav::{has_attribute_value, Cursor};

use super::{run_pass, title_case, FoundStage};

const MARKER_CLASS: &str = "lineup_stage";

/// Collect every stage under `root`, in document order. To get the stages of
/// a single day, pass that day's node.
pub(crate) async fn collect(
    tree: Arc<DocumentTree>,
    root: NodeId,
) -> Result<Vec<FoundStage>, ExtractError> {
    run_pass(move |tx| walk(&tree, root, tx)).await
}

fn walk(
    tree: &DocumentTree,
    id: NodeId,
    tx: &mpsc::UnboundedSender<FoundStage>,
) -> Result<(), ExtractError> {
    if tree.is_element(id) && has_attribute_value(tree.attrs(id), "class", MARKER_CLASS) {
        let name_node = Cursor::new(tree, id)
            .first_non_empty_child()
            .first_non_empty_child()
            .next_non_empty_sibling()
            .first_non_empty_child()
            .get()
            .ok_or(ExtractError::StructureMismatch(Level::Stage))?;

        let label = title_case(tree.data(name_node).trim());

        let _ = tx.send(FoundStage { label, node: id });
        return Ok(());
    }

    let mut child = tree.first_child(id);
    while let Some(c) = child {
        walk(tree, c, tx)?;
        child = tree.next_sibling(c);
    }
    Ok(())
}
