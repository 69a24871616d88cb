//! Document tree traversal.
//!
//! Pre-order enter, post-order leave, driven by an explicit stack so deeply
//! nested documents cannot exhaust the call stack.

use crate::error::RenderError;
use crate::node::DocumentNode;
use crate::translator::Translator;
use crate::visit::{Signal, Visit, behavior_for};

/// Walk `root` in document order, dispatching every node to its behavior.
///
/// A node whose enter step returns [`Signal::SkipChildren`] is finished at
/// once: its children and its leave step are skipped. [`Signal::Abort`]
/// stops the walk and returns the error; output produced so far is discarded
/// by the caller.
pub(crate) fn walk(tr: &mut Translator<'_>, root: &DocumentNode) -> Result<(), RenderError> {
    // `path` holds the open nodes (root first); `cursors` the index of the
    // next child to visit for each of them.
    let mut path: Vec<&DocumentNode> = Vec::new();
    let mut cursors: Vec<usize> = Vec::new();

    if enter(tr, root, &path)? {
        path.push(root);
        cursors.push(0);
    }

    while let Some(cursor) = cursors.last_mut() {
        let Some(&parent) = path.last() else {
            break;
        };
        if let Some(child) = parent.children.get(*cursor) {
            *cursor += 1;
            if enter(tr, child, &path)? {
                path.push(child);
                cursors.push(0);
            }
        } else {
            cursors.pop();
            if let Some(node) = path.pop() {
                (behavior_for(node.kind).leave)(tr, &Visit::new(node, &path));
            }
        }
    }

    Ok(())
}

/// Run the enter step of `node`; returns whether its subtree stays open.
fn enter(
    tr: &mut Translator<'_>,
    node: &DocumentNode,
    ancestors: &[&DocumentNode],
) -> Result<bool, RenderError> {
    let visit = Visit::new(node, ancestors);
    match (behavior_for(node.kind).enter)(tr, &visit) {
        Signal::Continue => Ok(true),
        Signal::SkipChildren => Ok(false),
        Signal::Abort(err) => {
            tracing::warn!(error = %err, "Rendering aborted");
            Err(err)
        }
    }
}
