//! Commit pending buffers into a scanned container.

use super::ScanContext;
use crate::domain::errors::ScanError;
use rt_02_entity_store::{EntityKind, Identifier, Timestamp};

/// Buffers a container of `kind` drains, in drain order.
fn drained_kinds(kind: EntityKind) -> &'static [EntityKind] {
    match kind {
        EntityKind::Box => &[EntityKind::Item],
        EntityKind::Place => &[EntityKind::Item, EntityKind::Box],
        EntityKind::Order => &[EntityKind::Box],
        EntityKind::Item | EntityKind::User => &[],
    }
}

/// Link every entry of the drained buffers into `container` at `now`.
///
/// Buffers are emptied before linking. Returns the committed children in
/// commit order.
pub(super) fn commit(
    ctx: &mut ScanContext,
    container: &Identifier,
    now: Timestamp,
) -> Result<Vec<Identifier>, ScanError> {
    let mut committed = Vec::new();

    for kind in drained_kinds(container.kind()) {
        let entries = match ctx.session.pending_mut(*kind) {
            Some(buffer) => buffer.drain(),
            None => continue,
        };
        for entry in entries {
            ctx.store.link(&entry.id, container, now)?;
            committed.push(entry.id);
        }
    }

    Ok(committed)
}
