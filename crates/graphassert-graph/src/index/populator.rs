//! Background population of newly created indexes.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use graphassert_core::{IndexDefinition, IndexState};
use graphassert_storage::{StorageEngine, Transaction};
use tracing::{info, warn};

use super::property::PropertyIndex;
use super::registry::IndexRegistry;
use crate::store::{GraphResult, NodeStore};

/// Start building `index` on a dedicated thread.
///
/// The index is marked populating before this returns. The thread waits
/// `delay`, indexes every existing node carrying the label in one write
/// transaction, then marks the index online, or failed if the build
/// errored.
pub(crate) fn spawn<E>(
    engine: Arc<E>,
    registry: Arc<IndexRegistry>,
    index: IndexDefinition,
    delay: Duration,
) -> GraphResult<()>
where
    E: StorageEngine + 'static,
{
    registry.set(index.id, IndexState::Populating)?;

    let worker_registry = Arc::clone(&registry);
    let worker_index = index.clone();
    let spawned = thread::Builder::new()
        .name(format!("index-populator-{}", index.id.as_u64()))
        .spawn(move || run(engine.as_ref(), &worker_registry, &worker_index, delay));

    if let Err(e) = spawned {
        warn!(index = %index, error = %e, "failed to start index populator");
        registry.set(index.id, IndexState::Failed(format!("populator did not start: {e}")))?;
    }
    Ok(())
}

fn run<E: StorageEngine>(
    engine: &E,
    registry: &IndexRegistry,
    index: &IndexDefinition,
    delay: Duration,
) {
    if !delay.is_zero() {
        thread::sleep(delay);
    }

    info!(index = %index, "populating index");
    let state = match populate(engine, index) {
        Ok(entries) => {
            info!(index = %index, entries, "index online");
            IndexState::Online
        }
        Err(e) => {
            warn!(index = %index, error = %e, "index population failed");
            IndexState::Failed(e.to_string())
        }
    };

    if let Err(e) = registry.set(index.id, state) {
        warn!(index = %index, error = %e, "could not publish index state");
    }
}

fn populate<E: StorageEngine>(engine: &E, index: &IndexDefinition) -> GraphResult<usize> {
    let mut tx = engine.begin_write()?;
    let mut entries = 0;
    for node in NodeStore::nodes_with_label(&tx, &index.label)? {
        if PropertyIndex::add(&mut tx, index, &node)? {
            entries += 1;
        }
    }
    tx.commit()?;
    Ok(entries)
}
