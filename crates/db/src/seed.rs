use studiosync_core::{errors::ScheduleResult, models::defaults::default_schedule};
use tracing::info;

use crate::store::ScheduleStore;

/// Fills an empty store with the studio's default week. A store that already
/// holds slots is left alone. Returns the number of slots inserted.
pub async fn seed_default_schedule(store: &dyn ScheduleStore) -> ScheduleResult<usize> {
    let existing = store.count().await?;
    if existing > 0 {
        info!("Store already holds {} time slots, skipping seed", existing);
        return Ok(0);
    }

    let defaults = default_schedule();
    for slot in &defaults {
        store.insert(slot).await?;
    }

    info!("Seeded {} default time slots", defaults.len());
    Ok(defaults.len())
}
