use crate::types::observation::{Observation, RawObservation};
use log::{info, warn};

/// Validates a batch of raw rows, dropping those without a usable location.
///
/// Rejected rows are logged individually at `warn` and never abort the batch.
pub fn clean_observations<I>(raws: I) -> Vec<Observation>
where
    I: IntoIterator<Item = RawObservation>,
{
    let mut received = 0usize;
    let cleaned: Vec<Observation> = raws
        .into_iter()
        .inspect(|_| received += 1)
        .filter_map(|raw| {
            Observation::try_from(raw)
                .map_err(|e| warn!("Dropping observation: {}", e))
                .ok()
        })
        .collect();

    if cleaned.len() < received {
        info!(
            "Kept {} of {} observations ({} without a valid location)",
            cleaned.len(),
            received,
            received - cleaned.len()
        );
    }
    cleaned
}
