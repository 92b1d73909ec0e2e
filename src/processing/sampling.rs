/// Deterministic, order-preserving subsample of at most `max_points` items.
///
/// Items are picked at evenly spaced positions across the input so the sample keeps the
/// spatial spread of a feed that is ordered by distance or station. The same input always
/// yields the same sample.
pub fn sample_evenly<T: Clone>(items: &[T], max_points: usize) -> Vec<T> {
    if items.len() <= max_points {
        return items.to_vec();
    }
    let step = items.len() as f64 / max_points as f64;
    (0..max_points)
        .map(|i| items[(i as f64 * step) as usize].clone())
        .collect()
}
