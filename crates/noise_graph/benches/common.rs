use std::time::Duration;

use criterion::{Criterion, Throughput};

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(3);

/// Map and cube edge lengths exercised by the builder benches.
pub const GRID_SIZES: [usize; 3] = [64, 256, 512];

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

/// Throughput in evaluated cells.
pub fn cells_throughput(cells: usize) -> Throughput {
    Throughput::Elements(cells.max(1) as u64)
}
