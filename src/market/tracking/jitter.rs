// SPDX-License-Identifier: MIT

use rand::Rng;

/// Offset applied by one "live location" step, in degrees
pub const DEFAULT_JITTER: f64 = 0.01;

/// Random (dlat, dlon) with each component in `[-max, max]`
pub fn random_offset(max: f64) -> (f64, f64) {
    let max = max.abs();
    if max == 0.0 {
        return (0.0, 0.0);
    }
    let mut rng = rand::rng();
    (rng.random_range(-max..=max), rng.random_range(-max..=max))
}
