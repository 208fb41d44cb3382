/// Maps a raw reading onto `[0, max_points]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    /// Full points at or below `ideal`, none at or above `limit`, linear between.
    InvertedLinear { ideal: f64, limit: f64 },
    /// Like `InvertedLinear`, but loses one point per band between `ideal` and
    /// `limit`. The span is split into `max_points - 1` equal bands whose upper
    /// bounds are inclusive.
    Staircase { ideal: f64, limit: f64 },
    /// Full points at `target`, falling linearly to zero at `tolerance` away.
    Deviation { target: f64, tolerance: f64 },
    /// Full points inside `[low, high]`, linear to zero at 0 and at 100.
    Band { low: f64, high: f64 },
}

impl Rule {
    pub fn points(self, value: f64, max_points: f64) -> f64 {
        if !value.is_finite() {
            return 0.0;
        }
        let points = match self {
            Rule::InvertedLinear { ideal, limit } => inverted_linear(value, ideal, limit, max_points),
            Rule::Staircase { ideal, limit } => staircase(value, ideal, limit, max_points),
            Rule::Deviation { target, tolerance } => {
                let deviation = (value - target).abs();
                if deviation >= tolerance {
                    0.0
                } else {
                    max_points - deviation * (max_points / tolerance)
                }
            }
            Rule::Band { low, high } => {
                if value < low {
                    (value / low) * max_points
                } else if value > high {
                    ((100.0 - value) / (100.0 - high)) * max_points
                } else {
                    max_points
                }
            }
        };

        points.clamp(0.0, max_points)
    }
}

pub fn inverted_linear(value: f64, ideal: f64, limit: f64, max_points: f64) -> f64 {
    if value >= limit {
        0.0
    } else if value <= ideal {
        max_points
    } else {
        ((limit - value) / (limit - ideal)) * max_points
    }
}

fn staircase(value: f64, ideal: f64, limit: f64, max_points: f64) -> f64 {
    if value >= limit {
        return 0.0;
    }
    if value <= ideal {
        return max_points;
    }

    let bands = (max_points.round() as u32).saturating_sub(1).max(1);
    let width = (limit - ideal) / f64::from(bands);
    for step in 1..bands {
        if value <= ideal + width * f64::from(step) {
            return max_points - f64::from(step);
        }
    }
    max_points - f64::from(bands)
}
