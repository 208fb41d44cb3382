use super::rules::Rule;
use crate::types::scoring::Category;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    /// Slug-derived sensor `sensor.<slug>_<suffix>`, or `default` when unresolved.
    Sensor { suffix: &'static str, default: f64 },
    Temperature,
    Humidity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weighting {
    Full,
    /// Consecutive averaged categories form one group whose mean is summed.
    Averaged,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategorySpec {
    pub category: Category,
    pub input: Input,
    pub rule: Rule,
    pub max_points: f64,
    pub weighting: Weighting,
}

const fn sensor(
    category: Category,
    suffix: &'static str,
    default: f64,
    ideal: f64,
    limit: f64,
    max_points: f64,
) -> CategorySpec {
    CategorySpec {
        category,
        input: Input::Sensor { suffix, default },
        rule: Rule::InvertedLinear { ideal, limit },
        max_points,
        weighting: Weighting::Full,
    }
}

const fn averaged(spec: CategorySpec) -> CategorySpec {
    CategorySpec {
        weighting: Weighting::Averaged,
        ..spec
    }
}

/// Scoring table in summation order.
pub const CATEGORIES: [CategorySpec; 16] = [
    sensor(Category::Co2, "co2", 4500.0, 800.0, 2000.0, 20.0),
    sensor(
        Category::Pm2_5,
        "pm_2_5_m_weight_concentration",
        225.4,
        5.0,
        75.0,
        18.0,
    ),
    CategorySpec {
        category: Category::Voc,
        input: Input::Sensor {
            suffix: "sen55_voc",
            default: 500.0,
        },
        rule: Rule::Staircase {
            ideal: 10.0,
            limit: 100.0,
        },
        max_points: 10.0,
        weighting: Weighting::Full,
    },
    sensor(Category::Ammonia, "ammonia", 50.0, 1.0, 50.0, 3.0),
    sensor(Category::CarbonMonoxide, "carbon_monoxide", 10.0, 1.0, 10.0, 15.0),
    CategorySpec {
        category: Category::Pressure,
        input: Input::Sensor {
            suffix: "dps310_pressure",
            default: 1013.0,
        },
        rule: Rule::Deviation {
            target: 1013.0,
            tolerance: 10.0,
        },
        max_points: 1.0,
        weighting: Weighting::Full,
    },
    sensor(Category::Ethanol, "ethanol", 100.0, 1.0, 100.0, 1.0),
    sensor(Category::Hydrogen, "hydrogen", 10.0, 1.0, 10.0, 1.0),
    sensor(Category::Methane, "methane", 1000.0, 1.0, 1000.0, 2.0),
    sensor(Category::NitrogenDioxide, "nitrogen_dioxide", 1.0, 0.1, 1.0, 5.0),
    averaged(sensor(
        Category::Pm10,
        "pm_10_m_weight_concentration",
        50.0,
        10.0,
        50.0,
        5.0,
    )),
    averaged(sensor(
        Category::Pm1,
        "pm_1_m_weight_concentration",
        10.0,
        1.0,
        10.0,
        6.0,
    )),
    averaged(sensor(
        Category::Pm4,
        "pm_4_m_weight_concentration",
        25.0,
        5.0,
        25.0,
        6.0,
    )),
    sensor(Category::NoxIndex, "sen55_nox", 1.0, 1.0, 50.0, 10.0),
    CategorySpec {
        category: Category::Temperature,
        input: Input::Temperature,
        rule: Rule::Deviation {
            target: 23.0,
            tolerance: 10.0,
        },
        max_points: 7.0,
        weighting: Weighting::Full,
    },
    CategorySpec {
        category: Category::Humidity,
        input: Input::Humidity,
        rule: Rule::Band {
            low: 30.0,
            high: 60.0,
        },
        max_points: 8.0,
        weighting: Weighting::Full,
    },
];

/// Sums points in table order, replacing each run of averaged categories by
/// its mean at the position where the run ends.
pub fn aggregate<I>(items: I) -> f64
where
    I: IntoIterator<Item = (Weighting, f64)>,
{
    let mut total = 0.0;
    let mut group_sum = 0.0;
    let mut group_len = 0u32;

    for (weighting, points) in items {
        match weighting {
            Weighting::Averaged => {
                group_sum += points;
                group_len += 1;
            }
            Weighting::Full => {
                if group_len > 0 {
                    total += group_sum / f64::from(group_len);
                    group_sum = 0.0;
                    group_len = 0;
                }
                total += points;
            }
        }
    }
    if group_len > 0 {
        total += group_sum / f64::from(group_len);
    }
    total
}

/// Normalization ceiling.
///
/// Every category counts its full allocation, and each averaged group adds
/// the mean of its members' allocations on top. A perfect set of readings
/// therefore tops out below 100.
pub fn max_total() -> f64 {
    let full: f64 = CATEGORIES.iter().map(|spec| spec.max_points).sum();
    let grouped = aggregate(
        CATEGORIES
            .iter()
            .map(|spec| match spec.weighting {
                Weighting::Averaged => (Weighting::Averaged, spec.max_points),
                Weighting::Full => (Weighting::Full, 0.0),
            }),
    );
    full + grouped
}
