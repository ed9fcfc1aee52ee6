//! Placeholder demographics.
//!
//! The store has no gender or age columns yet. These endpoints return
//! random counts in plausible ranges so the front end has something to
//! draw; nothing here is real data.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// One bar of the gender-ratio chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenderCount {
    pub gender: String,
    pub count: u32,
}

/// One bar of the age-distribution chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeGroupCount {
    pub age_group: String,
    pub count: u32,
}

/// `(label, base, spread)`: counts fall in `base..base + spread`.
const GENDER_RANGES: &[(&str, u32, u32)] = &[("남성", 10_000, 5_000), ("여성", 10_000, 5_000)];

const AGE_RANGES: &[(&str, u32, u32)] = &[
    ("10대", 500, 1_000),
    ("20대", 1_500, 2_000),
    ("30대", 2_000, 2_500),
    ("40대", 1_800, 2_000),
    ("50대", 1_200, 1_500),
    ("60대 이상", 800, 1_000),
];

/// Random gender counts from the thread-local generator.
pub fn gender_ratio() -> Vec<GenderCount> {
    gender_ratio_with(&mut rand::rng())
}

/// Random age-group counts from the thread-local generator.
pub fn age_distribution() -> Vec<AgeGroupCount> {
    age_distribution_with(&mut rand::rng())
}

pub fn gender_ratio_with<R: Rng + ?Sized>(rng: &mut R) -> Vec<GenderCount> {
    GENDER_RANGES
        .iter()
        .map(|&(gender, base, spread)| GenderCount {
            gender: gender.to_string(),
            count: base + rng.random_range(0..spread),
        })
        .collect()
}

pub fn age_distribution_with<R: Rng + ?Sized>(rng: &mut R) -> Vec<AgeGroupCount> {
    AGE_RANGES
        .iter()
        .map(|&(age_group, base, spread)| AgeGroupCount {
            age_group: age_group.to_string(),
            count: base + rng.random_range(0..spread),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn gender_counts_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let data = gender_ratio_with(&mut rng);
            assert_eq!(data.len(), 2);
            for entry in data {
                assert!((10_000..15_000).contains(&entry.count), "{entry:?}");
            }
        }
    }

    #[test]
    fn age_groups_are_ordered_and_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let data = age_distribution_with(&mut rng);
        let labels: Vec<&str> = data.iter().map(|d| d.age_group.as_str()).collect();
        assert_eq!(labels, vec!["10대", "20대", "30대", "40대", "50대", "60대 이상"]);
        for (entry, (_, base, spread)) in data.iter().zip(AGE_RANGES) {
            assert!(entry.count >= *base && entry.count < base + spread);
        }
    }
}
