//! Domain models and operation parameters.
//!
//! Domain models are built from SeaORM entities at the repository boundary with
//! `from_entity` and converted to API DTOs with `into_dto`. Parameter types carry
//! validated input from controllers into services; their `from_dto` constructors
//! perform field validation and return `AppError::BadRequest` on failure.

pub mod achievement;
pub mod ai;
pub mod application;
pub mod course;
pub mod curriculum;
pub mod download;
pub mod enrollment;
pub mod resource;
pub mod review;
pub mod user;

/// A label with the number of records carrying it.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelCount {
    pub label: String,
    pub count: u64,
}

impl LabelCount {
    pub fn into_dto(self) -> crate::model::api::LabelCountDto {
        crate::model::api::LabelCountDto {
            label: self.label,
            count: self.count,
        }
    }
}

impl From<(String, i64)> for LabelCount {
    /// Builds from a `(label, COUNT(*))` aggregate row.
    fn from((label, count): (String, i64)) -> Self {
        Self {
            label,
            count: row_count(count),
        }
    }
}

/// Converts a SQL `COUNT` result, which databases report as a signed integer.
pub fn row_count(count: i64) -> u64 {
    u64::try_from(count).unwrap_or(0)
}

/// Tallies labels and sorts by count descending, then label ascending.
pub fn count_labels<I>(labels: I) -> Vec<LabelCount>
where
    I: IntoIterator<Item = String>,
{
    let mut counts: std::collections::HashMap<String, u64> = std::collections::HashMap::new();
    for label in labels {
        *counts.entry(label).or_insert(0) += 1;
    }

    let mut counts: Vec<LabelCount> = counts
        .into_iter()
        .map(|(label, count)| LabelCount { label, count })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    counts
}

/// Mean of the values, `None` when there are none.
pub fn average(values: &[i32]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().map(|v| *v as f64).sum::<f64>() / values.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_and_orders_labels() {
        let counts = count_labels(vec![
            "pdf".to_string(),
            "video".to_string(),
            "pdf".to_string(),
            "link".to_string(),
        ]);

        assert_eq!(counts[0].label, "pdf");
        assert_eq!(counts[0].count, 2);
        assert_eq!(counts[1].label, "link");
        assert_eq!(counts[2].label, "video");
    }

    #[test]
    fn averages_values() {
        assert_eq!(average(&[]), None);
        assert_eq!(average(&[4, 5]), Some(4.5));
    }
}
