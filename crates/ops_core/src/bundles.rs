//! Bundle summaries are derived by grouping NGOs on their `bundle` string.
//! There is no physical bundle table; renames and region/notes edits are bulk
//! updates across the member rows (see the service layer).

use serde::Serialize;

use crate::models::Ngo;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BundleSummary {
    pub name: String,
    pub region: Option<String>,
    pub notes: Option<String>,
    pub ngo_count: usize,
}

/// Groups NGOs by bundle tag, in first-appearance order. Conflicting
/// region/notes across members resolve to the first non-null value in
/// iteration order, not last-write-wins.
pub fn aggregate_bundles(ngos: &[Ngo]) -> Vec<BundleSummary> {
    let mut summaries: Vec<BundleSummary> = Vec::new();

    for ngo in ngos {
        let Some(bundle) = ngo.bundle.as_deref().filter(|b| !b.is_empty()) else {
            continue;
        };

        match summaries.iter_mut().find(|s| s.name == bundle) {
            Some(summary) => {
                if summary.region.is_none() {
                    summary.region = ngo.country.clone();
                }
                if summary.notes.is_none() {
                    summary.notes = ngo.notes.clone();
                }
                summary.ngo_count += 1;
            }
            None => summaries.push(BundleSummary {
                name: bundle.to_string(),
                region: ngo.country.clone(),
                notes: ngo.notes.clone(),
                ngo_count: 1,
            }),
        }
    }

    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::NgoStatus;
    use time::macros::datetime;
    use uuid::Uuid;

    fn ngo(bundle: Option<&str>, country: Option<&str>, notes: Option<&str>) -> Ngo {
        Ngo {
            id: Uuid::new_v4(),
            legal_name: "Legal".to_string(),
            common_name: "Common".to_string(),
            bundle: bundle.map(str::to_string),
            country: country.map(str::to_string),
            state: None,
            city: None,
            status: NgoStatus::Active,
            fiscal_type: None,
            notes: notes.map(str::to_string),
            coordinator_user_id: None,
            admin_user_id: None,
            created_at: datetime!(2025-01-01 00:00 UTC),
            updated_at: datetime!(2025-01-01 00:00 UTC),
        }
    }

    #[test]
    fn first_non_null_wins_for_region_and_notes() {
        let ngos = vec![
            ngo(Some("Detroit"), Some("US"), None),
            ngo(Some("Detroit"), None, Some("x")),
        ];
        let bundles = aggregate_bundles(&ngos);
        assert_eq!(bundles.len(), 1);
        assert_eq!(
            bundles[0],
            BundleSummary {
                name: "Detroit".to_string(),
                region: Some("US".to_string()),
                notes: Some("x".to_string()),
                ngo_count: 2,
            }
        );
    }

    #[test]
    fn later_values_do_not_overwrite() {
        let ngos = vec![
            ngo(Some("Lagos"), Some("NG"), Some("first")),
            ngo(Some("Lagos"), Some("GH"), Some("second")),
        ];
        let bundles = aggregate_bundles(&ngos);
        assert_eq!(bundles[0].region.as_deref(), Some("NG"));
        assert_eq!(bundles[0].notes.as_deref(), Some("first"));
    }

    #[test]
    fn unbundled_ngos_are_ignored() {
        let ngos = vec![ngo(None, Some("US"), None), ngo(Some(""), None, None)];
        assert!(aggregate_bundles(&ngos).is_empty());
    }

    #[test]
    fn groups_keep_first_appearance_order() {
        let ngos = vec![
            ngo(Some("B"), None, None),
            ngo(Some("A"), None, None),
            ngo(Some("B"), None, None),
        ];
        let bundles = aggregate_bundles(&ngos);
        assert_eq!(bundles[0].name, "B");
        assert_eq!(bundles[0].ngo_count, 2);
        assert_eq!(bundles[1].name, "A");
    }
}
