//! Overview reporting: in-memory reductions over already-fetched rows.
//! Nothing is materialized; every load recomputes from scratch.

use serde::Serialize;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::models::{Ngo, WorkItem};
use crate::status::Module;

pub const DEFAULT_TRAILING_MONTHS: u32 = 12;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MonthlyActivity {
    /// "YYYY-MM"
    pub month: String,
    pub created: usize,
    pub completed: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ModuleLoad {
    pub module: Module,
    pub label: &'static str,
    pub open: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NgoHealth {
    pub ngo_id: Uuid,
    pub name: String,
    pub open: usize,
    pub overdue: usize,
    pub missing_evidence: usize,
}

fn previous_month(year: i32, month: u8) -> (i32, u8) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

fn month_key(at: OffsetDateTime) -> (i32, u8) {
    (at.year(), at.month() as u8)
}

/// Created/completed counts per month over a trailing window ending at `now`,
/// oldest month first.
pub fn monthly_activity(items: &[WorkItem], now: OffsetDateTime, months: u32) -> Vec<MonthlyActivity> {
    let months = months.max(1);
    let mut keys = Vec::with_capacity(months as usize);
    let (mut year, mut month) = month_key(now);
    for _ in 0..months {
        keys.push((year, month));
        (year, month) = previous_month(year, month);
    }
    keys.reverse();

    keys.into_iter()
        .map(|key| MonthlyActivity {
            month: format!("{:04}-{:02}", key.0, key.1),
            created: items
                .iter()
                .filter(|it| month_key(it.created_at) == key)
                .count(),
            completed: items
                .iter()
                .filter(|it| it.completed_at.is_some_and(|at| month_key(at) == key))
                .count(),
        })
        .collect()
}

/// Open-item counts bucketed by module label; modules with nothing open are
/// omitted.
pub fn open_by_module(items: &[WorkItem]) -> Vec<ModuleLoad> {
    Module::ALL
        .iter()
        .filter_map(|&module| {
            let open = items
                .iter()
                .filter(|it| it.module == module && it.is_open())
                .count();
            (open > 0).then_some(ModuleLoad {
                module,
                label: module.label(),
                open,
            })
        })
        .collect()
}

/// Per-NGO snapshot of open/overdue/missing-evidence counts, in the order the
/// NGO rows were fetched.
pub fn ngo_health(ngos: &[Ngo], items: &[WorkItem], today: Date) -> Vec<NgoHealth> {
    ngos.iter()
        .map(|ngo| {
            let owned = items.iter().filter(|it| it.ngo_id == Some(ngo.id));
            let mut health = NgoHealth {
                ngo_id: ngo.id,
                name: ngo.common_name.clone(),
                open: 0,
                overdue: 0,
                missing_evidence: 0,
            };
            for item in owned {
                if item.is_open() {
                    health.open += 1;
                }
                if item.is_overdue(today) {
                    health.overdue += 1;
                }
                if item.is_missing_evidence() {
                    health.missing_evidence += 1;
                }
            }
            health
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::{EvidenceStatus, NgoStatus, Priority, WorkItemStatus};
    use time::macros::{date, datetime};

    fn item(
        module: Module,
        status: WorkItemStatus,
        created_at: OffsetDateTime,
        completed_at: Option<OffsetDateTime>,
    ) -> WorkItem {
        WorkItem {
            id: Uuid::new_v4(),
            title: "t".to_string(),
            description: None,
            module,
            status,
            priority: Priority::Medium,
            item_type: None,
            ngo_id: None,
            department_id: None,
            owner_user_id: None,
            created_by_user_id: None,
            approver_user_id: None,
            due_date: None,
            completed_at,
            evidence_required: false,
            evidence_status: EvidenceStatus::Missing,
            approval_required: false,
            external_visible: false,
            created_at,
            updated_at: created_at,
        }
    }

    #[test]
    fn monthly_window_spans_year_boundaries() {
        let now = datetime!(2025-02-15 12:00 UTC);
        let items = vec![
            item(
                Module::Finance,
                WorkItemStatus::InProgress,
                datetime!(2024-12-03 00:00 UTC),
                None,
            ),
            item(
                Module::Finance,
                WorkItemStatus::Complete,
                datetime!(2025-01-10 00:00 UTC),
                Some(datetime!(2025-02-01 00:00 UTC)),
            ),
        ];
        let rows = monthly_activity(&items, now, 3);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].month, "2024-12");
        assert_eq!(rows[0].created, 1);
        assert_eq!(rows[1].month, "2025-01");
        assert_eq!(rows[1].created, 1);
        assert_eq!(rows[2].month, "2025-02");
        assert_eq!(rows[2].completed, 1);
    }

    #[test]
    fn activity_outside_the_window_is_dropped() {
        let now = datetime!(2025-06-01 00:00 UTC);
        let items = vec![item(
            Module::It,
            WorkItemStatus::InProgress,
            datetime!(2023-06-01 00:00 UTC),
            None,
        )];
        let rows = monthly_activity(&items, now, DEFAULT_TRAILING_MONTHS);
        assert_eq!(rows.len(), 12);
        assert!(rows.iter().all(|r| r.created == 0 && r.completed == 0));
    }

    #[test]
    fn module_buckets_count_only_open_items() {
        let at = datetime!(2025-05-01 00:00 UTC);
        let items = vec![
            item(Module::Hr, WorkItemStatus::InProgress, at, None),
            item(Module::Hr, WorkItemStatus::Complete, at, Some(at)),
            item(Module::It, WorkItemStatus::Canceled, at, None),
        ];
        let buckets = open_by_module(&items);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].label, "HR");
        assert_eq!(buckets[0].open, 1);
    }

    #[test]
    fn ngo_health_counts_are_scoped_per_ngo() {
        let at = datetime!(2025-05-01 00:00 UTC);
        let today = date!(2025 - 05 - 20);
        let ngo = Ngo {
            id: Uuid::new_v4(),
            legal_name: "L".to_string(),
            common_name: "Hope Center".to_string(),
            bundle: None,
            country: None,
            state: None,
            city: None,
            status: NgoStatus::Active,
            fiscal_type: None,
            notes: None,
            coordinator_user_id: None,
            admin_user_id: None,
            created_at: at,
            updated_at: at,
        };

        let mut overdue = item(Module::Finance, WorkItemStatus::InProgress, at, None);
        overdue.ngo_id = Some(ngo.id);
        overdue.due_date = Some(date!(2025 - 05 - 10));

        let mut needs_evidence = item(Module::Finance, WorkItemStatus::Submitted, at, None);
        needs_evidence.ngo_id = Some(ngo.id);
        needs_evidence.evidence_required = true;

        let unrelated = item(Module::Finance, WorkItemStatus::InProgress, at, None);

        let health = ngo_health(&[ngo], &[overdue, needs_evidence, unrelated], today);
        assert_eq!(health.len(), 1);
        assert_eq!(health[0].open, 2);
        assert_eq!(health[0].overdue, 1);
        assert_eq!(health[0].missing_evidence, 1);
    }
}
