//! Day capacity allocation
//!
//! Greedy first-fit over one day's jobs: walk them in delivery order and keep
//! every job whose weight and volume still fit next to the jobs already kept.
//! Jobs that do not fit become addons. An addon never consumes capacity, so a
//! smaller job later in the day can still make it into the regular set.

use std::cmp::Ordering;

use crate::types::{CapacityLimit, CapacityUsage, DayAllocationResult, Job};

/// Delivery order inside a day: time window first, then creation time (FIFO).
pub fn day_order(a: &Job, b: &Job) -> Ordering {
    a.time_window
        .order()
        .cmp(&b.time_window.order())
        .then_with(|| a.created_at.cmp(&b.created_at))
}

/// Stable sort of jobs into delivery order.
pub fn sort_for_day(jobs: &mut [Job]) {
    jobs.sort_by(day_order);
}

/// Partition one day's jobs into `regular` (fits capacity) and `addon` (overflow).
///
/// Both output lists keep delivery order. `usage` sums every job of the day.
pub fn allocate_day(jobs: &[Job], limit: &CapacityLimit) -> DayAllocationResult {
    let mut sorted = jobs.to_vec();
    sort_for_day(&mut sorted);

    let mut regular = Vec::with_capacity(sorted.len());
    let mut addon = Vec::new();
    let mut running_weight = 0.0;
    let mut running_volume = 0.0;

    for job in sorted {
        let new_weight = running_weight + job.weight();
        let new_volume = running_volume + job.volume();

        if new_weight <= limit.weight && new_volume <= limit.volume {
            running_weight = new_weight;
            running_volume = new_volume;
            regular.push(job);
        } else {
            addon.push(job);
        }
    }

    let usage = CapacityUsage::of_jobs(regular.iter().chain(addon.iter()));

    DayAllocationResult {
        regular,
        addon,
        usage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{day, job, job_id};
    use crate::types::TimeWindow;

    fn ids(jobs: &[Job]) -> Vec<u128> {
        jobs.iter().map(|j| j.id.as_u128()).collect()
    }

    #[test]
    fn empty_day_allocates_nothing() {
        let result = allocate_day(&[], &CapacityLimit::new(1000.0, 10.0));

        assert!(result.regular.is_empty());
        assert!(result.addon.is_empty());
        assert_eq!(result.usage, CapacityUsage { weight: 0.0, volume: 0.0 });
    }

    #[test]
    fn second_job_overflows_weight() {
        let a = job(1, day(20), TimeWindow::Morning, 600.0, 3.0, 0);
        let b = job(2, day(20), TimeWindow::Morning, 500.0, 3.0, 1);

        let result = allocate_day(&[a, b], &CapacityLimit::new(1000.0, 10.0));

        assert_eq!(ids(&result.regular), vec![1]);
        assert_eq!(ids(&result.addon), vec![2]);
        assert_eq!(result.usage, CapacityUsage { weight: 1100.0, volume: 6.0 });
    }

    #[test]
    fn everything_overflows_when_first_job_exceeds_limit() {
        let a = job(1, day(20), TimeWindow::Morning, 600.0, 3.0, 0);
        let b = job(2, day(20), TimeWindow::Morning, 500.0, 3.0, 1);

        let result = allocate_day(&[a, b], &CapacityLimit::new(100.0, 10.0));

        assert!(result.regular.is_empty());
        assert_eq!(ids(&result.addon), vec![1, 2]);
    }

    #[test]
    fn volume_limit_also_constrains() {
        let a = job(1, day(20), TimeWindow::Morning, 10.0, 6.0, 0);
        let b = job(2, day(20), TimeWindow::Morning, 10.0, 6.0, 1);

        let result = allocate_day(&[a, b], &CapacityLimit::new(1000.0, 10.0));

        assert_eq!(ids(&result.regular), vec![1]);
        assert_eq!(ids(&result.addon), vec![2]);
    }

    #[test]
    fn smaller_later_job_fills_capacity_after_overflow() {
        let a = job(1, day(20), TimeWindow::Morning, 600.0, 1.0, 0);
        let big = job(2, day(20), TimeWindow::Morning, 900.0, 1.0, 1);
        let small = job(3, day(20), TimeWindow::Afternoon, 300.0, 1.0, 2);

        let result = allocate_day(&[a, big, small], &CapacityLimit::new(1000.0, 10.0));

        assert_eq!(ids(&result.regular), vec![1, 3]);
        assert_eq!(ids(&result.addon), vec![2]);
    }

    #[test]
    fn exact_fit_is_regular() {
        let a = job(1, day(20), TimeWindow::Morning, 400.0, 5.0, 0);
        let b = job(2, day(20), TimeWindow::Morning, 600.0, 5.0, 1);

        let result = allocate_day(&[a, b], &CapacityLimit::new(1000.0, 10.0));

        assert_eq!(ids(&result.regular), vec![1, 2]);
        assert!(result.addon.is_empty());
    }

    #[test]
    fn non_positive_limit_keeps_only_weightless_jobs() {
        let loaded = job(1, day(20), TimeWindow::Morning, 1.0, 0.5, 0);
        let empty = job(2, day(20), TimeWindow::Morning, 0.0, 0.0, 1);

        let result = allocate_day(&[loaded, empty], &CapacityLimit::new(0.0, -1.0));

        // 0 <= 0 holds for weight, but 0 <= -1 fails for volume
        assert!(result.regular.is_empty());
        assert_eq!(ids(&result.addon), vec![1, 2]);

        let zero = CapacityLimit::new(0.0, 0.0);
        let result = allocate_day(&[job(3, day(20), TimeWindow::Morning, 0.0, 0.0, 0)], &zero);
        assert_eq!(ids(&result.regular), vec![3]);
    }

    #[test]
    fn sorts_by_window_then_creation_time() {
        let late_morning = job(1, day(20), TimeWindow::Morning, 1.0, 0.1, 5);
        let afternoon = job(2, day(20), TimeWindow::Afternoon, 1.0, 0.1, 0);
        let early_morning = job(3, day(20), TimeWindow::Morning, 1.0, 0.1, 1);

        let result = allocate_day(
            &[late_morning, afternoon, early_morning],
            &CapacityLimit::new(1000.0, 10.0),
        );

        assert_eq!(ids(&result.regular), vec![3, 1, 2]);
    }

    #[test]
    fn same_window_keeps_creation_order_regardless_of_input_order() {
        let t2 = job(1, day(20), TimeWindow::Afternoon, 1.0, 0.1, 2);
        let t1 = job(2, day(20), TimeWindow::Afternoon, 1.0, 0.1, 1);

        let result = allocate_day(&[t2, t1], &CapacityLimit::new(1000.0, 10.0));

        assert_eq!(ids(&result.regular), vec![2, 1]);
    }

    #[test]
    fn bad_measures_count_as_zero() {
        let mut broken = job(1, day(20), TimeWindow::Morning, 0.0, 0.0, 0);
        broken.weight = f64::NAN;
        broken.volume = -4.0;

        let result = allocate_day(&[broken], &CapacityLimit::new(10.0, 1.0));

        assert_eq!(ids(&result.regular), vec![1]);
        assert_eq!(result.usage, CapacityUsage { weight: 0.0, volume: 0.0 });
    }

    #[test]
    fn partition_is_total_and_within_limits() {
        let limit = CapacityLimit::new(1000.0, 10.0);
        let jobs: Vec<Job> = (0..40u32)
            .map(|i| {
                let window = if i % 3 == 0 { TimeWindow::Afternoon } else { TimeWindow::Morning };
                let weight = f64::from((i * 37) % 300);
                let volume = f64::from((i * 13) % 5) * 0.7;
                job(u128::from(i) + 1, day(20), window, weight, volume, i64::from(40 - i))
            })
            .collect();

        let result = allocate_day(&jobs, &limit);

        assert_eq!(result.regular.len() + result.addon.len(), jobs.len());
        let mut all: Vec<u128> = ids(&result.regular);
        all.extend(ids(&result.addon));
        all.sort_unstable();
        let mut expected: Vec<u128> = ids(&jobs);
        expected.sort_unstable();
        assert_eq!(all, expected);

        let regular_usage = CapacityUsage::of_jobs(&result.regular);
        assert!(regular_usage.weight <= limit.weight);
        assert!(regular_usage.volume <= limit.volume);

        let total = CapacityUsage::of_jobs(&jobs);
        assert!((result.usage.weight - total.weight).abs() < 1e-9);
        assert!((result.usage.volume - total.volume).abs() < 1e-9);
    }

    #[test]
    fn allocation_is_idempotent() {
        let jobs = vec![
            job(1, day(20), TimeWindow::Afternoon, 300.0, 2.0, 3),
            job(2, day(20), TimeWindow::Morning, 800.0, 4.0, 1),
            job(3, day(20), TimeWindow::Morning, 250.0, 1.0, 2),
        ];
        let limit = CapacityLimit::new(1000.0, 10.0);

        assert_eq!(allocate_day(&jobs, &limit), allocate_day(&jobs, &limit));
    }

    #[test]
    fn removing_heaviest_addon_keeps_regular_set() {
        let jobs = vec![
            job(1, day(20), TimeWindow::Morning, 500.0, 2.0, 0),
            job(2, day(20), TimeWindow::Morning, 700.0, 2.0, 1),
            job(3, day(20), TimeWindow::Morning, 300.0, 2.0, 2),
            job(4, day(20), TimeWindow::Afternoon, 900.0, 2.0, 3),
            job(5, day(20), TimeWindow::Afternoon, 150.0, 2.0, 4),
        ];
        let limit = CapacityLimit::new(1000.0, 10.0);
        let before = allocate_day(&jobs, &limit);

        let heaviest = before
            .addon
            .iter()
            .max_by(|a, b| a.weight().total_cmp(&b.weight()))
            .map(|j| j.id)
            .unwrap();
        let remaining: Vec<Job> = jobs.into_iter().filter(|j| j.id != heaviest).collect();
        let after = allocate_day(&remaining, &limit);

        for kept in &before.regular {
            assert!(after.regular.iter().any(|j| j.id == kept.id));
        }
        assert!(after.regular.len() >= before.regular.len());
    }

    #[test]
    fn input_is_not_mutated() {
        let jobs = vec![
            job(1, day(20), TimeWindow::Afternoon, 1.0, 0.1, 0),
            job(2, day(20), TimeWindow::Morning, 1.0, 0.1, 1),
        ];
        let snapshot = jobs.clone();
        let _ = allocate_day(&jobs, &CapacityLimit::new(1000.0, 10.0));
        assert_eq!(jobs, snapshot);
        assert_eq!(job_id(1), jobs[0].id);
    }
}
