//! Property-based tests for the attendance, break and payroll rules.
//!
//! These tests use proptest to check the invariants the dashboard relies on:
//! - A displayed status recomputed from its record always agrees
//! - The late threshold is strict
//! - Overlap detection agrees with the pairwise overlap check
//! - Timeline order, sequential numbering and max-breaks gating
//! - Gross/net payroll identities
//! - Rule functions never mutate their inputs

use attendance_engine::config::AttendancePolicy;
use attendance_engine::models::{
    AttendanceRecord, AttendanceStatus, AttendanceTimes, BreakRecord, PayrollInput, TimeOfDay,
};
use attendance_engine::rules::{
    calculate_attendance_status, calculate_payroll_breakdown, can_add_new_break,
    check_time_overlap, find_overlapping_breaks, has_break_overlap, is_attendance_status_consistent,
    is_break_number_sequential, is_break_timeline_ordered, is_late, is_within_max_breaks,
    sort_breaks_by_number, status_for_record, verify_payroll_breakdown_sum,
};
use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for any minute of the day
fn time_strategy() -> impl Strategy<Value = TimeOfDay> {
    (0u16..1440).prop_map(|m| TimeOfDay::from_minutes(m).unwrap())
}

/// Strategy for grace periods up to two hours
fn policy_strategy() -> impl Strategy<Value = AttendancePolicy> {
    (0u32..120, 0u32..120).prop_map(|(late, early)| AttendancePolicy {
        late_grace_minutes: late,
        early_departure_grace_minutes: early,
    })
}

/// Strategy for parsed attendance times, punches optional
fn times_strategy() -> impl Strategy<Value = AttendanceTimes> {
    (
        time_strategy(),
        time_strategy(),
        proptest::option::of(time_strategy()),
        proptest::option::of(time_strategy()),
    )
        .prop_map(
            |(scheduled_start, scheduled_end, check_in, check_out)| AttendanceTimes {
                scheduled_start,
                scheduled_end,
                check_in,
                check_out,
            },
        )
}

/// Strategy for a completed break with a given number
fn completed_break(number: u32) -> impl Strategy<Value = BreakRecord> {
    (0u16..1380, 0u16..60).prop_map(move |(start, length)| {
        BreakRecord::completed(
            number,
            TimeOfDay::from_minutes(start).unwrap(),
            TimeOfDay::from_minutes(start + length).unwrap(),
        )
    })
}

/// Strategy for a day of completed breaks numbered 1..N
fn completed_breaks_strategy() -> impl Strategy<Value = Vec<BreakRecord>> {
    (0usize..12).prop_flat_map(|n| {
        (1..=n as u32)
            .map(completed_break)
            .collect::<Vec<_>>()
    })
}

/// Strategy for breaks with arbitrary numbers, some ongoing
fn mixed_breaks_strategy() -> impl Strategy<Value = Vec<BreakRecord>> {
    proptest::collection::vec(
        (1u32..8, time_strategy(), proptest::option::of(time_strategy())).prop_map(
            |(break_number, start_time, end_time)| BreakRecord {
                break_number,
                start_time,
                end_time,
            },
        ),
        0..10,
    )
}

/// Strategy for a shuffled 1..N sequence
fn permutation_strategy() -> impl Strategy<Value = Vec<u32>> {
    (0u32..12).prop_flat_map(|n| Just((1..=n).collect::<Vec<u32>>()).prop_shuffle())
}

/// Strategy for money amounts with two decimal places
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn breaks_numbered(numbers: &[u32]) -> Vec<BreakRecord> {
    numbers
        .iter()
        .map(|&n| {
            let start = TimeOfDay::from_minutes((n as u16 * 30) % 1400).unwrap();
            BreakRecord::ongoing(n, start)
        })
        .collect()
}

fn record_from(times: &AttendanceTimes) -> AttendanceRecord {
    AttendanceRecord {
        id: "att_prop".to_string(),
        employee_id: "emp_prop".to_string(),
        date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
        scheduled_start: times.scheduled_start.to_string(),
        scheduled_end: times.scheduled_end.to_string(),
        check_in: times.check_in.map(|t| t.to_string()),
        check_out: times.check_out.map(|t| t.to_string()),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn status_is_consistent_with_its_record(times in times_strategy(), policy in policy_strategy()) {
        let status = calculate_attendance_status(&times, &policy);
        let record = record_from(&times);

        prop_assert!(is_attendance_status_consistent(&record, &policy, status));
    }

    #[test]
    fn status_flags_match_rules(times in times_strategy(), policy in policy_strategy()) {
        let status = calculate_attendance_status(&times, &policy);

        if times.check_in.is_none() {
            prop_assert_eq!(status, AttendanceStatus::Incomplete);
        } else {
            prop_assert_eq!(status.is_late(), is_late(&times, &policy));
        }
        if times.check_out.is_none() {
            prop_assert!(!status.is_early_departure());
        }
    }

    #[test]
    fn unreadable_times_are_incomplete(
        check_in in "[0-9:apm ]{0,7}",
        policy in policy_strategy(),
    ) {
        let record = AttendanceRecord {
            id: "att_prop".to_string(),
            employee_id: "emp_prop".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            scheduled_start: "09:00".to_string(),
            scheduled_end: "18:00".to_string(),
            check_in: Some(check_in.clone()),
            check_out: Some("18:00".to_string()),
        };

        let status = status_for_record(&record, &policy);
        if TimeOfDay::parse(&check_in).is_err() {
            prop_assert_eq!(status, AttendanceStatus::Incomplete);
        }
        prop_assert!(is_attendance_status_consistent(&record, &policy, status));
    }

    #[test]
    fn late_threshold_is_strict(start in 0u16..1200, grace in 0u32..120) {
        let policy = AttendancePolicy { late_grace_minutes: grace, early_departure_grace_minutes: 0 };
        let at_threshold = start + grace as u16;
        let mut times = AttendanceTimes {
            scheduled_start: TimeOfDay::from_minutes(start).unwrap(),
            scheduled_end: TimeOfDay::from_minutes(1439).unwrap(),
            check_in: TimeOfDay::from_minutes(at_threshold),
            check_out: None,
        };
        prop_assert!(!is_late(&times, &policy));

        times.check_in = TimeOfDay::from_minutes(at_threshold + 1);
        prop_assert!(is_late(&times, &policy));
    }

    #[test]
    fn overlap_detection_agrees_with_pairwise_check(breaks in completed_breaks_strategy()) {
        let any_pair = breaks.iter().enumerate().any(|(i, a)| {
            breaks.iter().skip(i + 1).any(|b| check_time_overlap(a, b))
        });

        prop_assert_eq!(has_break_overlap(&breaks), any_pair);
        prop_assert_eq!(!find_overlapping_breaks(&breaks).is_empty(), any_pair);
    }

    #[test]
    fn every_reported_pair_overlaps(breaks in completed_breaks_strategy()) {
        for pair in find_overlapping_breaks(&breaks) {
            let a = breaks.iter().find(|b| b.break_number == pair.first).unwrap();
            let b = breaks.iter().find(|b| b.break_number == pair.second).unwrap();
            prop_assert!(check_time_overlap(a, b));
            prop_assert!(pair.first < pair.second);
        }
    }

    #[test]
    fn overlap_is_symmetric(a in completed_break(1), b in completed_break(2)) {
        prop_assert_eq!(check_time_overlap(&a, &b), check_time_overlap(&b, &a));
    }

    #[test]
    fn timeline_order_matches_sorted_starts(breaks in mixed_breaks_strategy()) {
        let sorted = sort_breaks_by_number(&breaks);
        let non_decreasing = sorted.windows(2).all(|w| w[0].start_time <= w[1].start_time);

        prop_assert_eq!(is_break_timeline_ordered(&sorted), non_decreasing);
        prop_assert_eq!(is_break_timeline_ordered(&breaks), non_decreasing);
    }

    #[test]
    fn sort_is_ordered_and_pure(breaks in mixed_breaks_strategy()) {
        let original = breaks.clone();
        let sorted = sort_breaks_by_number(&breaks);

        prop_assert_eq!(&breaks, &original);
        prop_assert_eq!(sorted.len(), breaks.len());
        prop_assert!(sorted.windows(2).all(|w| w[0].break_number <= w[1].break_number));
        prop_assert_eq!(sort_breaks_by_number(&sorted), sorted);
    }

    #[test]
    fn permutation_is_sequential(numbers in permutation_strategy()) {
        prop_assert!(is_break_number_sequential(&breaks_numbered(&numbers)));
    }

    #[test]
    fn gap_breaks_sequence(numbers in permutation_strategy(), index in any::<prop::sample::Index>()) {
        prop_assume!(!numbers.is_empty());
        let mut numbers = numbers;
        let i = index.index(numbers.len());
        numbers[i] = numbers.len() as u32 + 1;

        prop_assert!(!is_break_number_sequential(&breaks_numbered(&numbers)));
    }

    #[test]
    fn duplicate_breaks_sequence(
        numbers in permutation_strategy(),
        a in any::<prop::sample::Index>(),
        b in any::<prop::sample::Index>(),
    ) {
        prop_assume!(numbers.len() >= 2);
        let mut numbers = numbers;
        let i = a.index(numbers.len());
        let j = b.index(numbers.len());
        prop_assume!(i != j);
        numbers[i] = numbers[j];

        prop_assert!(!is_break_number_sequential(&breaks_numbered(&numbers)));
    }

    #[test]
    fn can_add_agrees_with_hypothetical_addition(
        breaks in mixed_breaks_strategy(),
        extra in completed_break(99),
        max in 0u32..12,
    ) {
        let mut with_extra = breaks.clone();
        with_extra.push(extra);

        prop_assert_eq!(can_add_new_break(&breaks, max), is_within_max_breaks(&with_extra, max));
    }

    #[test]
    fn payroll_identities_hold(
        base in amount_strategy(),
        overtime in amount_strategy(),
        allowances in amount_strategy(),
        deductions in amount_strategy(),
    ) {
        let input = PayrollInput { base_salary: base, overtime_pay: overtime, allowances, deductions };
        let breakdown = calculate_payroll_breakdown(&input).unwrap();

        prop_assert_eq!(breakdown.gross_salary, base + overtime + allowances);
        prop_assert_eq!(breakdown.net_salary, breakdown.gross_salary - deductions);
        prop_assert!(verify_payroll_breakdown_sum(&breakdown));
    }

    #[test]
    fn shifted_total_fails_verification(
        base in amount_strategy(),
        deductions in amount_strategy(),
        drift in 1i64..10_000,
    ) {
        let input = PayrollInput {
            base_salary: base,
            overtime_pay: Decimal::ZERO,
            allowances: Decimal::ZERO,
            deductions,
        };
        let mut breakdown = calculate_payroll_breakdown(&input).unwrap();
        breakdown.net_salary += Decimal::new(drift, 2);

        prop_assert!(!verify_payroll_breakdown_sum(&breakdown));
    }

    #[test]
    fn rules_are_deterministic(times in times_strategy(), policy in policy_strategy(), breaks in mixed_breaks_strategy()) {
        prop_assert_eq!(
            calculate_attendance_status(&times, &policy),
            calculate_attendance_status(&times, &policy)
        );
        prop_assert_eq!(find_overlapping_breaks(&breaks), find_overlapping_breaks(&breaks));
    }
}

#[test]
fn example_check_in_around_grace() {
    let policy = AttendancePolicy {
        late_grace_minutes: 10,
        early_departure_grace_minutes: 0,
    };
    let mut times = AttendanceTimes {
        scheduled_start: TimeOfDay::parse("09:00").unwrap(),
        scheduled_end: TimeOfDay::parse("18:00").unwrap(),
        check_in: Some(TimeOfDay::parse("09:09").unwrap()),
        check_out: None,
    };
    assert!(!is_late(&times, &policy));

    times.check_in = Some(TimeOfDay::parse("09:11").unwrap());
    assert!(is_late(&times, &policy));
}

#[test]
fn example_overlapping_breaks() {
    let t = |s: &str| TimeOfDay::parse(s).unwrap();
    let breaks = vec![
        BreakRecord::completed(1, t("10:00"), t("10:15")),
        BreakRecord::completed(2, t("10:10"), t("10:20")),
    ];
    assert!(has_break_overlap(&breaks));
}

#[test]
fn example_payroll_breakdown() {
    let breakdown = calculate_payroll_breakdown(&PayrollInput {
        base_salary: Decimal::new(20_000_000, 0),
        overtime_pay: Decimal::new(1_500_000, 0),
        allowances: Decimal::new(500_000, 0),
        deductions: Decimal::new(2_000_000, 0),
    })
    .unwrap();

    assert_eq!(breakdown.gross_salary, Decimal::new(22_000_000, 0));
    assert_eq!(breakdown.net_salary, Decimal::new(20_000_000, 0));
}
