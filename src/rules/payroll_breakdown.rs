//! Payroll breakdown arithmetic.
//!
//! Gross salary is base + overtime + allowances and net salary is gross −
//! deductions. Amounts are `Decimal`, so both identities are checked with
//! exact equality.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, AuditWarning, PayrollBreakdown, PayrollInput};

/// Rejects any negative component.
fn ensure_non_negative(input: &PayrollInput) -> EngineResult<()> {
    let components = [
        ("base_salary", input.base_salary),
        ("overtime_pay", input.overtime_pay),
        ("allowances", input.allowances),
        ("deductions", input.deductions),
    ];

    for (field, amount) in components {
        if amount < Decimal::ZERO {
            return Err(EngineError::NegativeAmount {
                field: field.to_string(),
                amount,
            });
        }
    }
    Ok(())
}

/// Gross and net for the components, or `None` on overflow.
fn derive_totals(input: &PayrollInput) -> Option<(Decimal, Decimal)> {
    let gross = input
        .base_salary
        .checked_add(input.overtime_pay)?
        .checked_add(input.allowances)?;
    let net = gross.checked_sub(input.deductions)?;
    Some((gross, net))
}

/// Computes gross and net salary from the components.
///
/// Negative components are rejected with `NegativeAmount`.
///
/// # Examples
///
/// ```
/// use attendance_engine::models::PayrollInput;
/// use attendance_engine::rules::calculate_payroll_breakdown;
/// use rust_decimal::Decimal;
///
/// let breakdown = calculate_payroll_breakdown(&PayrollInput {
///     base_salary: Decimal::new(20_000_000, 0),
///     overtime_pay: Decimal::new(1_500_000, 0),
///     allowances: Decimal::new(500_000, 0),
///     deductions: Decimal::new(2_000_000, 0),
/// })
/// .unwrap();
///
/// assert_eq!(breakdown.gross_salary, Decimal::new(22_000_000, 0));
/// assert_eq!(breakdown.net_salary, Decimal::new(20_000_000, 0));
/// ```
pub fn calculate_payroll_breakdown(input: &PayrollInput) -> EngineResult<PayrollBreakdown> {
    ensure_non_negative(input)?;

    let (gross_salary, net_salary) = derive_totals(input).ok_or_else(|| {
        EngineError::AmountOverflow {
            field: "gross_salary".to_string(),
        }
    })?;

    Ok(PayrollBreakdown {
        base_salary: input.base_salary,
        overtime_pay: input.overtime_pay,
        allowances: input.allowances,
        deductions: input.deductions,
        gross_salary,
        net_salary,
        currency: None,
    })
}

/// A stored total that disagrees with the recomputed one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollDiscrepancy {
    /// The total that disagrees ("gross_salary" or "net_salary").
    pub field: String,
    /// The value recomputed from the components.
    pub expected: Decimal,
    /// The value stored in the breakdown.
    pub actual: Decimal,
}

/// Lists every stored total that disagrees with the components.
///
/// Both totals are compared with the values recomputed from the components,
/// so a stored net that only agrees with a wrong stored gross is still
/// listed. Components too large to sum are reported as `AmountOverflow`.
pub fn find_payroll_discrepancies(
    breakdown: &PayrollBreakdown,
) -> EngineResult<Vec<PayrollDiscrepancy>> {
    let (expected_gross, expected_net) =
        derive_totals(&breakdown.components()).ok_or_else(|| EngineError::AmountOverflow {
            field: "gross_salary".to_string(),
        })?;

    let checks = [
        ("gross_salary", expected_gross, breakdown.gross_salary),
        ("net_salary", expected_net, breakdown.net_salary),
    ];

    Ok(checks
        .into_iter()
        .filter(|(_, expected, actual)| expected != actual)
        .map(|(field, expected, actual)| PayrollDiscrepancy {
            field: field.to_string(),
            expected,
            actual,
        })
        .collect())
}

/// Returns true when the stored gross and net match the components exactly.
///
/// A breakdown with a negative component is never valid.
pub fn verify_payroll_breakdown_sum(breakdown: &PayrollBreakdown) -> bool {
    ensure_non_negative(&breakdown.components()).is_ok()
        && find_payroll_discrepancies(breakdown).is_ok_and(|found| found.is_empty())
}

/// The outcome of verifying a stored payroll breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollVerification {
    /// True when both identities hold.
    pub is_valid: bool,
    /// Gross recomputed from the components.
    pub expected_gross_salary: Decimal,
    /// Net recomputed from the components.
    pub expected_net_salary: Decimal,
    /// Every stored total that disagrees.
    pub discrepancies: Vec<PayrollDiscrepancy>,
    /// Valid-but-suspicious findings, such as a negative net salary.
    pub warnings: Vec<AuditWarning>,
    /// The audit step recording this verification.
    pub audit_step: AuditStep,
}

/// Verifies a stored breakdown before it is rendered on a payslip.
///
/// Negative components are rejected with `NegativeAmount`. A negative net
/// salary is allowed by the identities but is reported as a warning.
pub fn verify_payroll(
    breakdown: &PayrollBreakdown,
    step_number: u32,
) -> EngineResult<PayrollVerification> {
    let expected = calculate_payroll_breakdown(&breakdown.components())?;
    let discrepancies = find_payroll_discrepancies(breakdown)?;
    let is_valid = discrepancies.is_empty();

    let mut warnings = Vec::new();
    if expected.net_salary < Decimal::ZERO {
        warnings.push(AuditWarning {
            code: "NEGATIVE_NET_SALARY".to_string(),
            message: format!(
                "Deductions {} exceed gross salary {}",
                breakdown.deductions, expected.gross_salary
            ),
            severity: "high".to_string(),
        });
    }

    let reasoning = if is_valid {
        format!(
            "{} + {} + {} = {}; {} - {} = {}",
            breakdown.base_salary,
            breakdown.overtime_pay,
            breakdown.allowances,
            expected.gross_salary,
            expected.gross_salary,
            breakdown.deductions,
            expected.net_salary
        )
    } else {
        discrepancies
            .iter()
            .map(|d| format!("{} is {} but should be {}", d.field, d.actual, d.expected))
            .collect::<Vec<_>>()
            .join("; ")
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "payroll_breakdown_sum".to_string(),
        rule_name: "Payroll Breakdown Sum".to_string(),
        input: serde_json::json!({
            "base_salary": breakdown.base_salary.to_string(),
            "overtime_pay": breakdown.overtime_pay.to_string(),
            "allowances": breakdown.allowances.to_string(),
            "deductions": breakdown.deductions.to_string(),
            "gross_salary": breakdown.gross_salary.to_string(),
            "net_salary": breakdown.net_salary.to_string()
        }),
        output: serde_json::json!({
            "is_valid": is_valid,
            "expected_gross_salary": expected.gross_salary.to_string(),
            "expected_net_salary": expected.net_salary.to_string()
        }),
        reasoning,
    };

    Ok(PayrollVerification {
        is_valid,
        expected_gross_salary: expected.gross_salary,
        expected_net_salary: expected.net_salary,
        discrepancies,
        warnings,
        audit_step,
    })
}
