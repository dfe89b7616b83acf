//! Payroll breakdown models.
//!
//! All amounts are in the company's currency and use the same unit
//! throughout. `Decimal` keeps the arithmetic exact, so totals are compared
//! with plain equality.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A named allowance or deduction line on a payslip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollItem {
    /// Display name (e.g. "transport", "social_insurance").
    pub name: String,
    /// The amount of this line.
    pub amount: Decimal,
}

impl PayrollItem {
    /// Creates a new payroll item.
    pub fn new(name: impl Into<String>, amount: Decimal) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }
}

/// The components a payslip's gross and net salary are derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollInput {
    /// Base salary for the period.
    pub base_salary: Decimal,
    /// Total overtime pay for the period.
    pub overtime_pay: Decimal,
    /// Total allowances for the period.
    pub allowances: Decimal,
    /// Total deductions for the period.
    pub deductions: Decimal,
}

impl PayrollInput {
    /// Builds an input from itemized allowances and deductions.
    ///
    /// Each item is checked on its own so a negative line cannot hide inside
    /// a positive total.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::{PayrollInput, PayrollItem};
    /// use rust_decimal::Decimal;
    ///
    /// let input = PayrollInput::from_items(
    ///     Decimal::new(20_000_000, 0),
    ///     Decimal::new(1_500_000, 0),
    ///     &[
    ///         PayrollItem::new("transport", Decimal::new(300_000, 0)),
    ///         PayrollItem::new("meal", Decimal::new(200_000, 0)),
    ///     ],
    ///     &[PayrollItem::new("insurance", Decimal::new(2_000_000, 0))],
    /// )
    /// .unwrap();
    /// assert_eq!(input.allowances, Decimal::new(500_000, 0));
    /// assert_eq!(input.deductions, Decimal::new(2_000_000, 0));
    /// ```
    pub fn from_items(
        base_salary: Decimal,
        overtime_pay: Decimal,
        allowances: &[PayrollItem],
        deductions: &[PayrollItem],
    ) -> EngineResult<Self> {
        Ok(Self {
            base_salary,
            overtime_pay,
            allowances: sum_items("allowances", allowances)?,
            deductions: sum_items("deductions", deductions)?,
        })
    }
}

fn sum_items(kind: &str, items: &[PayrollItem]) -> EngineResult<Decimal> {
    items.iter().try_fold(Decimal::ZERO, |total, item| {
        if item.amount < Decimal::ZERO {
            return Err(EngineError::NegativeAmount {
                field: format!("{}.{}", kind, item.name),
                amount: item.amount,
            });
        }
        total
            .checked_add(item.amount)
            .ok_or_else(|| EngineError::AmountOverflow {
                field: kind.to_string(),
            })
    })
}

/// The itemized composition of a payslip's gross and net salary.
///
/// Produced by the breakdown calculation, or received from the server and
/// checked before a payslip is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollBreakdown {
    /// Base salary for the period.
    pub base_salary: Decimal,
    /// Total overtime pay for the period.
    pub overtime_pay: Decimal,
    /// Total allowances for the period.
    pub allowances: Decimal,
    /// Total deductions for the period.
    pub deductions: Decimal,
    /// Base + overtime + allowances.
    pub gross_salary: Decimal,
    /// Gross − deductions.
    pub net_salary: Decimal,
    /// ISO currency code of the amounts, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl PayrollBreakdown {
    /// Returns the components the totals were derived from.
    pub fn components(&self) -> PayrollInput {
        PayrollInput {
            base_salary: self.base_salary,
            overtime_pay: self.overtime_pay,
            allowances: self.allowances,
            deductions: self.deductions,
        }
    }
}
