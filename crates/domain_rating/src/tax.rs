//! Tax cascade
//!
//! Tax lines are stored per application with the base they were originally
//! assessed on. When the taxable base changes, lines are re-assessed with a
//! two-phase rule:
//!
//! 1. The first line fixes a *reference base*. Every line stored with that
//!    same original base is linked to the taxable base and is assessed on
//!    it (rounded to 2 dp).
//! 2. Lines stored with any other base are assessed afterwards, in order, on
//!    a running total that starts at the taxable base plus the linked taxes
//!    and grows by each of these lines as it is assessed.
//!
//! The rule reproduces how stored tax amounts were derived and must not be
//! simplified; doing so changes reported amounts.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{round_money, Percentage};

/// A stored tax line for an application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRule {
    /// Tax code
    pub code: String,
    /// Base the tax was assessed on when stored
    pub original_base: Decimal,
    /// Tax rate
    pub rate_percent: Percentage,
}

impl TaxRule {
    pub fn new(code: impl Into<String>, original_base: Decimal, rate_percent: Decimal) -> Self {
        Self {
            code: code.into(),
            original_base,
            rate_percent: Percentage::from_points(rate_percent),
        }
    }
}

/// A re-assessed tax line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxLineItem {
    pub code: String,
    pub base: Decimal,
    pub rate_percent: Percentage,
    pub amount: Decimal,
}

impl TaxLineItem {
    fn assessed(rule: &TaxRule, base: Decimal) -> Self {
        Self {
            code: rule.code.clone(),
            base,
            rate_percent: rule.rate_percent,
            amount: rule.rate_percent.apply_rounded(base),
        }
    }

    fn pending(rule: &TaxRule) -> Self {
        Self {
            code: rule.code.clone(),
            base: Decimal::ZERO,
            rate_percent: rule.rate_percent,
            amount: Decimal::ZERO,
        }
    }
}

/// Tax lines and their total for one taxable base
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaxCascade {
    pub lines: Vec<TaxLineItem>,
    /// Sum of line amounts, rounded to 2 dp
    pub total: Decimal,
}

/// Applies stored tax rules to a taxable base
#[derive(Debug, Clone, Copy, Default)]
pub struct TaxCascadeCalculator;

impl TaxCascadeCalculator {
    /// Assesses `rules` on `taxable_base`
    ///
    /// Stateless: every call starts from the stored rules. Line bases of
    /// non-linked lines keep full precision; amounts are rounded to 2 dp.
    pub fn apply(&self, taxable_base: Decimal, rules: &[TaxRule]) -> TaxCascade {
        let Some(first) = rules.first() else {
            return TaxCascade::default();
        };
        let reference_base = first.original_base;
        let linked_base = round_money(taxable_base);

        let mut lines = Vec::with_capacity(rules.len());
        let mut unlinked = Vec::new();
        for (idx, rule) in rules.iter().enumerate() {
            if rule.original_base == reference_base {
                lines.push(TaxLineItem::assessed(rule, linked_base));
            } else {
                lines.push(TaxLineItem::pending(rule));
                unlinked.push(idx);
            }
        }

        let linked_total: Decimal = lines.iter().map(|l| l.amount).sum();
        let mut running_total = round_money(linked_total) + taxable_base;
        for idx in unlinked {
            let line = &mut lines[idx];
            line.base = running_total;
            line.amount = line.rate_percent.apply_rounded(running_total);
            running_total += line.amount;
        }

        let total = round_money(lines.iter().map(|l| l.amount).sum());
        TaxCascade { lines, total }
    }
}
