//! Installment financing surcharge
//!
//! Paying in installments adds a financing surcharge to the taxable base.
//! The percentage depends only on the number of installments.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::Percentage;

/// Installment counts with a surcharge, and the surcharge in points
pub static INSTALLMENT_SURCHARGES: [(u32, Decimal); 5] = [
    (1, dec!(0.0)),
    (3, dec!(10.07)),
    (6, dec!(15.37)),
    (9, dec!(20.47)),
    (12, dec!(25.87)),
];

/// Lookup of the financing surcharge by installment count
#[derive(Debug, Clone, Copy, Default)]
pub struct InstallmentSurchargeTable;

impl InstallmentSurchargeTable {
    /// Returns the surcharge for an installment count
    ///
    /// Absent or unlisted counts carry no surcharge.
    pub fn percent_for(&self, installment_count: Option<u32>) -> Percentage {
        installment_count
            .and_then(|count| {
                INSTALLMENT_SURCHARGES
                    .iter()
                    .find(|(listed, _)| *listed == count)
            })
            .map(|(_, points)| Percentage::from_points(*points))
            .unwrap_or(Percentage::ZERO)
    }

    /// Installment counts offered to customers
    pub fn offered_counts(&self) -> impl Iterator<Item = u32> {
        INSTALLMENT_SURCHARGES.iter().map(|(count, _)| *count)
    }
}
