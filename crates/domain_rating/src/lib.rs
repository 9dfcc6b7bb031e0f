//! Premium Re-rating Domain
//!
//! Given a target premium for an existing policy application, this crate
//! finds the insurance rate that reproduces it and recomputes every premium
//! component at that rate.
//!
//! # Premium breakdown
//!
//! ```text
//! tariff premium        rate * sum insured / 1000 / 365 * days
//! - bonification
//! + admin surcharge     15% of tariff
//! + emission fee        schedule lookup on tariff
//! = taxable base        (matched against the target, with taxes)
//! + financial surcharge installment percentage of taxable base
//! + taxes               two-phase cascade over the stored tax lines
//! = final premium
//! ```
//!
//! # Examples
//!
//! ```rust
//! use domain_rating::{
//!     DerechoScheduleEntry, DerechoScheduleResolver, PolicyBaseData, PremiumQuoteEngine,
//!     QuoteRequest, TaxRule,
//! };
//! use core_kernel::ApplicationId;
//! use rust_decimal_macros::dec;
//!
//! let schedule = DerechoScheduleResolver::new(vec![
//!     DerechoScheduleEntry::new(dec!(0), dec!(10)),
//!     DerechoScheduleEntry::new(dec!(1000), dec!(20)),
//! ])
//! .unwrap();
//! let policy = PolicyBaseData::new(dec!(10), dec!(100000));
//! let rules = vec![TaxRule::new("IVA", dec!(500), dec!(10))];
//! let request = QuoteRequest::new(ApplicationId::new(151547), dec!(3000), 365);
//!
//! let quote = PremiumQuoteEngine::new()
//!     .compute_quote(&request, &policy, &rules, &schedule)
//!     .unwrap();
//! assert!(quote.converged);
//! assert!((quote.final_premium - dec!(3000)).abs() <= dec!(0.01));
//! ```

pub mod derecho;
pub mod engine;
pub mod error;
pub mod installments;
pub mod limits;
pub mod policy;
pub mod ports;
pub mod quote;
pub mod services;
pub mod solver;
pub mod tax;

pub use derecho::{DerechoScheduleEntry, DerechoScheduleResolver, FeeResolver, FlatFee};
pub use engine::PremiumQuoteEngine;
pub use error::RatingError;
pub use installments::{InstallmentSurchargeTable, INSTALLMENT_SURCHARGES};
pub use limits::{check_quote_inputs, MAX_AMOUNT, MAX_COVERAGE_DAYS};
pub use policy::{
    rating_admin_percent, rating_bonification, PolicyBaseData, StoredQuote, ADMIN_SURCHARGE_POINTS,
};
pub use ports::{DerechoScheduleProvider, PolicyDataProvider, TaxRuleProvider};
pub use quote::{PremiumType, QuoteRequest, QuoteResult};
pub use services::{load_schedule_resolver, QuoteService};
pub use solver::{Evaluation, RateBisectionSolver, SolverInput, SolverOutcome};
pub use tax::{TaxCascade, TaxCascadeCalculator, TaxLineItem, TaxRule};
