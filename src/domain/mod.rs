//! Domain types for the pricing engine: form states, rate tables, derived
//! results, and the cross-cutting override/frequency machinery.

pub mod forms;
pub mod frequency;
pub mod legacy;
pub mod money;
pub mod overrides;
pub mod rates;
pub mod results;
pub mod service;

pub use forms::AgreementForm;
pub use frequency::Frequency;
pub use rates::RateBook;
pub use results::{AggregatedQuote, CalculationResult, Classification};
pub use service::ServiceKind;
