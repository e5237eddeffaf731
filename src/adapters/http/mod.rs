//! HTTP adapters - REST API implementations.
//!
//! Each area has its own adapter with `dto`, `handlers` and `routes`;
//! `router` assembles them with the shared middleware.

mod error;
pub mod intake;
pub mod loan;
mod router;

pub use error::{ApiError, ErrorResponse};
pub use intake::{intake_router, IntakeAppState};
pub use loan::{loan_router, LoanAppState};
pub use router::create_app;
