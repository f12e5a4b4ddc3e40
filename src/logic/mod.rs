//! Pure computations behind the pages. Nothing in here touches the network
//! or the DOM.

pub mod auth;
pub mod dashboard;
pub mod finance;
pub mod objectives;
pub mod payroll;
pub mod recurring;
