//! Vacation request lifecycle service.
//!
//! Employees with the `Requester` role submit leave requests identified by
//! their email and a calendar date range; `Validator`s approve or reject
//! them. The library holds the domain rules (validation, uniqueness on the
//! (user, start, end) tuple, the pending/approved/rejected lifecycle) behind
//! capability traits so the HTTP service can wire in any directory and
//! request store.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
