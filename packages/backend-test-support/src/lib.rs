//! Helpers shared by the backend's unit and integration tests: one-time
//! log initialization and Problem Details assertions.

pub mod logging;
pub mod problem_details;
