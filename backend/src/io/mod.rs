//! Session layer: the entry points a dashboard front end calls.

pub mod session;

pub use session::DashboardSession;
