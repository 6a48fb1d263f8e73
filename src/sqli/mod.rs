//! Time-based blind SQL injection engine
//!
//! - oracle: timing oracle over an injection point
//! - extract: character-by-character string recovery
//! - dialect: banner and DBMS family detection
//! - enumerate: count-then-fetch over tables, columns and rows
//! - session: cached operations behind the interactive menu

pub mod cache;
pub mod dialect;
pub mod enumerate;
pub mod extract;
pub mod oracle;
pub mod queries;
pub mod request;
pub mod session;

#[cfg(test)]
pub mod testing;

pub use oracle::TimingOracle;
pub use request::InjectionPoint;
pub use session::Session;
