//! # openledger-gateway
//!
//! **Identity plane** and external facade of the OpenLedger core.
//!
//! ## Architecture
//!
//! A collaborator (HTTP handler, bot transport, test harness) drives the
//! bank through [`BankGateway`]:
//! 1. `register` / `login` through the [`UserRegistry`] and [`SessionGate`]
//! 2. open and list accounts for the authenticated user
//! 3. post top-ups and transfers — delegated to the posting plane, which
//!    owns the books and their lock discipline
//! 4. drive the KYC lifecycle (which never gates postings)
//!
//! The gateway holds identity state under its own lock; it never holds that
//! lock across a call into the posting plane.

pub mod service;
pub mod sessions;
pub mod users;

pub use service::BankGateway;
pub use sessions::SessionGate;
pub use users::UserRegistry;
