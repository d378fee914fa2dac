//! # openledger-posting
//!
//! **Posting plane**: the protocol that turns a business intent into one or
//! more balanced ledger entries under a single transaction record.
//!
//! The [`Poster`] composes the books plane (directory + store) behind one
//! `RwLock`. Holding the write lock from validation through append makes the
//! read-balance-then-append sequence atomic per the concurrency model: for
//! any pair of concurrent transfers debiting the same account, the total
//! debited never exceeds the balance that existed before the first of them
//! committed.

pub mod poster;

pub use poster::Poster;
