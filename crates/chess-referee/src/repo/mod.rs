//! Repositories over the referee tables.
//!
//! Functions take a [`rusqlite::Connection`] rather than holding the
//! pool themselves. An open [`rusqlite::Transaction`] derefs to a
//! connection, so the service can run an operation's reads and writes
//! under one transaction and commit or roll back as a unit.

pub mod games;
pub mod moves;
pub mod pieces;
