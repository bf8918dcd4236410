//! The credential store boundary.
//!
//! Persistence is an external collaborator: the authentication core only
//! needs to look a user up by login and record the last login time.
//! Implement [`UserRepository`] against your own storage backend; the
//! `mocks` feature provides an in-memory [`MockUserRepository`] for tests
//! and demos.

mod user;

#[cfg(any(test, feature = "mocks"))]
mod user_mock;

pub use user::StoredUser;
pub use user::UserRepository;

#[cfg(any(test, feature = "mocks"))]
pub use user_mock::MockUserRepository;
