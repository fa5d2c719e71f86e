// End-to-end tests for the feedback subsystem.
//
// Each test runs against its own PostgreSQL testcontainer with the crate's
// migrations applied, so repository reads/writes and the LISTEN/NOTIFY push
// channel are exercised against a real database. Tests are serialized to
// keep container usage predictable.

mod helpers;
mod test_feedback;
mod test_realtime;
