//! Integration tests driving the full router over in-memory backends.

mod helpers;

mod assignment_test;
mod auth_test;
mod permission_test;
mod role_test;
mod user_test;
