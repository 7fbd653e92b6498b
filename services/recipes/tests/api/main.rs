
mod auth_test;
mod user_test;
