//! Session, password and CSRF primitives shared by recipedb services.

pub mod cookie;
pub mod csrf;
pub mod password;
pub mod session;
