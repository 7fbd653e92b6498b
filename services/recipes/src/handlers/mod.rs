pub mod auth;
pub mod comment;
pub mod extract;
pub mod health;
pub mod identity;
pub mod recipe;
pub mod upvote;
pub mod user;
