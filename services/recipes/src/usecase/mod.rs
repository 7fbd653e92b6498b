pub mod auth;
pub mod comment;
pub mod ownership;
pub mod recipe;
pub mod upvote;
pub mod user;
