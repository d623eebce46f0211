pub mod departments;
pub mod documents;
pub mod health;
pub mod session;
