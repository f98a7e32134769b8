pub mod interview;
pub mod question;
pub mod resume;
pub mod user;
