pub mod health;
pub mod media;
pub mod registration;
pub mod reminder;
