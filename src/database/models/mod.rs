pub mod user;
pub mod reminder;

pub use user::*;
pub use reminder::*;
