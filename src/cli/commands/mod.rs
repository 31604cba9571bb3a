pub mod alias;
pub mod room;
pub mod user;
