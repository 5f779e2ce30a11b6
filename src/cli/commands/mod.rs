pub mod align;
pub mod check;
mod command_result;
pub mod edit;
pub mod helper;
pub mod init;
pub mod lang;
pub mod show;

pub use command_result::*;
