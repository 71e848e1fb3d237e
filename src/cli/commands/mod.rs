mod command_result;
pub mod helper;
pub mod init;
pub mod listing;
pub mod publish;
pub mod scan;
pub mod status;
pub mod strings;
pub mod translate;

pub use command_result::*;
