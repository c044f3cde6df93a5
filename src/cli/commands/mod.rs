pub mod extract;
pub mod fixes;
mod helper;
pub mod init;
pub mod scan;
pub mod suggest;
