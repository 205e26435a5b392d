pub mod apply;
pub mod extract;
pub mod init;
