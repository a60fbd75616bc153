pub mod actions;
pub mod indicator;
pub mod init;
pub mod record;
pub mod run;
