pub mod banner;
pub mod doctor;
pub mod init;
pub mod install;
pub mod prompt;
pub mod run;
pub mod status;
pub mod uninstall;
