pub mod add;
pub mod config;
pub mod init;
pub mod list;

pub use add::run_add;
pub use init::init_catalog;
pub use list::list_catalog;
