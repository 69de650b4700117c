pub mod db;
pub mod sync;

pub use db::DbAdapter;
pub use sync::HttpRemoteSync;
