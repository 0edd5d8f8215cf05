pub mod contractdb;
pub mod db;
pub mod messagedb;
pub mod projectdb;
pub mod proposaldb;
pub mod reviewdb;
pub mod userdb;
