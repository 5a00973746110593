pub mod bookingdb;
pub mod db;
pub mod messagedb;
pub mod propertydb;
pub mod reviewdb;
pub mod userdb;
