pub mod admindtos;
pub mod bookingdtos;
pub mod messagedtos;
pub mod propertydtos;
pub mod reviewdtos;
pub mod userdtos;
