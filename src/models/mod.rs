pub mod bookingmodel;
pub mod messagemodel;
pub mod propertymodel;
pub mod reviewmodel;
pub mod usermodel;
