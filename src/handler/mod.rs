pub mod admin;
pub mod auth;
pub mod bookings;
pub mod messages;
pub mod properties;
pub mod reviews;
pub mod users;

#[cfg(test)]
mod tests;
