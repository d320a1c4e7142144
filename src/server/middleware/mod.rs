//! Request guards shared by the controllers.

pub mod auth;
pub mod client;

#[cfg(test)]
mod test;
