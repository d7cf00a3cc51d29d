pub mod movie;
pub mod user;

pub use movie::{Director, Movie, Series};
pub use user::{ProfileUpdate, Registration, User, UserResponse};
