mod validator;

pub mod guards;
pub mod model;

pub use validator::{Claims, JwtValidator};
