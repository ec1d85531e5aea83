mod credentials;
mod r#impl;
mod structs;

pub use credentials::{Credentials, PASSWORD_VAR, USERNAME_VAR};
pub use r#impl::{get_config, init_config};
pub use structs::*;
