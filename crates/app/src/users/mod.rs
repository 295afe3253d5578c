//! User accounts: the entity itself and the admin back-office over it.

pub mod models;
pub mod repository;
pub mod service;

pub use models::{PasswordReset, Role, User, UserId};
pub use repository::{HttpUsersRepository, UsersRepository};
pub use service::UsersService;
