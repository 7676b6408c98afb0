pub mod login;
pub mod product;
pub mod user;
pub mod validation;

pub use login::{Credentials, LoginRequest};
pub use product::{Product, ProductDraft, ProductInput};
pub use user::{Role, User, UserDraft, UserInput};
pub use validation::ValidationErrors;
