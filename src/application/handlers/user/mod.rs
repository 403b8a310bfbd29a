//! User directory handlers: a caller's own profile, and the admin directory.

mod directory;
mod profile;

pub use directory::{ChangeRoleCommand, DeleteUserCommand, UserDirectoryHandler};
pub use profile::{ProfileHandler, SaveProfileCommand};
