//! User directory domain module.
//!
//! Profiles for the people the login service issues tokens to. Credentials
//! never pass through here; a profile only records who someone is and the
//! role administrators have granted them.

mod errors;
mod profile;

pub use errors::UserError;
pub use profile::{ProfileDetails, UserProfile, UNKNOWN_CITY};
