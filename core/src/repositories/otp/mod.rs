//! Passcode store interface and in-memory implementation

pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;

pub mod mock;

pub use mock::MockOtpRepository;
pub use r#trait::OtpRepository;
