pub mod claims;
pub mod codec;
pub mod errors;

pub use claims::Claims;
pub use codec::JwtCodec;
pub use codec::VerifyOptions;
pub use errors::JwtError;
