//! # Haze Priors
//!
//! Auxiliary signals computed from hazy inputs and fed to dehazing networks
//! alongside the image itself.
//!
//! ## Modules
//!
//! - `atmospheric`: Dark-channel atmospheric light estimation, as a raw colour or a
//!   normalised luminance.
//! - `edge`: Averaged absolute-gradient edge map used as an extra input channel.

mod atmospheric;
mod edge;

pub use atmospheric::*;
pub use edge::*;
