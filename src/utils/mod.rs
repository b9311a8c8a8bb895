// Utils compartidos

pub mod constants;
pub mod format;
pub mod spawn;

pub use constants::*;
pub use format::*;
pub use spawn::*;
