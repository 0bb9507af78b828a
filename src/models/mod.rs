pub mod quota;
pub mod subscription;
pub mod types;

pub use quota::*;
pub use subscription::*;
pub use types::*;
