//! 수집기 전반에서 사용되는 공통 타입.

mod amount;
mod identifier;

pub use amount::*;
pub use identifier::*;
