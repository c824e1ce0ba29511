//! OpenDART 수집을 위한 도메인 모델.

mod classification;
mod company;
mod directory;
mod disclosure;
mod financial_statement;
mod shareholding;
mod table;

pub use classification::*;
pub use company::*;
pub use directory::*;
pub use disclosure::*;
pub use financial_statement::*;
pub use shareholding::*;
pub use table::*;
