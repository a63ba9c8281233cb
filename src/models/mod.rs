//! 数据模型
//! 后端记录在前端的瞬时副本，以及列表页的辅助计算

pub mod access;
pub mod opportunity;
pub mod page;
pub mod product;

pub use access::*;
pub use opportunity::*;
pub use page::*;
pub use product::*;
