//! 界面状态容器
//! 在启动时创建，通过引用传给视图层，只经由各自的方法修改

pub mod debounce;
pub mod toast;

pub use debounce::SearchDebouncer;
pub use toast::{Toast, ToastStore, ToastVariant};
