//! rxview - 响应式视图绑定运行时
//!
//! 模块结构：
//! - core: 核心抽象（响应式流、Command、错误与错误汇）
//! - binding: 命令绑定（Provider 注册表、按亲和度选择、事件绑定）
//! - view: 视图解析（ViewModel、ViewLocator、ViewHost）
//! - activation: 激活/停用信号
//! - config / logging: 配置与日志

pub mod activation;
pub mod binding;
pub mod config;
pub mod core;
pub mod logging;
pub mod view;

pub use activation::{ActivationSignal, CanActivate};
pub use binding::{Affinity, BindingProvider, BindingTarget, EventBindingProvider, ProviderRegistry};
pub use config::{LoggingConfig, RxConfig};
pub use crate::core::{BindingError, Command, DelegateCommand, ErrorSink, Observable, Subscription};
pub use view::{Content, Control, HostOptions, ViewContract, ViewFor, ViewHost, ViewLocator, ViewModel};
