//! Инфраструктурный слой вокруг движка блэкджека:
//! - RNG-реализации для движка;
//! - провайдеры решений (сценарий, бот, канал с таймаутом);
//! - консольный ввод/вывод.

pub mod console;
pub mod decisions;
pub mod rng;

pub use console::*;
pub use decisions::*;
pub use rng::*;
