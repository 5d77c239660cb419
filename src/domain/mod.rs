//! Доменная модель блэкджека: карты, колода, руки, игроки, дилер, конфиг стола.

pub mod card;
pub mod deck;
pub mod hand;
pub mod player;
pub mod table;

// Удобные реэкспорты, чтобы в других модулях писать crate::domain::Card и т.п.
pub use card::*;
pub use deck::*;
pub use hand::*;
pub use player::*;
pub use table::*;
