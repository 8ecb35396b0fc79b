pub mod focus;
pub mod key;
