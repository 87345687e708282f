pub mod touch;

pub use touch::TouchState;
