pub mod closure;
pub mod deps;
pub mod dispatch;
pub mod helpers;
pub mod paths;

pub use dispatch::dispatch;
