pub mod backtester;
pub mod signals;

pub use backtester::Backtester;
pub use signals::{SignalGenerator, StrategyConfig};
