pub mod rsi;
