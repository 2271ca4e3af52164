pub mod algebra;
pub mod rebalance;
