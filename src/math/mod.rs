//! Small numerical utilities: a least-squares solver and polynomial fitting
//! for the cost-effectiveness trend line.

pub mod ols;
pub mod poly;
