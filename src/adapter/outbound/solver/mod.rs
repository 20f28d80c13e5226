//! Solver backends implementing [`crate::port::outbound::solver::Solver`].

mod highs;

pub use highs::HiGHSSolver;
