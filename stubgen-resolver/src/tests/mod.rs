//! Scenario tests for the resolution driver
//!
//! Unit tests for the individual building blocks live next to them; these
//! exercise complete runs through `resolve` and friends.


// Non-fatal input problems
mod test_cycles;


// Ordering guarantees
mod test_determinism;
