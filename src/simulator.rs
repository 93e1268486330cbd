//! Balance simulator for the tower climber.
//! Run with: cargo test -p idle-climber simulate_optimal -- --nocapture
