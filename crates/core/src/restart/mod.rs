pub mod restart_coordinator;
