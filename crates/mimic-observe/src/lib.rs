//! Logging and trace export setup shared by the `mimic` binary.

pub mod tracing_setup;
