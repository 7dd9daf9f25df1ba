//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises the engine end-to-end
//! against the shipped adapters plus the scripted doubles in `mock_ports`.

mod contact_flow_tests;
mod mock_ports;
mod stored_engine_tests;
