//! Unit tests for the JPEG framer and container

mod framer_tests;
