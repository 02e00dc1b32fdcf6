mod concurrent_tests;
mod engine_tests;
