mod pipeline_tests;
mod server_tests;
