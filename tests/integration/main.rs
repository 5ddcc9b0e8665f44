mod pipeline_test;
mod relay_test;
