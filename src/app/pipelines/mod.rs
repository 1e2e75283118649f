pub mod banks_pipeline;
