pub mod answer;
pub mod execute;
pub mod plan;
pub mod time_mode;
