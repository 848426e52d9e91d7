pub mod health_data;
pub mod points;
pub mod record;
