pub mod health;
pub mod insights;
pub mod items;
pub mod kpis;
pub mod profile;
pub mod series;
