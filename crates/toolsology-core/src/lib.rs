pub mod app_config;
pub mod config;
pub mod listing;
pub mod plans;
pub mod products;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use listing::{related_products, ListingQuery, SortOrder};
pub use plans::{
    decode_duration, normalize_plan, plan_description, unit_price_label, DecodedDuration,
    DurationType, NormalizedPlan, PlanTerm,
};
pub use products::{
    CategoryRecord, CategoryRef, DurationCode, ImageRef, NormalizedProduct, ProductRecord, RawPlan,
    ReviewProduct, ReviewRecord,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
