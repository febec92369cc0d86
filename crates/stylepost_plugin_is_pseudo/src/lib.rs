pub use is_pseudo_config::IsPseudoConfig;
pub use is_pseudo_config::Preserve;
pub use is_pseudo_normalizer::StylepostIsPseudoPlugin;

mod is_pseudo_config;
mod is_pseudo_normalizer;
