/// Prefix-tagged log helpers
pub mod logging;
/// Button target and callback data validation
pub mod validation;
