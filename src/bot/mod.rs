/// Demo commands and the actions their buttons call
pub mod commands;
/// Update routing for messages and callback queries
pub mod handlers;
