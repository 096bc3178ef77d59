pub mod forward_pass;
pub mod priority;
pub mod urgency;
