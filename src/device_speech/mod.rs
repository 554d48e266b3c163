pub mod impl_command;
pub mod impl_fake;
pub mod interface;
