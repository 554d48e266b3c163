pub mod impl_fake;
pub mod impl_folder;
pub mod interface;
