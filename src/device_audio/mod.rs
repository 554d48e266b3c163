#[cfg(test)]
pub mod impl_fake;
pub mod impl_rodio;
pub mod interface;
