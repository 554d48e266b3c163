use std::error::Error;

/// Who a transcript line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// A surface showing the running conversation plus the latest top
/// prediction. Implementations render however they like; the transcript
/// is append-only.
pub trait DeviceDisplay: Send + Sync {
    fn append_chat(&mut self, role: Role, text: &str) -> Result<(), Box<dyn Error + Send + Sync>>;

    fn show_top_prediction(
        &mut self,
        label: &str,
        probability: f32,
    ) -> Result<(), Box<dyn Error + Send + Sync>>;
}
