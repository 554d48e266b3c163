pub trait DeviceSpeech {
    fn speak(
        &self,
        text: &str,
        locale: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
