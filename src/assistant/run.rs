use crate::assistant::core::{init, transition, Effect, Model};
use crate::assistant::main::Assistant;
use crate::assistant::render::Render;

impl Assistant {
    /// Drives the event loop until the event channel closes. Effects
    /// run on their own threads and report back as events.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut render = Render::new(self.config.clone(), self.device_display.clone());
        let (mut model, effects) = init(&self.config);
        self.share(&model);
        render.render(&model)?;
        self.spawn_effects(effects);

        loop {
            let event = self.event_receiver.lock().unwrap().recv()?;
            self.logger.info(&event.to_display_string())?;
            let (next, effects) = transition(&self.config, model, event);
            model = next;
            self.share(&model);
            render.render(&model)?;
            self.spawn_effects(effects);
        }
    }

    fn share(&self, model: &Model) {
        *self.model.lock().unwrap() = model.clone();
    }

    fn spawn_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            // Sampling starts on this thread so its cancellation token
            // is already installed when the dispatch returns; a stop
            // landing right behind it must find something to cancel.
            if effect == Effect::StartSampling {
                self.start_sampling();
                continue;
            }
            let assistant = self.clone();
            std::thread::spawn(move || assistant.run_effect(effect));
        }
    }
}
