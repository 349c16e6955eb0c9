use sapper_core::LossNotifier;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::HtmlAudioElement;

pub(crate) const LOSS_SOUND: &str = "sounds/loss.wav";

/// Plays a sound clip when the match is lost.
pub(crate) struct LossSound {
    audio: Option<HtmlAudioElement>,
}

impl LossSound {
    pub(crate) fn new(src: &str) -> Self {
        let audio = match HtmlAudioElement::new_with_src(src) {
            Ok(audio) => Some(audio),
            Err(err) => {
                log::warn!("Could not load sound {}: {:?}", src, err);
                None
            }
        };
        Self { audio }
    }
}

impl LossNotifier for LossSound {
    fn on_loss(&mut self) {
        let Some(audio) = &self.audio else {
            return;
        };

        audio.set_current_time(0.0);
        let playing = match audio.play() {
            Ok(promise) => JsFuture::from(promise),
            Err(err) => {
                log::warn!("Could not play loss sound: {:?}", err);
                return;
            }
        };
        // autoplay policies reject the promise instead of failing the call
        spawn_local(async move {
            if let Err(err) = playing.await {
                log::warn!("Loss sound was rejected: {:?}", err);
            }
        });
    }
}
