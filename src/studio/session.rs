use super::backend::PodcastBackend;
use super::form::ContentForm;
use super::player::{AudioPlayer, MediaElement};

/// One page's worth of state: the form on one side, the player on the other.
pub struct StudioSession<M: MediaElement> {
    form: ContentForm,
    player: AudioPlayer<M>,
}

impl<M: MediaElement> StudioSession<M> {
    pub fn new(media: M) -> Self {
        Self {
            form: ContentForm::new(),
            player: AudioPlayer::new(media),
        }
    }

    pub fn form(&self) -> &ContentForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ContentForm {
        &mut self.form
    }

    pub fn player(&self) -> &AudioPlayer<M> {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut AudioPlayer<M> {
        &mut self.player
    }

    /// The title is shared between the form and the player's labels.
    pub fn set_title(&mut self, title: &str) {
        self.form.set_title(title);
        self.player.set_title(title);
    }

    pub async fn generate_script(&mut self, backend: &dyn PodcastBackend) -> bool {
        self.form.generate_script(backend).await
    }

    /// On success the new audio replaces whatever the player had, even when
    /// the provider returned no URL.
    pub async fn generate_voice(&mut self, backend: &dyn PodcastBackend) -> bool {
        match self.form.generate_voice(backend).await {
            Some(audio) => {
                self.player.load(audio);
                true
            }
            None => false,
        }
    }
}
