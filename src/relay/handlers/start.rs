use crate::relay::runtime::{RelayRuntime, requester_of};
use crate::transport::channels::InboundMessage;

impl RelayRuntime {
    /// Greeting; whitelisted users also see their temperature.
    pub(in crate::relay) async fn start(&self, msg: &InboundMessage) -> anyhow::Result<()> {
        self.typing(msg).await;
        let requester = requester_of(msg);
        let mut text = String::from("Hi I'm a Chatbot :) write anything");

        if self.access.is_allowed(requester).await? {
            let session = self.session_for(msg).await?;
            let temperature = session.lock().await.temperature();
            text.push_str("\n\nYou are whitelisted! have fun :D");
            text.push_str(&format!(
                "\n\nCurrent temperature is {temperature}\nUpdate with: /temp [temperature]"
            ));
            if self.access.is_admin(requester).await? {
                text.push_str("\n\n*Admin mode* 🥳");
            }
        } else {
            text.push_str(
                "\n\nYou are not whitelisted yet. Please ask the creator of this bot to add you if you know them.",
            );
        }

        self.reply(msg, &text).await
    }
}
