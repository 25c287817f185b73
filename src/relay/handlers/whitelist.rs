use crate::core::access::AccessList;
use crate::relay::runtime::RelayRuntime;
use crate::transport::channels::InboundMessage;

impl RelayRuntime {
    pub(in crate::relay) async fn whitelist_add(
        &self,
        msg: &InboundMessage,
        user: Option<&str>,
    ) -> anyhow::Result<()> {
        let Some(user) = user else {
            return self
                .reply(msg, "Please specify a username or id like this: /add [user]")
                .await;
        };
        let text = if self.access.add(AccessList::Allowed, user).await? {
            tracing::info!(admin = %msg.user_id, user, "user added to whitelist");
            format!("User \"{user}\" has been added to the whitelist")
        } else {
            format!("User \"{user}\" is already whitelisted")
        };
        self.reply(msg, &text).await
    }

    pub(in crate::relay) async fn whitelist_remove(
        &self,
        msg: &InboundMessage,
        user: Option<&str>,
    ) -> anyhow::Result<()> {
        let Some(user) = user else {
            return self
                .reply(msg, "Please specify a username or id like this: /remove [user]")
                .await;
        };
        let text = if self.access.remove(AccessList::Allowed, user).await? {
            tracing::info!(admin = %msg.user_id, user, "user removed from whitelist");
            format!("User \"{user}\" has been removed from the whitelist")
        } else {
            format!("User \"{user}\" was not whitelisted in the first place")
        };
        self.reply(msg, &text).await
    }

    pub(in crate::relay) async fn whitelist_list(&self, msg: &InboundMessage) -> anyhow::Result<()> {
        let users = self.access.list(AccessList::Allowed).await?;
        let listing = if users.is_empty() {
            "<empty>".to_string()
        } else {
            users.join("\n")
        };
        self.reply(msg, &format!("Whitelisted users:\n\n{listing}"))
            .await
    }
}
